//! # Policy Store
//!
//! Thread-safe, cloneable in-memory policy store.
//!
//! All state (records, insertion order, name reservations) sits behind one
//! `parking_lot::RwLock`. Every mutating operation holds the write lock for
//! its whole check-then-mutate sequence, so two concurrent creates of the same
//! unique name cannot both pass the reservation check. The lock is never held
//! across `.await` points; `parking_lot::RwLock` does not poison.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use pms_core::{
    NameUniqueness, Policy, PolicyId, PolicyRecord, PolicyType, PolicyUpdate, StoreError,
};

use crate::registry::NameRegistry;

#[derive(Debug)]
struct Inner {
    records: HashMap<PolicyId, PolicyRecord>,
    order: Vec<PolicyId>,
    names: NameRegistry,
}

/// In-memory policy store enforcing per-type name uniqueness.
///
/// Cloning is cheap and clones share state.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    inner: Arc<RwLock<Inner>>,
}

impl PolicyStore {
    /// Create an empty store with the given uniqueness configuration.
    pub fn new(uniqueness: NameUniqueness) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: HashMap::new(),
                order: Vec::new(),
                names: NameRegistry::new(uniqueness),
            })),
        }
    }

    /// Store a new policy and return its freshly generated identifier.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateName`] if the policy's type enforces unique
    /// names and the name is taken. Nothing is stored in that case.
    pub fn create(&self, policy: Policy) -> Result<PolicyId, StoreError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        inner.names.reserve(policy.policy_type, &policy.name)?;

        let mut id = PolicyId::new();
        while inner.records.contains_key(&id) {
            id = PolicyId::new();
        }
        inner.records.insert(id, PolicyRecord::new(id, policy));
        inner.order.push(id);
        Ok(id)
    }

    /// Return a snapshot of the policy with the given identifier.
    pub fn read(&self, id: &PolicyId) -> Result<PolicyRecord, StoreError> {
        self.inner
            .read()
            .records
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }

    /// Apply a partial update and return the resulting snapshot.
    ///
    /// Checks run before anything is written: unknown id, then a type change,
    /// then a rename onto a taken name. A failed update changes nothing.
    pub fn update(&self, id: &PolicyId, update: PolicyUpdate) -> Result<PolicyRecord, StoreError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let record = inner.records.get_mut(id).ok_or(StoreError::NotFound(*id))?;

        if let Some(requested) = update.policy_type {
            if requested != record.policy_type {
                return Err(StoreError::TypeImmutable {
                    current: record.policy_type,
                    requested,
                });
            }
        }

        if let Some(name) = update.name {
            if name != record.name {
                inner.names.rename(record.policy_type, &record.name, &name)?;
                record.name = name;
            }
        }

        if let Some(description) = update.description {
            record.description = description;
        }

        Ok(record.clone())
    }

    /// Remove a policy, release its name, and return the removed snapshot.
    ///
    /// A second delete of the same id fails with [`StoreError::NotFound`].
    pub fn delete(&self, id: &PolicyId) -> Result<PolicyRecord, StoreError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let record = inner.records.remove(id).ok_or(StoreError::NotFound(*id))?;
        inner.order.retain(|live| live != id);

        let released = inner.names.release(record.policy_type, &record.name);
        debug_assert!(
            released || !inner.names.is_enforced(record.policy_type),
            "deleted {} policy {} held no reservation",
            record.policy_type,
            record.name
        );
        Ok(record)
    }

    /// Snapshot of all live policies in insertion order.
    ///
    /// The returned vector is detached from the store.
    pub fn list(&self) -> Vec<PolicyRecord> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect()
    }

    /// Check if a policy exists.
    pub fn contains(&self, id: &PolicyId) -> bool {
        self.inner.read().records.contains_key(id)
    }

    /// Return the number of live policies.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `name` is currently reserved for `policy_type`.
    ///
    /// Always `false` for types that do not enforce unique names.
    pub fn is_name_reserved(&self, policy_type: PolicyType, name: &str) -> bool {
        self.inner.read().names.is_reserved(policy_type, name)
    }

    /// Names currently reserved for `policy_type`, sorted.
    pub fn reserved_names(&self, policy_type: PolicyType) -> BTreeSet<String> {
        self.inner.read().names.names(policy_type)
    }

    /// The uniqueness configuration the store was built with.
    pub fn uniqueness(&self) -> NameUniqueness {
        self.inner.read().names.uniqueness().clone()
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new(NameUniqueness::default())
    }
}
