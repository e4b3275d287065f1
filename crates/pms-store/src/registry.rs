//! # Name Registry
//!
//! Per-type sets of reserved policy names. Only types enforced by the
//! [`NameUniqueness`] configuration keep a set; for every other type reserving
//! and releasing are no-ops.
//!
//! The registry does no locking of its own. It is only reachable through the
//! store's lock, which makes check-then-insert a single step.

use std::collections::{BTreeSet, HashMap, HashSet};

use pms_core::{NameUniqueness, PolicyName, PolicyType, StoreError};

#[derive(Debug)]
pub(crate) struct NameRegistry {
    uniqueness: NameUniqueness,
    taken: HashMap<PolicyType, HashSet<String>>,
}

impl NameRegistry {
    pub(crate) fn new(uniqueness: NameUniqueness) -> Self {
        Self {
            uniqueness,
            taken: HashMap::new(),
        }
    }

    pub(crate) fn uniqueness(&self) -> &NameUniqueness {
        &self.uniqueness
    }

    pub(crate) fn is_enforced(&self, policy_type: PolicyType) -> bool {
        self.uniqueness.is_enforced(policy_type)
    }

    pub(crate) fn is_reserved(&self, policy_type: PolicyType, name: &str) -> bool {
        self.taken
            .get(&policy_type)
            .is_some_and(|names| names.contains(name))
    }

    /// Reserve `name` for `policy_type`.
    ///
    /// Fails with [`StoreError::DuplicateName`] if the type is enforced and
    /// the name is already taken; the registry is unchanged in that case.
    pub(crate) fn reserve(
        &mut self,
        policy_type: PolicyType,
        name: &PolicyName,
    ) -> Result<(), StoreError> {
        if !self.is_enforced(policy_type) {
            return Ok(());
        }
        let names = self.taken.entry(policy_type).or_default();
        if !names.insert(name.as_str().to_string()) {
            return Err(StoreError::DuplicateName {
                policy_type,
                name: name.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Release `name` for `policy_type`. Absent names are tolerated.
    ///
    /// Returns whether a reservation was actually removed. Always `false` for
    /// types that are not enforced.
    pub(crate) fn release(&mut self, policy_type: PolicyType, name: &PolicyName) -> bool {
        self.taken
            .get_mut(&policy_type)
            .is_some_and(|names| names.remove(name.as_str()))
    }

    /// Move a reservation from `old` to `new`.
    ///
    /// The new name is claimed before the old one is released, and both happen
    /// under the caller's single lock hold. On failure the old reservation is
    /// untouched.
    pub(crate) fn rename(
        &mut self,
        policy_type: PolicyType,
        old: &PolicyName,
        new: &PolicyName,
    ) -> Result<(), StoreError> {
        if old == new {
            return Ok(());
        }
        self.reserve(policy_type, new)?;
        let released = self.release(policy_type, old);
        debug_assert!(
            released || !self.is_enforced(policy_type),
            "renamed {policy_type} policy {old} held no reservation"
        );
        Ok(())
    }

    pub(crate) fn names(&self, policy_type: PolicyType) -> BTreeSet<String> {
        self.taken
            .get(&policy_type)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }
}
