//! # Name Uniqueness Configuration
//!
//! Declares, per [`PolicyType`], whether names must be unique among live
//! policies of that type. The store receives this at construction and never
//! consults any other source.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::policy::PolicyType;

/// Mapping from policy type to "enforce unique names".
///
/// Types missing from the mapping are not enforced. The default enforces
/// uniqueness for [`PolicyType::Arupa`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<PolicyType, bool>", into = "BTreeMap<PolicyType, bool>")]
pub struct NameUniqueness {
    enforced: BTreeSet<PolicyType>,
}

impl NameUniqueness {
    /// No type enforces unique names.
    pub fn none() -> Self {
        Self {
            enforced: BTreeSet::new(),
        }
    }

    /// Every type enforces unique names.
    pub fn all() -> Self {
        Self::from_types(PolicyType::all().iter().copied())
    }

    /// Enforce uniqueness for exactly the given types.
    pub fn from_types(types: impl IntoIterator<Item = PolicyType>) -> Self {
        Self {
            enforced: types.into_iter().collect(),
        }
    }

    /// Set the flag for one type.
    pub fn set(&mut self, policy_type: PolicyType, enforce: bool) {
        if enforce {
            self.enforced.insert(policy_type);
        } else {
            self.enforced.remove(&policy_type);
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, policy_type: PolicyType, enforce: bool) -> Self {
        self.set(policy_type, enforce);
        self
    }

    /// Whether names of `policy_type` must be unique.
    pub fn is_enforced(&self, policy_type: PolicyType) -> bool {
        self.enforced.contains(&policy_type)
    }

    /// Enforced types in declaration order.
    pub fn enforced_types(&self) -> impl Iterator<Item = PolicyType> + '_ {
        self.enforced.iter().copied()
    }
}

impl Default for NameUniqueness {
    fn default() -> Self {
        Self::from_types([PolicyType::Arupa])
    }
}

impl From<BTreeMap<PolicyType, bool>> for NameUniqueness {
    fn from(map: BTreeMap<PolicyType, bool>) -> Self {
        Self::from_types(
            map.into_iter()
                .filter_map(|(policy_type, enforce)| enforce.then_some(policy_type)),
        )
    }
}

impl From<NameUniqueness> for BTreeMap<PolicyType, bool> {
    fn from(value: NameUniqueness) -> Self {
        PolicyType::all()
            .iter()
            .map(|t| (*t, value.is_enforced(*t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enforces_arupa_only() {
        let u = NameUniqueness::default();
        assert!(u.is_enforced(PolicyType::Arupa));
        assert!(!u.is_enforced(PolicyType::Frisco));
        assert_eq!(u.enforced_types().collect::<Vec<_>>(), vec![PolicyType::Arupa]);
    }

    #[test]
    fn set_toggles_a_single_type() {
        let u = NameUniqueness::none()
            .with(PolicyType::Frisco, true)
            .with(PolicyType::Arupa, false);
        assert!(u.is_enforced(PolicyType::Frisco));
        assert!(!u.is_enforced(PolicyType::Arupa));
    }

    #[test]
    fn all_and_none() {
        assert!(PolicyType::all()
            .iter()
            .all(|t| NameUniqueness::all().is_enforced(*t)));
        assert!(PolicyType::all()
            .iter()
            .all(|t| !NameUniqueness::none().is_enforced(*t)));
    }

    #[test]
    fn serializes_as_full_flag_map() {
        let json = serde_json::to_value(NameUniqueness::default()).unwrap();
        assert_eq!(json, serde_json::json!({"Arupa": true, "Frisco": false}));
    }

    #[test]
    fn deserializes_from_partial_flag_map() {
        let u: NameUniqueness = serde_json::from_str(r#"{"Frisco": true}"#).unwrap();
        assert!(u.is_enforced(PolicyType::Frisco));
        assert!(!u.is_enforced(PolicyType::Arupa));
    }
}
