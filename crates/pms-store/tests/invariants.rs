//! Property tests: arbitrary create/update/delete sequences never break the
//! name reservation invariants.

use std::collections::BTreeSet;

use pms_core::{NameUniqueness, Policy, PolicyName, PolicyType, PolicyUpdate, StoreError};
use pms_store::PolicyStore;
use proptest::prelude::*;

const NAMES: &[&str] = &["alpha", "beta", "gamma", "delta"];

#[derive(Debug, Clone)]
enum Op {
    Create {
        name: usize,
        policy_type: PolicyType,
    },
    Update {
        target: usize,
        name: Option<usize>,
        description: Option<String>,
        policy_type: Option<PolicyType>,
    },
    Delete {
        target: usize,
    },
}

fn policy_type() -> impl Strategy<Value = PolicyType> {
    prop_oneof![Just(PolicyType::Arupa), Just(PolicyType::Frisco)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len(), policy_type())
            .prop_map(|(name, policy_type)| Op::Create { name, policy_type }),
        (
            0usize..8,
            proptest::option::of(0..NAMES.len()),
            proptest::option::of("[a-z]{0,6}"),
            proptest::option::of(policy_type()),
        )
            .prop_map(|(target, name, description, policy_type)| Op::Update {
                target,
                name,
                description,
                policy_type,
            }),
        (0usize..8).prop_map(|target| Op::Delete { target }),
    ]
}

fn uniqueness() -> impl Strategy<Value = NameUniqueness> {
    (any::<bool>(), any::<bool>()).prop_map(|(arupa, frisco)| {
        NameUniqueness::none()
            .with(PolicyType::Arupa, arupa)
            .with(PolicyType::Frisco, frisco)
    })
}

fn name(idx: usize) -> PolicyName {
    PolicyName::new(NAMES[idx]).unwrap()
}

/// Reservations equal live names for enforced types, are empty otherwise,
/// and enforced types never hold duplicate live names.
fn assert_invariants(store: &PolicyStore) -> Result<(), TestCaseError> {
    let uniqueness = store.uniqueness();
    let live = store.list();
    for &policy_type in PolicyType::all() {
        let live_names: Vec<String> = live
            .iter()
            .filter(|r| r.policy_type == policy_type)
            .map(|r| r.name.as_str().to_string())
            .collect();
        let distinct: BTreeSet<String> = live_names.iter().cloned().collect();
        let reserved = store.reserved_names(policy_type);

        if uniqueness.is_enforced(policy_type) {
            prop_assert_eq!(live_names.len(), distinct.len(), "duplicate live names");
            prop_assert_eq!(reserved, distinct);
        } else {
            prop_assert!(reserved.is_empty());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn reservations_track_live_names(
        uniqueness in uniqueness(),
        ops in proptest::collection::vec(op(), 1..60),
    ) {
        let store = PolicyStore::new(uniqueness.clone());

        for op in ops {
            let live = store.list();
            match op {
                Op::Create { name: idx, policy_type } => {
                    let taken = uniqueness.is_enforced(policy_type)
                        && live
                            .iter()
                            .any(|r| r.policy_type == policy_type && r.name == NAMES[idx]);
                    let result = store.create(Policy::new(NAMES[idx], "", policy_type).unwrap());
                    prop_assert_eq!(result.is_err(), taken);
                    if let Err(err) = result {
                        let is_duplicate = matches!(err, StoreError::DuplicateName { .. });
                        prop_assert!(is_duplicate);
                    }
                }
                Op::Update { target, name: new_name, description, policy_type } => {
                    if live.is_empty() {
                        continue;
                    }
                    let before = &live[target % live.len()];
                    let mut update = PolicyUpdate::new();
                    if let Some(idx) = new_name {
                        update = update.with_name(name(idx));
                    }
                    if let Some(d) = description.clone() {
                        update = update.with_description(d);
                    }
                    if let Some(t) = policy_type {
                        update = update.with_type(t);
                    }

                    match store.update(&before.policy_id, update) {
                        Ok(after) => {
                            prop_assert_eq!(after.policy_type, before.policy_type);
                            prop_assert_eq!(after.policy_id, before.policy_id);
                            if new_name.is_none() {
                                prop_assert_eq!(&after.name, &before.name);
                            }
                            if description.is_none() {
                                prop_assert_eq!(&after.description, &before.description);
                            }
                        }
                        Err(_) => {
                            // A failed update leaves the record untouched.
                            prop_assert_eq!(&store.read(&before.policy_id).unwrap(), before);
                        }
                    }
                }
                Op::Delete { target } => {
                    if live.is_empty() {
                        continue;
                    }
                    let id = live[target % live.len()].policy_id;
                    prop_assert!(store.delete(&id).is_ok());
                    prop_assert!(store.delete(&id).is_err());
                }
            }
            assert_invariants(&store)?;
        }
    }

    /// Whatever happened before, deleting every policy of an enforced type
    /// frees all of its names.
    #[test]
    fn deleting_everything_frees_every_name(
        ops in proptest::collection::vec((0..NAMES.len(), policy_type()), 0..20),
    ) {
        let store = PolicyStore::new(NameUniqueness::all());
        for (idx, policy_type) in ops {
            let _ = store.create(Policy::new(NAMES[idx], "", policy_type).unwrap());
        }
        for record in store.list() {
            store.delete(&record.policy_id).unwrap();
        }
        prop_assert!(store.is_empty());
        for &policy_type in PolicyType::all() {
            prop_assert!(store.reserved_names(policy_type).is_empty());
        }
    }
}
