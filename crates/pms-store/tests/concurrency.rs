//! Concurrent writers racing for the same unique name.

use std::sync::Barrier;
use std::thread;

use pms_core::{NameUniqueness, Policy, PolicyName, PolicyType, PolicyUpdate, StoreError};
use pms_store::PolicyStore;

const WRITERS: usize = 16;

#[test]
fn concurrent_creates_of_same_unique_name_admit_exactly_one() {
    for _ in 0..20 {
        let store = PolicyStore::default();
        let barrier = Barrier::new(WRITERS);

        let results: Vec<Result<_, StoreError>> = thread::scope(|s| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let store = store.clone();
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        let policy =
                            Policy::new("contested", format!("writer {i}"), PolicyType::Arupa)
                                .unwrap();
                        store.create(policy)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one writer must win");
        assert!(results.iter().all(|r| match r {
            Ok(_) => true,
            Err(e) => matches!(e, StoreError::DuplicateName { .. }),
        }));
        assert_eq!(store.len(), 1);
        assert!(store.is_name_reserved(PolicyType::Arupa, "contested"));
    }
}

#[test]
fn concurrent_non_unique_creates_all_succeed() {
    let store = PolicyStore::default();
    thread::scope(|s| {
        for _ in 0..WRITERS {
            let store = store.clone();
            s.spawn(move || {
                store
                    .create(Policy::new("shared", "", PolicyType::Frisco).unwrap())
                    .unwrap();
            });
        }
    });
    assert_eq!(store.len(), WRITERS);
}

#[test]
fn concurrent_renames_onto_same_name_admit_exactly_one() {
    let store = PolicyStore::new(NameUniqueness::default());
    let ids: Vec<_> = (0..WRITERS)
        .map(|i| {
            store
                .create(Policy::new(format!("start_{i}"), "", PolicyType::Arupa).unwrap())
                .unwrap()
        })
        .collect();
    let barrier = Barrier::new(WRITERS);

    let successes = thread::scope(|s| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                let store = store.clone();
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let update =
                        PolicyUpdate::new().with_name(PolicyName::new("target").unwrap());
                    store.update(id, update).is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count()
    });

    assert_eq!(successes, 1);
    let names = store.reserved_names(PolicyType::Arupa);
    assert_eq!(names.len(), WRITERS);
    assert!(names.contains("target"));
    let live: Vec<String> = store
        .list()
        .into_iter()
        .map(|r| r.name.as_str().to_string())
        .collect();
    assert_eq!(live.iter().filter(|n| n.as_str() == "target").count(), 1);
}
