#![deny(missing_docs)]

//! # pms-store — In-Memory Policy Store
//!
//! [`PolicyStore`] is the single authority over policy records and the
//! per-type name reservations. It performs no I/O and no logging; every
//! failure is returned to the caller as a [`pms_core::StoreError`].
//!
//! ## Invariants
//!
//! - For every type that enforces unique names, no two live policies of that
//!   type share a name.
//! - A policy's type never changes after creation.
//! - For every enforced type, the reserved names are exactly the names of the
//!   live policies of that type, after every operation including failed ones.
//!
//! ## Concurrency
//!
//! One `parking_lot::RwLock` guards all state. Mutations hold the write lock
//! across the whole check-then-mutate step.

mod registry;
pub mod store;

pub use store::PolicyStore;
