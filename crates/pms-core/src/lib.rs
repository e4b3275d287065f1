#![deny(missing_docs)]

//! # pms-core — Foundational Types for the Policy Management Service
//!
//! Every other crate in the workspace depends on this one. It has no internal
//! crate dependencies and performs no I/O — only `serde`, `thiserror`, and
//! `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Validated newtypes.** A [`PolicyName`] that exists is a valid name;
//!    validation happens once, at construction or deserialization.
//!
//! 2. **Uniqueness is configuration.** [`NameUniqueness`] maps each
//!    [`PolicyType`] to an "enforce unique names" flag and is handed to the
//!    store explicitly.
//!
//! 3. **Typed failures.** [`ValidationError`] and [`StoreError`] are
//!    enumerable, so the transport layer maps failure kind to status without
//!    inspecting messages.

pub mod error;
pub mod identity;
pub mod policy;
pub mod uniqueness;

pub use error::{StoreError, ValidationError};
pub use identity::PolicyId;
pub use policy::{Policy, PolicyName, PolicyRecord, PolicyType, PolicyUpdate};
pub use uniqueness::NameUniqueness;
