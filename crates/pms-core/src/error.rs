//! # Error Hierarchy
//!
//! Structured error types for the policy service, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Two families exist: [`ValidationError`] is raised while constructing
//! domain values, before any store is touched, and [`StoreError`] is raised by
//! store operations. Every store failure leaves the store unchanged.

use thiserror::Error;

use crate::identity::PolicyId;
use crate::policy::PolicyType;

/// Validation errors for policy fields.
///
/// Carries the offending input so that callers can report it without
/// re-deriving what went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Policy name is the empty string.
    #[error("policy name must not be empty")]
    EmptyName,

    /// Policy name exceeds the maximum length.
    #[error("policy name is {length} characters long (maximum {max})")]
    NameTooLong {
        /// Length of the rejected name, in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// Policy name contains characters outside `[A-Za-z0-9_]`.
    #[error("invalid policy name: \"{0}\" (expected letters, digits, or underscore)")]
    InvalidNameCharacters(String),

    /// Policy type string does not name a known kind.
    #[error("unknown policy type: \"{0}\"")]
    UnknownPolicyType(String),
}

/// Errors returned by policy store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live record has the given identifier.
    #[error("policy {0} not found")]
    NotFound(PolicyId),

    /// The name is already reserved for a type with enforced unique names.
    #[error("{policy_type} policy names must be unique: \"{name}\" is already in use")]
    DuplicateName {
        /// Type whose reservation set holds the name.
        policy_type: PolicyType,
        /// The contested name.
        name: String,
    },

    /// An update tried to change the type of an existing policy.
    #[error("cannot change policy type from {current} to {requested}")]
    TypeImmutable {
        /// Type stored on the record.
        current: PolicyType,
        /// Type supplied by the update.
        requested: PolicyType,
    },
}
