//! # API Route Modules
//!
//! - `policies` — policy CRUD with per-type unique-name enforcement.

pub mod policies;
