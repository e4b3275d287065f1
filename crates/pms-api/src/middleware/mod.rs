//! # Middleware Modules
//!
//! Tower middleware layers for the policy API.

pub mod metrics;
pub mod tracing_layer;
