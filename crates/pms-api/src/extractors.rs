//! # Request Body Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so that undecodable bodies
//! become our own [`AppError::BadRequest`] envelope instead of axum's plain
//! text rejection. DTOs implementing [`Validate`] are then checked against
//! the policy field rules.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use pms_core::ValidationError;

use crate::error::AppError;

/// Request DTOs whose fields must satisfy domain rules beyond what serde
/// checks (e.g. the policy name pattern).
pub trait Validate {
    /// Check the DTO, returning the first rule it breaks.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Unwrap a JSON body, mapping rejection (malformed JSON, missing field,
/// unknown policy type) to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// [`extract_json`] followed by [`Validate::validate`].
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}
