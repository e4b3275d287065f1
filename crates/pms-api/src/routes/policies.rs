//! # Policies API
//!
//! CRUD over the policy store. Name uniqueness and type immutability are
//! enforced by [`PolicyStore`](pms_store::PolicyStore); this module only
//! decodes requests, maps failures to [`AppError`] and logs mutations.
//!
//! ## Endpoints
//!
//! - `POST /v1/policies` — create policy
//! - `GET /v1/policies` — list policies
//! - `GET /v1/policies/:id` — get policy
//! - `PUT /v1/policies/:id` — update policy
//! - `DELETE /v1/policies/:id` — delete policy

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pms_core::{
    Policy, PolicyId, PolicyName, PolicyRecord, PolicyType, PolicyUpdate, ValidationError,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to create a policy. All fields are required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePolicyRequest {
    /// 1 to 32 characters from `[A-Za-z0-9_]`.
    #[schema(example = "p1")]
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// `"Arupa"` or `"Frisco"`.
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Arupa")]
    pub policy_type: PolicyType,
}

impl Validate for CreatePolicyRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        PolicyName::validate(&self.name)
    }
}

impl TryFrom<CreatePolicyRequest> for Policy {
    type Error = ValidationError;

    fn try_from(req: CreatePolicyRequest) -> Result<Self, Self::Error> {
        Policy::new(req.name, req.description, req.policy_type)
    }
}

/// Partial update. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePolicyRequest {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Must equal the stored type if supplied.
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<String>)]
    pub policy_type: Option<PolicyType>,
}

impl Validate for UpdatePolicyRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => PolicyName::validate(name),
            None => Ok(()),
        }
    }
}

impl TryFrom<UpdatePolicyRequest> for PolicyUpdate {
    type Error = ValidationError;

    fn try_from(req: UpdatePolicyRequest) -> Result<Self, Self::Error> {
        Ok(PolicyUpdate {
            name: req.name.map(PolicyName::new).transpose()?,
            description: req.description,
            policy_type: req.policy_type,
        })
    }
}

/// A stored policy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PolicyResponse {
    #[schema(value_type = String)]
    pub policy_id: PolicyId,
    #[schema(value_type = String)]
    pub name: PolicyName,
    pub description: String,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub policy_type: PolicyType,
}

impl From<PolicyRecord> for PolicyResponse {
    fn from(record: PolicyRecord) -> Self {
        Self {
            policy_id: record.policy_id,
            name: record.name,
            description: record.description,
            policy_type: record.policy_type,
        }
    }
}

/// Identifier of a freshly created policy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePolicyResponse {
    #[schema(value_type = String)]
    pub policy_id: PolicyId,
}

/// Acknowledgement for update and delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn json(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the policies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/policies", get(list_policies).post(create_policy))
        .route(
            "/v1/policies/:id",
            get(get_policy).put(update_policy).delete(delete_policy),
        )
}

/// An id that does not parse cannot name a stored policy, so it is a 404
/// like any other unknown id.
fn parse_policy_id(raw: &str) -> Result<PolicyId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("policy {raw} not found")))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/policies — Create a policy.
#[utoipa::path(
    post,
    path = "/v1/policies",
    request_body = CreatePolicyRequest,
    responses(
        (status = 201, description = "Policy created", body = CreatePolicyResponse),
        (status = 400, description = "Malformed body, invalid name or duplicate name", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
async fn create_policy(
    State(state): State<AppState>,
    body: Result<Json<CreatePolicyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePolicyResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let policy = Policy::try_from(req)?;
    let policy_type = policy.policy_type;

    let policy_id = state.policies.create(policy)?;
    tracing::info!(%policy_id, %policy_type, "policy created");

    Ok((StatusCode::CREATED, Json(CreatePolicyResponse { policy_id })))
}

/// GET /v1/policies — List policies in creation order.
#[utoipa::path(
    get,
    path = "/v1/policies",
    responses(
        (status = 200, description = "List of policies", body = Vec<PolicyResponse>),
    ),
    tag = "policies"
)]
async fn list_policies(State(state): State<AppState>) -> Json<Vec<PolicyResponse>> {
    Json(
        state
            .policies
            .list()
            .into_iter()
            .map(PolicyResponse::from)
            .collect(),
    )
}

/// GET /v1/policies/:id — Get a single policy.
#[utoipa::path(
    get,
    path = "/v1/policies/{id}",
    params(("id" = String, Path, description = "Policy ID")),
    responses(
        (status = 200, description = "Policy found", body = PolicyResponse),
        (status = 404, description = "Policy not found", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PolicyResponse>, AppError> {
    let id = parse_policy_id(&id)?;
    let record = state.policies.read(&id)?;
    Ok(Json(record.into()))
}

/// PUT /v1/policies/:id — Update a policy.
#[utoipa::path(
    put,
    path = "/v1/policies/{id}",
    params(("id" = String, Path, description = "Policy ID")),
    request_body = UpdatePolicyRequest,
    responses(
        (status = 200, description = "Policy updated", body = MessageResponse),
        (status = 400, description = "Invalid name, duplicate name or type change", body = crate::error::ErrorBody),
        (status = 404, description = "Policy not found", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
async fn update_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePolicyRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_policy_id(&id)?;
    let req = extract_validated_json(body)?;
    let update = PolicyUpdate::try_from(req)?;

    let record = state.policies.update(&id, update)?;
    tracing::info!(
        policy_id = %record.policy_id,
        policy_type = %record.policy_type,
        "policy updated"
    );

    Ok(MessageResponse::json("policy updated"))
}

/// DELETE /v1/policies/:id — Delete a policy.
#[utoipa::path(
    delete,
    path = "/v1/policies/{id}",
    params(("id" = String, Path, description = "Policy ID")),
    responses(
        (status = 200, description = "Policy deleted", body = MessageResponse),
        (status = 404, description = "Policy not found", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
async fn delete_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_policy_id(&id)?;

    let record = state.policies.delete(&id)?;
    tracing::info!(
        policy_id = %record.policy_id,
        policy_type = %record.policy_type,
        "policy deleted"
    );

    Ok(MessageResponse::json("policy deleted"))
}
