//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented policy routes into a single OpenAPI
//! document served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the policy API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Policy Management API",
        version = "0.1.0",
        description = "Create, read, update, delete and list policies. Names are unique per policy type where configured.",
        license(name = "MIT OR Apache-2.0")
    ),
    paths(
        crate::routes::policies::create_policy,
        crate::routes::policies::list_policies,
        crate::routes::policies::get_policy,
        crate::routes::policies::update_policy,
        crate::routes::policies::delete_policy,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::policies::CreatePolicyRequest,
        crate::routes::policies::UpdatePolicyRequest,
        crate::routes::policies::PolicyResponse,
        crate::routes::policies::CreatePolicyResponse,
        crate::routes::policies::MessageResponse,
    )),
    tags(
        (name = "policies", description = "Policy management"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
