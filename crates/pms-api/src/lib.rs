//! # pms-api — HTTP Transport for the Policy Store
//!
//! Exposes [`pms_store::PolicyStore`] over JSON/HTTP with axum. Handlers are
//! thin: they decode and validate the request, call the store, and map
//! [`pms_core::StoreError`] to a status code by kind through [`AppError`].
//!
//! ## API Surface
//!
//! | Path                  | Module                 |
//! |-----------------------|------------------------|
//! | `/v1/policies/*`      | [`routes::policies`]   |
//! | `/openapi.json`       | [`openapi`]            |
//! | `/health/*`           | this module            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! [`AppError`]: error::AppError

pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the middleware stack so
/// they do not show up in request counters.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .merge(routes::policies::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the store is in memory, so ready as soon as serving.
async fn readiness() -> &'static str {
    "ready"
}
