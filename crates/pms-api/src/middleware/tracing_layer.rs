//! # Request Tracing
//!
//! `tower_http::trace::TraceLayer` producing one span per request with the
//! method and path, and an event carrying status and latency on response.

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Span factory type used by [`layer`].
pub type MakeSpan = fn(&Request<axum::body::Body>) -> tracing::Span;

fn make_span(request: &Request<axum::body::Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Build the `TraceLayer` for the policy API.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpan> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_constructs_without_panic() {
        let _layer = layer();
    }
}
