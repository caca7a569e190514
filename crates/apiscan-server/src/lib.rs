//! HTTP front end for the apiscan analyzer.
//!
//! Serves single-snippet analysis plus health and usage endpoints under
//! `/api/v1`.

pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone, Default)]
pub struct AppState {
    /// Successful analyses since startup.
    pub analyses: Arc<AtomicU64>,
}

/// Build the application router.
///
/// Any origin is allowed; credentials are never exposed.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_LENGTH]);

    let api = Router::new()
        .route("/analyze", post(handlers::analyze_code))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats));

    Router::new()
        .nest("/api/v1", api)
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
