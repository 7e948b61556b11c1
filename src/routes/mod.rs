//! Router assembly.

mod api;
mod common;
pub use api::api_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::http::Uri;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: health/readiness plus the API, with request tracing.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state, max_body_bytes))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
