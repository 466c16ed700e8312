pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser form
        .route(
            "/",
            get(analyze::handle_index).post(analyze::handle_submit),
        )
        // Same pipeline, JSON in the response
        .route("/api/v1/analyze", post(analyze::handle_api_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        // A panicking request becomes a 500; the server keeps serving.
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
