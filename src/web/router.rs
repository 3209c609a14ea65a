//! Router configuration for the board.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    board_page, comment_form, create_comment, create_post, create_thread, delete_post, edit_post,
    get_image, thread_page, AppState,
};

/// Room left in a request body for the text fields next to an image.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the board router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state
        .uploads
        .max_post_image_bytes()
        .saturating_add(FORM_OVERHEAD_BYTES);

    let board_routes = Router::new()
        .route("/", get(board_page))
        .route("/thread/:id", get(thread_page))
        .route("/threads", post(create_thread))
        .route("/posts", post(create_post))
        .route("/posts/:id/edit", post(edit_post))
        .route("/posts/:id/delete", post(delete_post))
        .route("/comments/new", get(comment_form))
        .route("/comments", post(create_comment))
        .route("/images/:id", get(get_image));

    board_routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
