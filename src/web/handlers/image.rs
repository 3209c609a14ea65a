//! Image serving handler.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::attachment::AttachmentStore;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::BoardError;

/// GET /images/:id - Raw image bytes.
///
/// The id is looked up among post images first, then comment images. An
/// unknown id is a 404 with an empty body.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<i64>,
) -> Result<Response, ApiError> {
    let attachment = match AttachmentStore::new(state.db.pool()).fetch(image_id).await {
        Ok(attachment) => attachment,
        Err(BoardError::NotFound(_)) => return Ok(StatusCode::NOT_FOUND.into_response()),
        Err(e) => return Err(e.into()),
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, attachment.content_type.as_str())
        .header(header::CONTENT_LENGTH, attachment.len())
        .body(Body::from(attachment.data))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}
