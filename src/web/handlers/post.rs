//! Post handlers.

use axum::{
    extract::{Multipart, Path, State},
    response::Redirect,
};
use std::sync::Arc;

use crate::web::dto::{CreatePostForm, EditPostForm, MultipartFields};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /posts - Create a post, optionally with an image.
///
/// Redirects to the thread page. A failed image upload does not fail the
/// request; the post stays.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let form = CreatePostForm::from_fields(MultipartFields::read(multipart).await?)?;

    let outcome = state
        .service()
        .create_post(form.thread_id, &form.author, &form.content, form.image)
        .await?;

    Ok(Redirect::to(&format!("/thread/{}", outcome.thread_id)))
}

/// POST /posts/:id/edit - Change the text of a post and optionally its image.
pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let form = EditPostForm::from_fields(MultipartFields::read(multipart).await?)?;

    let outcome = state
        .service()
        .edit_post(post_id, &form.content, form.image)
        .await?;

    Ok(Redirect::to(&format!("/thread/{}", outcome.thread_id)))
}

/// POST /posts/:id/delete - Delete a post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Redirect, ApiError> {
    state.service().delete_post(post_id).await?;
    Ok(Redirect::to("/"))
}
