//! Comment handlers.

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use std::sync::Arc;

use crate::web::dto::{CreateCommentForm, MultipartFields};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /comments - Reply to a post, optionally with an image.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let form = CreateCommentForm::from_fields(MultipartFields::read(multipart).await?)?;
    let target = form.redirect_target();

    state
        .service()
        .create_comment(form.post_id, &form.author, &form.content, form.image)
        .await?;

    Ok(Redirect::to(&target))
}
