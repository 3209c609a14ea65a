//! Board page and thread handlers.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use std::sync::Arc;

use crate::view::{BoardPage, CommentFormContext, ViewAssembler};
use crate::web::dto::validation::parse_id;
use crate::web::dto::{BoardQuery, CommentFormQuery, CreateThreadForm, ValidatedForm};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET / - Recent-activity feed, or a thread with `?thread_id=N`.
pub async fn board_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardPage>, ApiError> {
    let assembler = ViewAssembler::new(state.db.pool());

    let page = match query.selected_thread()? {
        Some(thread_id) => assembler.assemble_thread(thread_id).await?,
        None => assembler.assemble_feed().await?,
    };

    Ok(Json(page))
}

/// GET /thread/:id - Thread page.
pub async fn thread_page(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<i64>,
) -> Result<Json<BoardPage>, ApiError> {
    let page = ViewAssembler::new(state.db.pool())
        .assemble_thread(thread_id)
        .await?;
    Ok(Json(page))
}

/// POST /threads - Create a thread.
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    ValidatedForm(form): ValidatedForm<CreateThreadForm>,
) -> Result<Redirect, ApiError> {
    state.service().create_thread(&form.title).await?;
    Ok(Redirect::to("/"))
}

/// GET /comments/new - Context for the reply form.
pub async fn comment_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CommentFormQuery>,
) -> Result<Json<CommentFormContext>, ApiError> {
    let thread_id = parse_id("thread_id", query.thread_id.as_deref())?;
    let post_id = parse_id("post_id", query.post_id.as_deref())?;

    let context = ViewAssembler::new(state.db.pool())
        .comment_form(thread_id, post_id)
        .await?;
    Ok(Json(context))
}
