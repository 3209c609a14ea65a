//! Request DTOs for the board pages and forms.

use serde::Deserialize;
use validator::Validate;

use super::multipart::MultipartFields;
use super::validation::{no_control_chars, not_empty_trimmed, parse_id};
use crate::service::Upload;
use crate::web::error::ApiError;

/// Query string of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Selected thread; absent or empty shows the feed.
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl BoardQuery {
    /// The selected thread id, if one was given.
    pub fn selected_thread(&self) -> Result<Option<i64>, ApiError> {
        match self.thread_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_id("thread_id", Some(raw)).map(Some),
        }
    }
}

/// Query string of `GET /comments/new`.
#[derive(Debug, Default, Deserialize)]
pub struct CommentFormQuery {
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
}

/// Body of `POST /threads`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateThreadForm {
    #[validate(
        length(max = 200, message = "Must be at most 200 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub title: String,
}

/// Multipart body of `POST /posts`.
#[derive(Debug, Validate)]
pub struct CreatePostForm {
    pub thread_id: i64,
    #[validate(
        length(max = 64, message = "Must be at most 64 characters"),
        custom(function = "no_control_chars")
    )]
    pub author: String,
    #[validate(
        length(max = 10000, message = "Must be at most 10000 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub content: String,
    pub image: Option<Upload>,
}

impl CreatePostForm {
    /// Build and validate the form from multipart fields.
    pub fn from_fields(mut fields: MultipartFields) -> Result<Self, ApiError> {
        let form = Self {
            thread_id: parse_id("thread_id", fields.get("thread_id"))?,
            author: fields.text("author"),
            content: fields.text("content"),
            image: fields.take_image(),
        };
        form.validate().map_err(ApiError::from_validation_errors)?;
        Ok(form)
    }
}

/// Multipart body of `POST /posts/:id/edit`.
#[derive(Debug, Validate)]
pub struct EditPostForm {
    #[validate(
        length(max = 10000, message = "Must be at most 10000 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub content: String,
    pub image: Option<Upload>,
}

impl EditPostForm {
    /// Build and validate the form from multipart fields.
    pub fn from_fields(mut fields: MultipartFields) -> Result<Self, ApiError> {
        let form = Self {
            content: fields.text("content"),
            image: fields.take_image(),
        };
        form.validate().map_err(ApiError::from_validation_errors)?;
        Ok(form)
    }
}

/// Multipart body of `POST /comments`.
#[derive(Debug, Validate)]
pub struct CreateCommentForm {
    /// Thread to return to after posting.
    pub thread_id: i64,
    pub post_id: i64,
    #[validate(
        length(max = 64, message = "Must be at most 64 characters"),
        custom(function = "no_control_chars")
    )]
    pub author: String,
    #[validate(
        length(max = 10000, message = "Must be at most 10000 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub content: String,
    pub image: Option<Upload>,
    /// Return to the thread view instead of the feed.
    pub redirect_thread: bool,
}

impl CreateCommentForm {
    /// Build and validate the form from multipart fields.
    pub fn from_fields(mut fields: MultipartFields) -> Result<Self, ApiError> {
        let form = Self {
            thread_id: parse_id("thread_id", fields.get("thread_id"))?,
            post_id: parse_id("post_id", fields.get("post_id"))?,
            author: fields.text("author"),
            content: fields.text("content"),
            image: fields.take_image(),
            redirect_thread: fields
                .get("redirect_thread")
                .is_some_and(|v| !v.is_empty()),
        };
        form.validate().map_err(ApiError::from_validation_errors)?;
        Ok(form)
    }

    /// Where the browser goes after the comment is saved.
    pub fn redirect_target(&self) -> String {
        if self.redirect_thread {
            format!("/?thread_id={}", self.thread_id)
        } else {
            "/".to_string()
        }
    }
}
