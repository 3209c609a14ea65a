//! Thread, post and comment models for threadboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display name stored when a poster leaves the author field blank.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Top-level discussion topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Thread {
    /// Unique thread ID.
    pub id: i64,
    /// Thread title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A message within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the owning thread.
    pub thread_id: i64,
    /// Free-text display name of the poster.
    pub author: String,
    /// Post body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// ID of the post this comment replies to.
    pub post_id: i64,
    /// Free-text display name of the commenter.
    pub author: String,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// ID of the thread to post in.
    pub thread_id: i64,
    /// Display name of the poster.
    pub author: String,
    /// Post body.
    pub content: String,
}

impl NewPost {
    /// Create a new post. A blank author becomes [`ANONYMOUS_AUTHOR`].
    pub fn new(thread_id: i64, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            thread_id,
            author: normalize_author(author.into()),
            content: content.into(),
        }
    }
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// ID of the post being replied to.
    pub post_id: i64,
    /// Display name of the commenter.
    pub author: String,
    /// Comment body.
    pub content: String,
}

impl NewComment {
    /// Create a new comment. A blank author becomes [`ANONYMOUS_AUTHOR`].
    pub fn new(post_id: i64, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            post_id,
            author: normalize_author(author.into()),
            content: content.into(),
        }
    }
}

fn normalize_author(author: String) -> String {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        ANONYMOUS_AUTHOR.to_string()
    } else if trimmed.len() == author.len() {
        author
    } else {
        trimmed.to_string()
    }
}
