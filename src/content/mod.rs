//! Content repository for threadboard.
//!
//! Threads, posts and comments, with the ordering rules the board pages
//! depend on:
//! - threads newest first
//! - posts within a thread oldest first
//! - the recent-activity feed newest first, capped at [`RECENT_POSTS_LIMIT`]
//! - comments within a post oldest first
//!
//! Repositories borrow the pool; they hold no state of their own.

mod comment_repository;
mod post_repository;
mod thread_repository;
mod types;

pub use comment_repository::CommentRepository;
pub use post_repository::PostRepository;
pub use thread_repository::ThreadRepository;
pub use types::{Comment, NewComment, NewPost, Post, Thread, ANONYMOUS_AUTHOR};

use crate::{BoardError, Result};

/// Maximum number of posts in the recent-activity feed.
pub const RECENT_POSTS_LIMIT: i64 = 20;

/// Maximum length for thread titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for post and comment bodies (in characters).
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Maximum length for author display names (in characters).
pub const MAX_AUTHOR_LENGTH: usize = 64;

/// Validate a thread title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BoardError::Validation("thread title is empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BoardError::Validation(format!(
            "thread title exceeds {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a post or comment body.
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(BoardError::Validation("content is empty".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(BoardError::Validation(format!(
            "content exceeds {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an author display name (already normalized, never empty).
pub fn validate_author(author: &str) -> Result<()> {
    if author.chars().count() > MAX_AUTHOR_LENGTH {
        return Err(BoardError::Validation(format!(
            "author name exceeds {MAX_AUTHOR_LENGTH} characters"
        )));
    }
    Ok(())
}
