//! Post repository for threadboard.

use tracing::debug;

use super::types::{NewPost, Post};
use super::{validate_author, validate_content, RECENT_POSTS_LIMIT};
use crate::db::DbPool;
use crate::error::map_insert_error;
use crate::{BoardError, Result};

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post and return its ID.
    ///
    /// Fails with `NotFound` if the thread does not exist.
    pub async fn create(&self, new_post: &NewPost) -> Result<i64> {
        validate_author(&new_post.author)?;
        validate_content(&new_post.content)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (thread_id, author, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_post.thread_id)
        .bind(&new_post.author)
        .bind(&new_post.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_insert_error(e, &format!("thread {}", new_post.thread_id)))?;

        debug!(post_id = id, thread_id = new_post.thread_id, "post created");
        Ok(id)
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "SELECT id, thread_id, author, content, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| BoardError::NotFound(format!("post {id}")))
    }

    /// List the most recent posts across all threads, newest first.
    ///
    /// `limit` is clamped to `0..=RECENT_POSTS_LIMIT`; a non-positive limit
    /// yields no posts.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Post>> {
        let limit = limit.clamp(0, RECENT_POSTS_LIMIT);
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, thread_id, author, content, created_at
             FROM posts ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// List posts in a thread in reading order (oldest first).
    pub async fn list_by_thread(&self, thread_id: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, thread_id, author, content, created_at
             FROM posts WHERE thread_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(thread_id)
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// Replace the text of a post. Attachments are untouched.
    pub async fn update_content(&self, id: i64, content: &str) -> Result<()> {
        validate_content(content)?;

        let result = sqlx::query("UPDATE posts SET content = $1 WHERE id = $2")
            .bind(content)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BoardError::NotFound(format!("post {id}")));
        }
        Ok(())
    }

    /// Delete a post. Deleting a missing post succeeds.
    ///
    /// Comments and images of the post are not removed; foreign key
    /// enforcement is switched off on this connection for the one statement
    /// so they are left as orphans instead of blocking the delete.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *conn)
            .await?;
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await;
        let restored = sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *conn)
            .await;

        if let Err(e) = restored {
            // Never hand a connection without enforcement back to the pool
            drop(conn.detach());
            return Err(e.into());
        }

        let deleted = deleted?;
        debug!(post_id = id, rows = deleted.rows_affected(), "post deleted");
        Ok(())
    }
}
