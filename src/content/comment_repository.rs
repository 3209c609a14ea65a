//! Comment repository for threadboard.

use tracing::debug;

use super::types::{Comment, NewComment};
use super::{validate_author, validate_content};
use crate::db::DbPool;
use crate::error::map_insert_error;
use crate::Result;

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a comment on a post and return its ID.
    ///
    /// Fails with `NotFound` if the post does not exist.
    pub async fn create(&self, new_comment: &NewComment) -> Result<i64> {
        validate_author(&new_comment.author)?;
        validate_content(&new_comment.content)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, author, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_comment.post_id)
        .bind(&new_comment.author)
        .bind(&new_comment.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_insert_error(e, &format!("post {}", new_comment.post_id)))?;

        debug!(comment_id = id, post_id = new_comment.post_id, "comment created");
        Ok(id)
    }

    /// List the comments on a post, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author, content, created_at
             FROM comments WHERE post_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{NewPost, PostRepository, ThreadRepository, ANONYMOUS_AUTHOR};
    use crate::{BoardError, Database};

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let thread_id = ThreadRepository::new(db.pool())
            .create("General")
            .await
            .unwrap();
        let post_id = PostRepository::new(db.pool())
            .create(&NewPost::new(thread_id, "alice", "first"))
            .await
            .unwrap();
        (db, post_id)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (db, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let first = repo
            .create(&NewComment::new(post_id, "bob", "reply one"))
            .await
            .unwrap();
        let second = repo
            .create(&NewComment::new(post_id, "", "reply two"))
            .await
            .unwrap();

        let comments = repo.list_by_post(post_id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, first);
        assert_eq!(comments[1].id, second);
        assert_eq!(comments[1].author, ANONYMOUS_AUTHOR);
    }

    #[tokio::test]
    async fn test_list_oldest_first() {
        let (db, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let early = repo
            .create(&NewComment::new(post_id, "a", "written second"))
            .await
            .unwrap();
        let late = repo
            .create(&NewComment::new(post_id, "a", "written first"))
            .await
            .unwrap();
        sqlx::query("UPDATE comments SET created_at = $1 WHERE id = $2")
            .bind("2024-06-02T00:00:00.000Z")
            .bind(early)
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("UPDATE comments SET created_at = $1 WHERE id = $2")
            .bind("2024-06-01T00:00:00.000Z")
            .bind(late)
            .execute(db.pool())
            .await
            .unwrap();

        let ids: Vec<_> = repo
            .list_by_post(post_id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![late, early]);
    }

    #[tokio::test]
    async fn test_create_on_missing_post() {
        let (db, _) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let result = repo.create(&NewComment::new(404, "bob", "hi")).await;
        assert!(matches!(result, Err(BoardError::NotFound(msg)) if msg.contains("post")));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (db, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        assert!(repo.list_by_post(post_id).await.unwrap().is_empty());
        assert!(repo.list_by_post(12345).await.unwrap().is_empty());
    }
}
