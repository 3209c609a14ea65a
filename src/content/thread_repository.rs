//! Thread repository for threadboard.

use tracing::debug;

use super::types::Thread;
use super::validate_title;
use crate::db::DbPool;
use crate::{BoardError, Result};

/// Repository for thread operations.
pub struct ThreadRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ThreadRepository<'a> {
    /// Create a new ThreadRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new thread and return its ID.
    ///
    /// An empty title is rejected here even if the caller already checked it.
    pub async fn create(&self, title: &str) -> Result<i64> {
        validate_title(title)?;

        let id: i64 = sqlx::query_scalar("INSERT INTO threads (title) VALUES ($1) RETURNING id")
            .bind(title.trim())
            .fetch_one(self.pool)
            .await?;

        debug!(thread_id = id, "thread created");
        Ok(id)
    }

    /// List every thread, newest first.
    pub async fn list(&self) -> Result<Vec<Thread>> {
        let threads = sqlx::query_as::<_, Thread>(
            "SELECT id, title, created_at FROM threads ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(threads)
    }

    /// Get a thread by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Thread> {
        sqlx::query_as::<_, Thread>("SELECT id, title, created_at FROM threads WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("thread {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn set_created_at(db: &Database, id: i64, ts: &str) {
        sqlx::query("UPDATE threads SET created_at = $1 WHERE id = $2")
            .bind(ts)
            .bind(id)
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_thread() {
        let db = setup_db().await;
        let repo = ThreadRepository::new(db.pool());

        let id = repo.create("Test Thread").await.unwrap();
        let thread = repo.get_by_id(id).await.unwrap();

        assert_eq!(thread.id, id);
        assert_eq!(thread.title, "Test Thread");
    }

    #[tokio::test]
    async fn test_create_empty_title() {
        let db = setup_db().await;
        let repo = ThreadRepository::new(db.pool());

        assert!(matches!(repo.create("").await, Err(BoardError::Validation(_))));
        assert!(matches!(repo.create("   ").await, Err(BoardError::Validation(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = setup_db().await;
        let repo = ThreadRepository::new(db.pool());

        let result = repo.get_by_id(999).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = setup_db().await;
        let repo = ThreadRepository::new(db.pool());

        let a = repo.create("A").await.unwrap();
        let b = repo.create("B").await.unwrap();
        let c = repo.create("C").await.unwrap();
        set_created_at(&db, a, "2024-03-01T10:00:00.000Z").await;
        set_created_at(&db, b, "2024-01-01T10:00:00.000Z").await;
        set_created_at(&db, c, "2024-02-01T10:00:00.000Z").await;

        let threads = repo.list().await.unwrap();
        let titles: Vec<_> = threads.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C", "B"]);
        assert!(threads
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_list_ties_broken_by_id() {
        let db = setup_db().await;
        let repo = ThreadRepository::new(db.pool());

        let first = repo.create("first").await.unwrap();
        let second = repo.create("second").await.unwrap();
        set_created_at(&db, first, "2024-01-01T00:00:00.000Z").await;
        set_created_at(&db, second, "2024-01-01T00:00:00.000Z").await;

        let threads = repo.list().await.unwrap();
        assert_eq!(threads[0].id, second);
        assert_eq!(threads[1].id, first);
    }
}
