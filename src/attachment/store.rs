//! Attachment store backed by the `post_images` and `comment_images` tables.

use tracing::debug;

use super::infer_content_type;
use super::types::{AttachmentRow, OwnerKind, StoredAttachment};
use crate::db::DbPool;
use crate::error::map_insert_error;
use crate::{BoardError, Result};

/// Store for image attachments of posts and comments.
pub struct AttachmentStore<'a> {
    pool: &'a DbPool,
}

impl<'a> AttachmentStore<'a> {
    /// Create a new AttachmentStore with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Store an attachment for an owner and return its id.
    ///
    /// The content type is resolved with [`infer_content_type`]. Fails with
    /// `NotFound` if the owning post or comment does not exist.
    pub async fn store(
        &self,
        owner: OwnerKind,
        owner_id: i64,
        data: &[u8],
        declared_content_type: Option<&str>,
        filename_hint: Option<&str>,
    ) -> Result<i64> {
        let content_type = infer_content_type(declared_content_type, filename_hint);
        let sql = insert_sql(owner);

        let id: i64 = sqlx::query_scalar(&sql)
            .bind(owner_id)
            .bind(data)
            .bind(&content_type)
            .fetch_one(self.pool)
            .await
            .map_err(|e| map_insert_error(e, &format!("{owner} {owner_id}")))?;

        debug!(
            attachment_id = id,
            owner = %owner,
            owner_id,
            size = data.len(),
            content_type = %content_type,
            "attachment stored"
        );
        Ok(id)
    }

    /// List the attachment ids of an owner in ascending order.
    pub async fn list_ids(&self, owner: OwnerKind, owner_id: i64) -> Result<Vec<i64>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = $1 ORDER BY id ASC",
            owner.table(),
            owner.owner_column()
        );
        let ids = sqlx::query_scalar(&sql)
            .bind(owner_id)
            .fetch_all(self.pool)
            .await?;
        Ok(ids)
    }

    /// Fetch an attachment by bare id.
    ///
    /// Post images are checked first; comment images are only consulted when
    /// the post namespace has no such row. Any other failure is returned
    /// as is.
    pub async fn fetch(&self, id: i64) -> Result<StoredAttachment> {
        for owner in OwnerKind::PROBE_ORDER {
            if let Some(found) = self.find(owner, id).await? {
                return Ok(found);
            }
        }
        Err(BoardError::NotFound(format!("image {id}")))
    }

    /// Fetch an attachment from one namespace only.
    pub async fn fetch_from(&self, owner: OwnerKind, id: i64) -> Result<StoredAttachment> {
        self.find(owner, id)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("{owner} image {id}")))
    }

    /// Delete every attachment of an owner and return how many were removed.
    pub async fn delete_all(&self, owner: OwnerKind, owner_id: i64) -> Result<u64> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            owner.table(),
            owner.owner_column()
        );
        let result = sqlx::query(&sql).bind(owner_id).execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Replace all attachments of an owner with a single new one.
    ///
    /// Runs in one transaction: either the old set is gone and the new
    /// attachment exists, or nothing changed.
    pub async fn replace(
        &self,
        owner: OwnerKind,
        owner_id: i64,
        data: &[u8],
        declared_content_type: Option<&str>,
        filename_hint: Option<&str>,
    ) -> Result<i64> {
        let content_type = infer_content_type(declared_content_type, filename_hint);
        let delete_sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            owner.table(),
            owner.owner_column()
        );
        let insert_sql = insert_sql(owner);

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(&delete_sql)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let id: i64 = sqlx::query_scalar(&insert_sql)
            .bind(owner_id)
            .bind(data)
            .bind(&content_type)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, &format!("{owner} {owner_id}")))?;

        tx.commit().await?;

        debug!(
            attachment_id = id,
            owner = %owner,
            owner_id,
            removed,
            "attachments replaced"
        );
        Ok(id)
    }

    async fn find(&self, owner: OwnerKind, id: i64) -> Result<Option<StoredAttachment>> {
        let sql = format!(
            "SELECT id, {} AS owner_id, data, mime FROM {} WHERE id = $1",
            owner.owner_column(),
            owner.table()
        );
        let row = sqlx::query_as::<_, AttachmentRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(|r| r.into_stored(owner)))
    }
}

fn insert_sql(owner: OwnerKind) -> String {
    format!(
        "INSERT INTO {} ({}, data, mime) VALUES ($1, $2, $3) RETURNING id",
        owner.table(),
        owner.owner_column()
    )
}
