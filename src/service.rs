//! Board service for threadboard.
//!
//! Write flows that touch both content and attachments. Content is written
//! first; an attached image is stored afterwards on a best-effort basis. A
//! failed image write is logged and reported in the outcome, but the content
//! that was already written stays.

use tracing::{info, warn};

use crate::attachment::{AttachmentStore, OwnerKind};
use crate::config::UploadConfig;
use crate::content::{
    CommentRepository, NewComment, NewPost, PostRepository, ThreadRepository,
};
use crate::db::Database;
use crate::{BoardError, Result};

/// An uploaded file, read fully into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
    pub data: Vec<u8>,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
    /// Original filename, used to infer the content type.
    pub filename: Option<String>,
}

impl Upload {
    /// Create an upload from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Set the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the original filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Whether the upload carries no bytes. Empty uploads are ignored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of creating or editing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub post_id: i64,
    pub thread_id: i64,
    /// Id of the stored image, if one was stored.
    pub image_id: Option<i64>,
    /// Why the image could not be stored, if it failed.
    pub image_error: Option<String>,
}

/// Result of creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentOutcome {
    pub comment_id: i64,
    pub post_id: i64,
    pub image_id: Option<i64>,
    pub image_error: Option<String>,
}

/// Service for board write operations.
pub struct BoardService<'a> {
    db: &'a Database,
    uploads: &'a UploadConfig,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService.
    pub fn new(db: &'a Database, uploads: &'a UploadConfig) -> Self {
        Self { db, uploads }
    }

    /// Create a thread.
    pub async fn create_thread(&self, title: &str) -> Result<i64> {
        let id = ThreadRepository::new(self.db.pool()).create(title).await?;
        info!(thread_id = id, "Thread created");
        Ok(id)
    }

    /// Create a post, optionally with one image.
    pub async fn create_post(
        &self,
        thread_id: i64,
        author: &str,
        content: &str,
        image: Option<Upload>,
    ) -> Result<PostOutcome> {
        let image = non_empty(image);
        if let Some(upload) = &image {
            check_size(upload, self.uploads.max_post_image_bytes())?;
        }

        let post_id = PostRepository::new(self.db.pool())
            .create(&NewPost::new(thread_id, author, content))
            .await?;
        info!(post_id, thread_id, "Post created");

        let (image_id, image_error) = match image {
            Some(upload) => self.attach(OwnerKind::Post, post_id, &upload, false).await,
            None => (None, None),
        };

        Ok(PostOutcome {
            post_id,
            thread_id,
            image_id,
            image_error,
        })
    }

    /// Create a comment on a post, optionally with one image.
    pub async fn create_comment(
        &self,
        post_id: i64,
        author: &str,
        content: &str,
        image: Option<Upload>,
    ) -> Result<CommentOutcome> {
        let image = non_empty(image);
        if let Some(upload) = &image {
            check_size(upload, self.uploads.max_comment_image_bytes())?;
        }

        let comment_id = CommentRepository::new(self.db.pool())
            .create(&NewComment::new(post_id, author, content))
            .await?;
        info!(comment_id, post_id, "Comment created");

        let (image_id, image_error) = match image {
            Some(upload) => {
                self.attach(OwnerKind::Comment, comment_id, &upload, false)
                    .await
            }
            None => (None, None),
        };

        Ok(CommentOutcome {
            comment_id,
            post_id,
            image_id,
            image_error,
        })
    }

    /// Replace the text of a post and, if an image is given, its images.
    ///
    /// The image set is swapped in a single transaction, so the post never
    /// ends up with both or neither.
    pub async fn edit_post(
        &self,
        post_id: i64,
        content: &str,
        image: Option<Upload>,
    ) -> Result<PostOutcome> {
        let posts = PostRepository::new(self.db.pool());
        let post = posts.get_by_id(post_id).await?;

        let image = non_empty(image);
        if let Some(upload) = &image {
            check_size(upload, self.uploads.max_post_image_bytes())?;
        }

        posts.update_content(post_id, content).await?;
        info!(post_id, "Post edited");

        let (image_id, image_error) = match image {
            Some(upload) => self.attach(OwnerKind::Post, post_id, &upload, true).await,
            None => (None, None),
        };

        Ok(PostOutcome {
            post_id,
            thread_id: post.thread_id,
            image_id,
            image_error,
        })
    }

    /// Delete a post. Its comments and images are left in place.
    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        PostRepository::new(self.db.pool()).delete(post_id).await?;
        info!(post_id, "Post deleted");
        Ok(())
    }

    async fn attach(
        &self,
        owner: OwnerKind,
        owner_id: i64,
        upload: &Upload,
        replace: bool,
    ) -> (Option<i64>, Option<String>) {
        let store = AttachmentStore::new(self.db.pool());
        let declared = upload.content_type.as_deref();
        let filename = upload.filename.as_deref();

        let result = if replace {
            store
                .replace(owner, owner_id, &upload.data, declared, filename)
                .await
        } else {
            store
                .store(owner, owner_id, &upload.data, declared, filename)
                .await
        };

        match result {
            Ok(id) => (Some(id), None),
            Err(e) => {
                warn!(owner = %owner, owner_id, error = %e, "Failed to save image");
                (None, Some(e.to_string()))
            }
        }
    }
}

fn non_empty(image: Option<Upload>) -> Option<Upload> {
    image.filter(|upload| !upload.is_empty())
}

fn check_size(upload: &Upload, max_bytes: usize) -> Result<()> {
    if upload.data.len() > max_bytes {
        return Err(BoardError::Validation(format!(
            "image exceeds {} bytes",
            max_bytes
        )));
    }
    Ok(())
}
