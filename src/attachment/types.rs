//! Attachment models.

/// Which kind of entity owns an attachment.
///
/// Each kind has its own table and its own id sequence, so the same numeric
/// id can exist once per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    /// Attached to a post (`post_images`).
    Post,
    /// Attached to a comment (`comment_images`).
    Comment,
}

impl OwnerKind {
    /// Lookup order used when an id is given without a kind.
    pub const PROBE_ORDER: [OwnerKind; 2] = [OwnerKind::Post, OwnerKind::Comment];

    pub(crate) fn table(self) -> &'static str {
        match self {
            OwnerKind::Post => "post_images",
            OwnerKind::Comment => "comment_images",
        }
    }

    pub(crate) fn owner_column(self) -> &'static str {
        match self {
            OwnerKind::Post => "post_id",
            OwnerKind::Comment => "comment_id",
        }
    }

    /// Lowercase name, used in log fields and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerKind::Post => "post",
            OwnerKind::Comment => "comment",
        }
    }
}

impl std::fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attachment as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    /// Id within the owner kind's namespace.
    pub id: i64,
    /// Namespace the attachment was found in.
    pub owner: OwnerKind,
    /// Id of the owning post or comment.
    pub owner_id: i64,
    /// Raw bytes.
    pub data: Vec<u8>,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
}

impl StoredAttachment {
    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AttachmentRow {
    pub id: i64,
    pub owner_id: i64,
    pub data: Vec<u8>,
    pub mime: String,
}

impl AttachmentRow {
    pub(crate) fn into_stored(self, owner: OwnerKind) -> StoredAttachment {
        StoredAttachment {
            id: self.id,
            owner,
            owner_id: self.owner_id,
            data: self.data,
            content_type: self.mime,
        }
    }
}
