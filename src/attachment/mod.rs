//! Attachment storage for threadboard.
//!
//! Images live in the database next to the content they belong to, one
//! table per owner kind:
//! - `post_images` for images attached to posts
//! - `comment_images` for images attached to comments
//!
//! The two tables number their rows independently. A bare id (as served by
//! `GET /images/:id`) is resolved post namespace first.

mod store;
mod types;

pub use store::AttachmentStore;
pub use types::{OwnerKind, StoredAttachment};

/// Content type used when neither the upload nor its filename says otherwise.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Pick the content type for an upload.
///
/// A declared type wins when it is non-blank. Otherwise the filename
/// extension is consulted, and anything unrecognised falls back to
/// [`DEFAULT_CONTENT_TYPE`].
pub fn infer_content_type(declared: Option<&str>, filename: Option<&str>) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|d| !d.is_empty()) {
        return declared.to_string();
    }

    filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| mime_guess::from_path(name).first_raw())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_wins() {
        assert_eq!(
            infer_content_type(Some("image/gif"), Some("photo.jpg")),
            "image/gif"
        );
        assert_eq!(infer_content_type(Some(" image/png "), None), "image/png");
    }

    #[test]
    fn test_blank_declared_type_is_ignored() {
        assert_eq!(infer_content_type(Some("  "), Some("a.png")), "image/png");
    }

    #[test]
    fn test_inferred_from_extension() {
        assert_eq!(infer_content_type(None, Some("photo.jpg")), "image/jpeg");
        assert_eq!(infer_content_type(None, Some("PHOTO.JPEG")), "image/jpeg");
        assert_eq!(infer_content_type(None, Some("diagram.png")), "image/png");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(infer_content_type(None, Some("blob.bin")), DEFAULT_CONTENT_TYPE);
        assert_eq!(infer_content_type(None, Some("README")), DEFAULT_CONTENT_TYPE);
        assert_eq!(infer_content_type(None, Some("")), DEFAULT_CONTENT_TYPE);
        assert_eq!(infer_content_type(None, None), DEFAULT_CONTENT_TYPE);
    }
}
