//! threadboard - a threaded discussion board backend.
//!
//! Threads hold posts, posts hold comments, and posts and comments can each
//! carry an image stored alongside them in SQLite. Pages are assembled into
//! nested views and served as JSON over HTTP.

pub mod attachment;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod logging;
pub mod service;
pub mod view;
pub mod web;

pub use attachment::{infer_content_type, AttachmentStore, OwnerKind, StoredAttachment};
pub use config::Config;
pub use content::{
    Comment, CommentRepository, NewComment, NewPost, Post, PostRepository, Thread,
    ThreadRepository,
};
pub use db::Database;
pub use error::{BoardError, Result};
pub use service::{BoardService, CommentOutcome, PostOutcome, Upload};
pub use view::{BoardPage, CommentFormContext, CommentView, PostView, ViewAssembler};
