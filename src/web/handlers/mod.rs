//! HTTP handlers for the board.

pub mod board;
pub mod comment;
pub mod image;
pub mod post;

pub use board::*;
pub use comment::*;
pub use image::*;
pub use post::*;

use crate::config::UploadConfig;
use crate::db::Database;
use crate::service::BoardService;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// Upload size ceilings.
    pub uploads: UploadConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, uploads: UploadConfig) -> Self {
        Self { db, uploads }
    }

    /// Board service bound to this state.
    pub fn service(&self) -> BoardService<'_> {
        BoardService::new(&self.db, &self.uploads)
    }
}
