//! Web module for threadboard.
//!
//! Serves the board over HTTP: JSON page models for the feed, thread pages
//! and the reply form, form and multipart endpoints for writes (answered with
//! `303 See Other` redirects), and raw image bytes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
