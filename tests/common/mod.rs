//! Test helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;

use threadboard::config::UploadConfig;
use threadboard::content::{NewComment, NewPost};
use threadboard::web::{create_router, AppState};
use threadboard::{CommentRepository, Database, PostRepository, ThreadRepository};

/// Create a test server with an in-memory database and default upload limits.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(UploadConfig::default()).await
}

/// Create a test server with custom upload limits.
pub async fn create_test_server_with(uploads: UploadConfig) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::new(db.clone(), uploads));
    let router = create_router(app_state);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Create a thread directly in the database.
pub async fn seed_thread(db: &Database, title: &str) -> i64 {
    ThreadRepository::new(db.pool())
        .create(title)
        .await
        .expect("Failed to create thread")
}

/// Create a post directly in the database.
pub async fn seed_post(db: &Database, thread_id: i64, content: &str) -> i64 {
    PostRepository::new(db.pool())
        .create(&NewPost::new(thread_id, "tester", content))
        .await
        .expect("Failed to create post")
}

/// Create a comment directly in the database.
pub async fn seed_comment(db: &Database, post_id: i64, content: &str) -> i64 {
    CommentRepository::new(db.pool())
        .create(&NewComment::new(post_id, "tester", content))
        .await
        .expect("Failed to create comment")
}

/// Location header of a redirect response.
pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("Location is not ASCII")
        .to_string()
}
