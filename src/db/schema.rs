//! Database schema and migrations for threadboard.
//!
//! Migrations are applied in order; the `schema_version` table records how
//! many have run.
//!
//! Child foreign keys deliberately have no `ON DELETE` action: deleting a
//! post leaves its comments and images behind as orphans.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: threads, posts and comments
    r#"
CREATE TABLE threads (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL CHECK (length(trim(title)) > 0),
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX idx_threads_created_at ON threads(created_at);

CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    thread_id   INTEGER NOT NULL REFERENCES threads(id),
    author      TEXT NOT NULL,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX idx_posts_thread_id ON posts(thread_id, created_at);
CREATE INDEX idx_posts_created_at ON posts(created_at);

CREATE TABLE comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(id),
    author      TEXT NOT NULL,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX idx_comments_post_id ON comments(post_id, created_at);
"#,
    // v2: image attachments, one table per owner kind
    r#"
CREATE TABLE post_images (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(id),
    data        BLOB NOT NULL,
    mime        TEXT NOT NULL
);

CREATE INDEX idx_post_images_post_id ON post_images(post_id);

CREATE TABLE comment_images (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    comment_id  INTEGER NOT NULL REFERENCES comments(id),
    data        BLOB NOT NULL,
    mime        TEXT NOT NULL
);

CREATE INDEX idx_comment_images_comment_id ON comment_images(comment_id);
"#,
];
