//! Page assembly for threadboard.
//!
//! Turns flat rows into the nested post/comment/image tree a board page is
//! rendered from. For every post the lookups run in a fixed order:
//!
//! 1. image ids of the post
//! 2. comments of the post
//! 3. image ids of each comment
//!
//! Pages are bounded (the feed holds at most [`RECENT_POSTS_LIMIT`] posts and
//! threads are small), so this is done with one query per post and per
//! comment. Any failed lookup fails the whole page.

use serde::Serialize;

use crate::attachment::{AttachmentStore, OwnerKind};
use crate::content::{
    Comment, CommentRepository, Post, PostRepository, Thread, ThreadRepository,
    RECENT_POSTS_LIMIT,
};
use crate::db::DbPool;
use crate::Result;

/// A post with its image ids and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub image_ids: Vec<i64>,
    pub comments: Vec<CommentView>,
}

/// A comment with its image ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub image_ids: Vec<i64>,
}

/// Everything a board page shows.
///
/// `threads` is always the full thread list for navigation, whichever mode
/// the page is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardPage {
    pub posts: Vec<PostView>,
    pub threads: Vec<Thread>,
    /// The selected thread in thread mode, `None` on the feed.
    pub current_thread: Option<Thread>,
}

impl BoardPage {
    /// Whether this page shows the recent-activity feed.
    pub fn is_feed(&self) -> bool {
        self.current_thread.is_none()
    }
}

/// Context for the "reply to a post" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentFormContext {
    pub thread_id: i64,
    pub post_id: i64,
    pub threads: Vec<Thread>,
}

/// Builds board pages from the content repositories and attachment store.
pub struct ViewAssembler<'a> {
    pool: &'a DbPool,
}

impl<'a> ViewAssembler<'a> {
    /// Create a new ViewAssembler with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Assemble the recent-activity feed.
    pub async fn assemble_feed(&self) -> Result<BoardPage> {
        let posts = PostRepository::new(self.pool)
            .list_recent(RECENT_POSTS_LIMIT)
            .await?;
        let posts = self.expand_posts(posts).await?;
        let threads = ThreadRepository::new(self.pool).list().await?;

        Ok(BoardPage {
            posts,
            threads,
            current_thread: None,
        })
    }

    /// Assemble the page of a single thread.
    ///
    /// Fails with `NotFound` if the thread does not exist.
    pub async fn assemble_thread(&self, thread_id: i64) -> Result<BoardPage> {
        let thread_repo = ThreadRepository::new(self.pool);
        let thread = thread_repo.get_by_id(thread_id).await?;

        let posts = PostRepository::new(self.pool)
            .list_by_thread(thread_id)
            .await?;
        let posts = self.expand_posts(posts).await?;
        let threads = thread_repo.list().await?;

        Ok(BoardPage {
            posts,
            threads,
            current_thread: Some(thread),
        })
    }

    /// Build the context for replying to a post.
    ///
    /// Fails with `NotFound` if the post does not exist.
    pub async fn comment_form(&self, thread_id: i64, post_id: i64) -> Result<CommentFormContext> {
        PostRepository::new(self.pool).get_by_id(post_id).await?;
        let threads = ThreadRepository::new(self.pool).list().await?;

        Ok(CommentFormContext {
            thread_id,
            post_id,
            threads,
        })
    }

    async fn expand_posts(&self, posts: Vec<Post>) -> Result<Vec<PostView>> {
        let attachments = AttachmentStore::new(self.pool);
        let comment_repo = CommentRepository::new(self.pool);

        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            let image_ids = attachments.list_ids(OwnerKind::Post, post.id).await?;

            let comments = comment_repo.list_by_post(post.id).await?;
            let mut comment_views = Vec::with_capacity(comments.len());
            for comment in comments {
                let image_ids = attachments
                    .list_ids(OwnerKind::Comment, comment.id)
                    .await?;
                comment_views.push(CommentView { comment, image_ids });
            }

            views.push(PostView {
                post,
                image_ids,
                comments: comment_views,
            });
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{NewComment, NewPost};
    use crate::{BoardError, Database};

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_thread_with_plain_post() {
        let db = setup_db().await;
        let thread_id = ThreadRepository::new(db.pool()).create("T").await.unwrap();
        PostRepository::new(db.pool())
            .create(&NewPost::new(thread_id, "alice", "hello"))
            .await
            .unwrap();

        let page = ViewAssembler::new(db.pool())
            .assemble_thread(thread_id)
            .await
            .unwrap();

        assert!(!page.is_feed());
        assert_eq!(page.current_thread.as_ref().unwrap().title, "T");
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].post.content, "hello");
        assert!(page.posts[0].image_ids.is_empty());
        assert!(page.posts[0].comments.is_empty());
    }

    #[tokio::test]
    async fn test_thread_with_commented_image() {
        let db = setup_db().await;
        let thread_id = ThreadRepository::new(db.pool()).create("T").await.unwrap();
        let post_id = PostRepository::new(db.pool())
            .create(&NewPost::new(thread_id, "alice", "hello"))
            .await
            .unwrap();
        let comment_id = CommentRepository::new(db.pool())
            .create(&NewComment::new(post_id, "bob", "reply"))
            .await
            .unwrap();
        let attachments = AttachmentStore::new(db.pool());
        let post_image = attachments
            .store(OwnerKind::Post, post_id, &[0u8; 37], Some("image/png"), None)
            .await
            .unwrap();
        let comment_image = attachments
            .store(OwnerKind::Comment, comment_id, b"gif", Some("image/gif"), None)
            .await
            .unwrap();

        let page = ViewAssembler::new(db.pool())
            .assemble_thread(thread_id)
            .await
            .unwrap();

        let post = &page.posts[0];
        assert_eq!(post.image_ids, vec![post_image]);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].comment.id, comment_id);
        assert_eq!(post.comments[0].image_ids, vec![comment_image]);
    }

    #[tokio::test]
    async fn test_thread_not_found() {
        let db = setup_db().await;

        let result = ViewAssembler::new(db.pool()).assemble_thread(77).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_feed_spans_threads_and_is_capped() {
        let db = setup_db().await;
        let threads = ThreadRepository::new(db.pool());
        let posts = PostRepository::new(db.pool());
        let a = threads.create("A").await.unwrap();
        let b = threads.create("B").await.unwrap();
        for i in 0..23 {
            let thread_id = if i % 3 == 0 { a } else { b };
            posts
                .create(&NewPost::new(thread_id, "", format!("post {i}")))
                .await
                .unwrap();
        }

        let page = ViewAssembler::new(db.pool()).assemble_feed().await.unwrap();

        assert!(page.is_feed());
        assert_eq!(page.posts.len(), 20);
        assert_eq!(page.threads.len(), 2);
        assert!(page.posts.iter().any(|p| p.post.thread_id == a));
        assert!(page.posts.iter().any(|p| p.post.thread_id == b));
    }

    #[tokio::test]
    async fn test_threads_listed_in_thread_mode() {
        let db = setup_db().await;
        let threads = ThreadRepository::new(db.pool());
        let first = threads.create("first").await.unwrap();
        threads.create("second").await.unwrap();

        let page = ViewAssembler::new(db.pool())
            .assemble_thread(first)
            .await
            .unwrap();
        assert_eq!(page.threads.len(), 2);
        assert!(page.posts.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_page() {
        let db = setup_db().await;
        let thread_id = ThreadRepository::new(db.pool()).create("T").await.unwrap();
        let post_id = PostRepository::new(db.pool())
            .create(&NewPost::new(thread_id, "alice", "hello"))
            .await
            .unwrap();
        sqlx::query("DROP TABLE comment_images")
            .execute(db.pool())
            .await
            .unwrap();
        CommentRepository::new(db.pool())
            .create(&NewComment::new(post_id, "bob", "reply"))
            .await
            .unwrap();

        let result = ViewAssembler::new(db.pool())
            .assemble_thread(thread_id)
            .await;
        assert!(matches!(result, Err(BoardError::Storage(_))));
    }

    #[tokio::test]
    async fn test_post_view_serializes_flat() {
        let db = setup_db().await;
        let thread_id = ThreadRepository::new(db.pool()).create("T").await.unwrap();
        PostRepository::new(db.pool())
            .create(&NewPost::new(thread_id, "alice", "hello"))
            .await
            .unwrap();

        let page = ViewAssembler::new(db.pool()).assemble_feed().await.unwrap();
        let json = serde_json::to_value(&page).unwrap();

        let post = &json["posts"][0];
        assert_eq!(post["content"], "hello");
        assert_eq!(post["author"], "alice");
        assert_eq!(post["image_ids"], serde_json::json!([]));
        assert!(json["current_thread"].is_null());
    }

    #[tokio::test]
    async fn test_comment_form() {
        let db = setup_db().await;
        let thread_id = ThreadRepository::new(db.pool()).create("T").await.unwrap();
        let post_id = PostRepository::new(db.pool())
            .create(&NewPost::new(thread_id, "alice", "hello"))
            .await
            .unwrap();
        let assembler = ViewAssembler::new(db.pool());

        let form = assembler.comment_form(thread_id, post_id).await.unwrap();
        assert_eq!(form.thread_id, thread_id);
        assert_eq!(form.post_id, post_id);
        assert_eq!(form.threads.len(), 1);

        assert!(matches!(
            assembler.comment_form(thread_id, 999).await,
            Err(BoardError::NotFound(_))
        ));
    }
}
