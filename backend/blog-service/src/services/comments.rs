use comment_feed::CommentFeed;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::require;
use crate::error::{AppError, Result};
use crate::models::{Comment, NewComment, Pagination};
use crate::store::Store;

/// Longest comment accepted, in characters
pub const MAX_COMMENT_CHARS: usize = 2000;

/// Comment creation and threaded listing
///
/// A comment is persisted before it is published, so any subscriber that sees
/// it can also read it back by id.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn Store>,
    feed: Arc<dyn CommentFeed>,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>, feed: Arc<dyn CommentFeed>) -> Self {
        Self { store, feed }
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        content: &str,
        author: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment> {
        require("content", content)?;
        require("author", author)?;
        if content.chars().count() > MAX_COMMENT_CHARS {
            return Err(AppError::Validation("comment is too long".to_string()));
        }

        let post = self.store.get_post(post_id).await?;
        if !post.allow_comments {
            return Err(AppError::Forbidden("comments are not allowed".to_string()));
        }

        let comment = self
            .store
            .create_comment(NewComment {
                id: Uuid::new_v4().to_string(),
                post_id: post.id,
                parent_id: parent_id
                    .filter(|p| !p.trim().is_empty())
                    .map(str::to_string),
                content: content.to_string(),
                author: author.to_string(),
            })
            .await?;

        info!(
            post_id = %comment.post_id,
            comment_id = %comment.id,
            reply = !comment.is_top_level(),
            "Comment created"
        );

        self.feed.publish(&comment).await;
        debug!(comment_id = %comment.id, "Comment handed to feed");

        Ok(comment)
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment> {
        self.store.get_comment(id).await
    }

    /// Top-level comments of a post, newest first
    pub async fn list_comments(
        &self,
        post_id: &str,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Vec<Comment>> {
        self.store
            .list_comments(post_id, Pagination::new(page, page_size))
            .await
    }

    /// Direct replies to a comment, newest first
    pub async fn list_replies(
        &self,
        post_id: &str,
        parent_id: &str,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Vec<Comment>> {
        self.store
            .list_replies(post_id, parent_id, Pagination::new(page, page_size))
            .await
    }
}
