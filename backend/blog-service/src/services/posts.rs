use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::require;
use crate::error::Result;
use crate::models::{NewPost, Pagination, Post};
use crate::store::Store;

/// Post creation, lookup and the comments toggle
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a post; comments are allowed unless `allow_comments` says otherwise
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        author: &str,
        allow_comments: Option<bool>,
    ) -> Result<Post> {
        require("title", title)?;
        require("content", content)?;
        require("author", author)?;

        let post = self
            .store
            .create_post(NewPost {
                id: Uuid::new_v4().to_string(),
                title: title.to_string(),
                content: content.to_string(),
                author: author.to_string(),
                allow_comments: allow_comments.unwrap_or(true),
            })
            .await?;

        info!(post_id = %post.id, author = %post.author, "Post created");
        Ok(post)
    }

    pub async fn list_posts(&self, page: Option<i32>, page_size: Option<i32>) -> Result<Vec<Post>> {
        self.store
            .list_posts(Pagination::new(page, page_size))
            .await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        self.store.get_post(id).await
    }

    pub async fn set_comments_allowed(&self, post_id: &str, allow: bool) -> Result<Post> {
        let post = self.store.set_comments_allowed(post_id, allow).await?;
        info!(post_id = %post_id, allow_comments = allow, "Comment permission updated");
        Ok(post)
    }
}
