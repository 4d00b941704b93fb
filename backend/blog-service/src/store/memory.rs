use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use super::Store;
use crate::error::{AppError, Result};
use crate::models::{Comment, NewComment, NewPost, Pagination, Post};

/// In-memory store; everything is lost on restart
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    // Insertion order doubles as creation order
    posts: Vec<Post>,
    post_index: HashMap<String, usize>,
    comments: Vec<Comment>,
    comment_index: HashMap<String, usize>,
}

impl Inner {
    fn post_mut(&mut self, id: &str) -> Option<&mut Post> {
        let idx = *self.post_index.get(id)?;
        self.posts.get_mut(idx)
    }
}

fn post_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("post {} not found", id))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_post(&self, new: NewPost) -> Result<Post> {
        let mut inner = self.inner.write();
        if inner.post_index.contains_key(&new.id) {
            return Err(AppError::Conflict(format!("post {} already exists", new.id)));
        }

        let post = Post {
            id: new.id,
            title: new.title,
            content: new.content,
            author: new.author,
            allow_comments: new.allow_comments,
            created_at: Utc::now(),
        };
        let idx = inner.posts.len();
        inner.post_index.insert(post.id.clone(), idx);
        inner.posts.push(post.clone());

        debug!(post_id = %post.id, "Stored post in memory");
        Ok(post)
    }

    async fn list_posts(&self, page: Pagination) -> Result<Vec<Post>> {
        let inner = self.inner.read();
        Ok(page.apply(inner.posts.iter().rev().cloned()))
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        let inner = self.inner.read();
        inner
            .post_index
            .get(id)
            .and_then(|&idx| inner.posts.get(idx))
            .cloned()
            .ok_or_else(|| post_not_found(id))
    }

    async fn set_comments_allowed(&self, post_id: &str, allow: bool) -> Result<Post> {
        let mut inner = self.inner.write();
        let post = inner.post_mut(post_id).ok_or_else(|| post_not_found(post_id))?;
        post.allow_comments = allow;
        Ok(post.clone())
    }

    async fn create_comment(&self, new: NewComment) -> Result<Comment> {
        let mut inner = self.inner.write();
        if !inner.post_index.contains_key(&new.post_id) {
            return Err(post_not_found(&new.post_id));
        }
        if inner.comment_index.contains_key(&new.id) {
            return Err(AppError::Conflict(format!(
                "comment {} already exists",
                new.id
            )));
        }

        let comment = Comment {
            id: new.id,
            post_id: new.post_id,
            parent_id: new.parent_id,
            content: new.content,
            author: new.author,
            created_at: Utc::now(),
        };
        let idx = inner.comments.len();
        inner.comment_index.insert(comment.id.clone(), idx);
        inner.comments.push(comment.clone());

        debug!(
            post_id = %comment.post_id,
            comment_id = %comment.id,
            "Stored comment in memory"
        );
        Ok(comment)
    }

    async fn get_comment(&self, id: &str) -> Result<Comment> {
        let inner = self.inner.read();
        inner
            .comment_index
            .get(id)
            .and_then(|&idx| inner.comments.get(idx))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("comment {} not found", id)))
    }

    async fn list_comments(&self, post_id: &str, page: Pagination) -> Result<Vec<Comment>> {
        let inner = self.inner.read();
        let top_level = inner
            .comments
            .iter()
            .rev()
            .filter(|c| c.post_id == post_id && c.is_top_level())
            .cloned();
        Ok(page.apply(top_level))
    }

    async fn list_replies(
        &self,
        post_id: &str,
        parent_id: &str,
        page: Pagination,
    ) -> Result<Vec<Comment>> {
        let inner = self.inner.read();
        let replies = inner
            .comments
            .iter()
            .rev()
            .filter(|c| c.post_id == post_id && c.is_reply_to(parent_id))
            .cloned();
        Ok(page.apply(replies))
    }
}
