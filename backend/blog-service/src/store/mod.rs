//! Post and comment persistence
//!
//! Two interchangeable implementations sit behind [`Store`]: volatile maps for
//! development and tests, and Postgres tables for anything that must survive a
//! restart. Both list newest first.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, NewComment, NewPost, Pagination, Post};

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a post; an id that already exists is a `Conflict`
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    async fn list_posts(&self, page: Pagination) -> Result<Vec<Post>>;

    /// `NotFound` when no post has this id
    async fn get_post(&self, id: &str) -> Result<Post>;

    async fn set_comments_allowed(&self, post_id: &str, allow: bool) -> Result<Post>;

    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;

    async fn get_comment(&self, id: &str) -> Result<Comment>;

    /// Top-level comments of a post
    async fn list_comments(&self, post_id: &str, page: Pagination) -> Result<Vec<Comment>>;

    /// Direct replies to `parent_id` within a post
    async fn list_replies(
        &self,
        post_id: &str,
        parent_id: &str,
        page: Pagination,
    ) -> Result<Vec<Comment>>;
}
