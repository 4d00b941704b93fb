//! Business rules on top of the store and the comment feed

mod comments;
mod posts;
mod subscriptions;

pub use comments::{CommentService, MAX_COMMENT_CHARS};
pub use posts::PostService;
pub use subscriptions::SubscriptionService;

use crate::error::{AppError, Result};

/// Reject blank required fields with "`field` is required"
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod mocks {
    use async_trait::async_trait;
    use comment_feed::{CommentFeed, FeedStats, Subscription};
    use mockall::mock;

    use crate::error::Result;
    use crate::models::{Comment, NewComment, NewPost, Pagination, Post};
    use crate::store::Store;

    mock! {
        pub Store {}

        #[async_trait]
        impl Store for Store {
            async fn create_post(&self, post: NewPost) -> Result<Post>;
            async fn list_posts(&self, page: Pagination) -> Result<Vec<Post>>;
            async fn get_post(&self, id: &str) -> Result<Post>;
            async fn set_comments_allowed(&self, post_id: &str, allow: bool) -> Result<Post>;
            async fn create_comment(&self, comment: NewComment) -> Result<Comment>;
            async fn get_comment(&self, id: &str) -> Result<Comment>;
            async fn list_comments(&self, post_id: &str, page: Pagination) -> Result<Vec<Comment>>;
            async fn list_replies(
                &self,
                post_id: &str,
                parent_id: &str,
                page: Pagination,
            ) -> Result<Vec<Comment>>;
        }
    }

    mock! {
        pub Feed {}

        #[async_trait]
        impl CommentFeed for Feed {
            async fn subscribe(&self, post_id: &str) -> comment_feed::Result<Subscription>;
            async fn publish(&self, comment: &Comment);
            fn stats(&self) -> FeedStats;
        }
    }

    pub fn post(id: &str, allow_comments: bool) -> Post {
        Post {
            id: id.to_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            author: "alice".to_string(),
            allow_comments,
            created_at: chrono::Utc::now(),
        }
    }
}
