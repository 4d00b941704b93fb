use comment_feed::{Comment, CommentFeed, FeedStats, Subscription};
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::store::Store;

/// Live comment subscriptions for existing posts
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn Store>,
    feed: Arc<dyn CommentFeed>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn Store>, feed: Arc<dyn CommentFeed>) -> Self {
        Self { store, feed }
    }

    /// Subscribe to new comments on `post_id`; the post must exist
    pub async fn subscribe(&self, post_id: &str) -> Result<Subscription> {
        self.store.get_post(post_id).await?;
        let subscription = self.feed.subscribe(post_id).await?;
        debug!(post_id = %post_id, "Comment subscription opened");
        Ok(subscription)
    }

    pub async fn publish(&self, comment: &Comment) {
        self.feed.publish(comment).await;
    }

    pub fn stats(&self) -> FeedStats {
        self.feed.stats()
    }
}
