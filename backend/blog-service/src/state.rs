use comment_feed::{CommentFeed, NotificationBridge, TopicRegistry};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StorageKind};
use crate::error::Result;
use crate::services::{CommentService, PostService, SubscriptionService};
use crate::store::{MemoryStore, PostgresStore, Store};

/// Shared handles for every request
#[derive(Clone)]
pub struct AppState {
    pub storage: StorageKind,
    pub store: Arc<dyn Store>,
    pub feed: Arc<dyn CommentFeed>,
    pub posts: PostService,
    pub comments: CommentService,
    pub subscriptions: SubscriptionService,
}

impl AppState {
    /// Wire services over an already built store/feed pair
    pub fn new(storage: StorageKind, store: Arc<dyn Store>, feed: Arc<dyn CommentFeed>) -> Self {
        Self {
            storage,
            posts: PostService::new(store.clone()),
            comments: CommentService::new(store.clone(), feed.clone()),
            subscriptions: SubscriptionService::new(store.clone(), feed.clone()),
            store,
            feed,
        }
    }

    /// Volatile store with the in-process registry
    pub fn in_memory(inbox_capacity: usize) -> Self {
        Self::new(
            StorageKind::Memory,
            Arc::new(MemoryStore::new()),
            Arc::new(TopicRegistry::with_inbox_capacity(inbox_capacity)),
        )
    }

    /// Build the backend named by `config.storage`
    ///
    /// Postgres connects, verifies and migrates before anything is served.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.storage {
            StorageKind::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory(config.feed_inbox_capacity))
            }
            StorageKind::Postgres => {
                config.database.log_config();
                let pool = db_pool::create_pool(&config.database).await?;

                let store = PostgresStore::new(pool.clone());
                store.migrate().await?;

                let feed = NotificationBridge::with_inbox_capacity(pool, config.feed_inbox_capacity);
                info!("Using postgres storage with LISTEN/NOTIFY comment feed");
                Ok(Self::new(StorageKind::Postgres, Arc::new(store), Arc::new(feed)))
            }
        }
    }
}
