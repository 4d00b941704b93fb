//! GraphQL subscriptions (WebSocket)

use async_graphql::{Context, ErrorExtensions, Result, Subscription};
use futures_util::stream::{Stream, StreamExt};

use super::app_state;
use super::types::Comment;

#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// New comments on a post as they are created
    ///
    /// Best effort: a client that falls behind may miss comments. The feed
    /// subscription is cancelled when the client unsubscribes or disconnects.
    async fn comment_added(
        &self,
        ctx: &Context<'_>,
        post_id: String,
    ) -> Result<impl Stream<Item = Comment>> {
        let subscription = app_state(ctx)?
            .subscriptions
            .subscribe(&post_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(subscription.map(Comment::from))
    }
}
