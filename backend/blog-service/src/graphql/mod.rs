//! GraphQL schema: posts, threaded comments and live comment subscriptions

pub mod mutation;
pub mod query;
pub mod subscription;
pub mod types;

use async_graphql::{Context, Result as GraphQLResult, Schema};

use crate::state::AppState;

pub type AppSchema = Schema<query::QueryRoot, mutation::MutationRoot, subscription::SubscriptionRoot>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(
        query::QueryRoot,
        mutation::MutationRoot,
        subscription::SubscriptionRoot,
    )
    .data(state)
    .finish()
}

pub(crate) fn app_state<'a>(ctx: &Context<'a>) -> GraphQLResult<&'a AppState> {
    ctx.data::<AppState>()
        .map_err(|_| "Application state not available".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builds() {
        let schema = build_schema(AppState::in_memory(1));
        let sdl = schema.sdl();

        assert!(sdl.contains("type Query"));
        assert!(sdl.contains("commentAdded("));
        assert!(sdl.contains("updatePostCommentsPermission("));
        assert!(sdl.contains("input AddCommentInput"));
    }

    #[tokio::test]
    async fn test_health_query() {
        let schema = build_schema(AppState::in_memory(1));
        let result = schema.execute("{ health }").await;

        assert!(result.errors.is_empty());
        assert_eq!(result.data.to_string(), r#"{health: "ok"}"#);
    }
}
