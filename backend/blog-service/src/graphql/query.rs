use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult};

use super::app_state;
use super::types::Post;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Posts, newest first
    async fn posts(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> GraphQLResult<Vec<Post>> {
        let posts = app_state(ctx)?
            .posts
            .list_posts(page, page_size)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn post(&self, ctx: &Context<'_>, id: String) -> GraphQLResult<Post> {
        let post = app_state(ctx)?
            .posts
            .get_post(&id)
            .await
            .map_err(|e| e.extend())?;
        Ok(post.into())
    }

    async fn health(&self) -> &'static str {
        "ok"
    }
}
