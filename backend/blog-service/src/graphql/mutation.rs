use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult};

use super::app_state;
use super::types::{AddCommentInput, Comment, CreatePostInput, Post};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_post(&self, ctx: &Context<'_>, input: CreatePostInput) -> GraphQLResult<Post> {
        let post = app_state(ctx)?
            .posts
            .create_post(&input.title, &input.content, &input.author, input.allow_comments)
            .await
            .map_err(|e| e.extend())?;
        Ok(post.into())
    }

    /// Create a comment and push it to live `commentAdded` subscribers
    async fn add_comment(&self, ctx: &Context<'_>, input: AddCommentInput) -> GraphQLResult<Comment> {
        let comment = app_state(ctx)?
            .comments
            .add_comment(
                &input.post_id,
                &input.content,
                &input.author,
                input.parent_id.as_deref(),
            )
            .await
            .map_err(|e| e.extend())?;
        Ok(comment.into())
    }

    async fn update_post_comments_permission(
        &self,
        ctx: &Context<'_>,
        post_id: String,
        allow_comments: bool,
    ) -> GraphQLResult<Post> {
        let post = app_state(ctx)?
            .posts
            .set_comments_allowed(&post_id, allow_comments)
            .await
            .map_err(|e| e.extend())?;
        Ok(post.into())
    }
}
