//! GraphQL object and input types

use async_graphql::{ComplexObject, Context, ErrorExtensions, InputObject, Result as GraphQLResult, SimpleObject};
use chrono::SecondsFormat;

use super::app_state;
use crate::models;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub allow_comments: bool,
    /// RFC 3339
    pub created_at: String,
}

impl From<models::Post> for Post {
    fn from(post: models::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            allow_comments: post.allow_comments,
            created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[ComplexObject]
impl Post {
    /// Top-level comments, newest first
    async fn comments(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> GraphQLResult<Vec<Comment>> {
        let comments = app_state(ctx)?
            .comments
            .list_comments(&self.id, page, page_size)
            .await
            .map_err(|e| e.extend())?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub author: String,
    /// RFC 3339
    pub created_at: String,
}

impl From<models::Comment> for Comment {
    fn from(comment: models::Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            content: comment.content,
            author: comment.author,
            created_at: comment.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[ComplexObject]
impl Comment {
    /// Direct replies, newest first
    async fn replies(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> GraphQLResult<Vec<Comment>> {
        let replies = app_state(ctx)?
            .comments
            .list_replies(&self.post_id, &self.id, page, page_size)
            .await
            .map_err(|e| e.extend())?;
        Ok(replies.into_iter().map(Comment::from).collect())
    }
}

#[derive(InputObject, Debug)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author: String,
    /// Defaults to true
    pub allow_comments: Option<bool>,
}

#[derive(InputObject, Debug)]
pub struct AddCommentInput {
    pub post_id: String,
    pub content: String,
    pub author: String,
    /// Comment being replied to; omit for a top-level comment
    pub parent_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_timestamps_are_rfc3339() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 5).unwrap();
        let comment = Comment::from(models::Comment {
            id: "c1".to_string(),
            post_id: "p1".to_string(),
            parent_id: None,
            content: "hi".to_string(),
            author: "bob".to_string(),
            created_at,
        });

        assert_eq!(comment.created_at, "2025-03-01T12:30:05Z");
    }
}
