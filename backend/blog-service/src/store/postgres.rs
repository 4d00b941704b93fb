use async_trait::async_trait;
use db_pool::acquire_with_metrics;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::{debug, info};

use super::Store;
use crate::config::SERVICE_NAME;
use crate::error::{AppError, Result};
use crate::models::{Comment, NewComment, NewPost, Pagination, Post};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const POST_COLUMNS: &str = "id, title, content, author, allow_comments, created_at";
const COMMENT_COLUMNS: &str = "id, post_id, parent_id, content, author, created_at";

/// Postgres-backed store
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn create_post(&self, new: NewPost) -> Result<Post> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (id, title, content, author, allow_comments)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&new.id)
        .bind(&new.title)
        .bind(&new.content)
        .bind(&new.author)
        .bind(new.allow_comments)
        .fetch_one(&mut *conn)
        .await?;

        debug!(post_id = %post.id, "Inserted post");
        Ok(post)
    }

    async fn list_posts(&self, page: Pagination) -> Result<Vec<Post>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

        Ok(posts)
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let post = sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        post.ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))
    }

    async fn set_comments_allowed(&self, post_id: &str, allow: bool) -> Result<Post> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let post = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET allow_comments = $2 WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(post_id)
        .bind(allow)
        .fetch_optional(&mut *conn)
        .await?;

        post.ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
    }

    async fn create_comment(&self, new: NewComment) -> Result<Comment> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (id, post_id, parent_id, content, author)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(&new.id)
        .bind(&new.post_id)
        .bind(&new.parent_id)
        .bind(&new.content)
        .bind(&new.author)
        .fetch_one(&mut *conn)
        .await?;

        debug!(
            post_id = %comment.post_id,
            comment_id = %comment.id,
            "Inserted comment"
        );
        Ok(comment)
    }

    async fn get_comment(&self, id: &str) -> Result<Comment> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        comment.ok_or_else(|| AppError::NotFound(format!("comment {} not found", id)))
    }

    async fn list_comments(&self, post_id: &str, page: Pagination) -> Result<Vec<Comment>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let comments = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE post_id = $1 AND parent_id IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(post_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

        Ok(comments)
    }

    async fn list_replies(
        &self,
        post_id: &str,
        parent_id: &str,
        page: Pagination,
    ) -> Result<Vec<Comment>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let replies = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE post_id = $1 AND parent_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(post_id)
        .bind(parent_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

        Ok(replies)
    }
}
