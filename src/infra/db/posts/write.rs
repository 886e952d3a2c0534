use async_trait::async_trait;

use crate::application::repos::{CreatePostParams, PostsWriteRepo, RepoError, UpdatePostParams};
use crate::domain::entities::Post;

use super::PostgresRepositories;
use super::types::{POST_COLUMNS, PostRow};
use crate::infra::db::map_sqlx_error;

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError> {
        let CreatePostParams {
            slug,
            title,
            markdown,
        } = params;

        let sql = format!(
            "INSERT INTO posts (slug, title, markdown) \
             VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .bind(title)
            .bind(markdown)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(Post::from(row))
    }

    async fn update_post(&self, slug: &str, params: UpdatePostParams) -> Result<Post, RepoError> {
        let UpdatePostParams {
            slug: new_slug,
            title,
            markdown,
        } = params;

        let sql = format!(
            "UPDATE posts \
             SET slug = $2, title = $3, markdown = $4, updated_at = now() \
             WHERE slug = $1 \
             RETURNING {POST_COLUMNS}"
        );
        // `fetch_one` surfaces a missing row as `RowNotFound`, mapped to `RepoError::NotFound`.
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .bind(new_slug)
            .bind(title)
            .bind(markdown)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(Post::from(row))
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE slug = $1")
            .bind(slug)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
