use async_trait::async_trait;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::entities::{Post, PostSummary};

use super::PostgresRepositories;
use super::types::{POST_COLUMNS, PostRow, PostSummaryRow};
use crate::infra::db::map_sqlx_error;

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_post_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(
            "SELECT slug, title FROM posts ORDER BY position",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostSummary::from).collect())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY position");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Post::from))
    }
}
