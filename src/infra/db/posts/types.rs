use sqlx::FromRow;
use time::OffsetDateTime;

use crate::domain::entities::{Post, PostSummary};

pub(super) const POST_COLUMNS: &str = "slug, title, markdown, created_at, updated_at";

#[derive(Debug, FromRow)]
pub(super) struct PostRow {
    pub slug: String,
    pub title: String,
    pub markdown: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
            markdown: row.markdown,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct PostSummaryRow {
    pub slug: String,
    pub title: String,
}

impl From<PostSummaryRow> for PostSummary {
    fn from(row: PostSummaryRow) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
        }
    }
}
