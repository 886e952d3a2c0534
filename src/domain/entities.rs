//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub markdown: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Index projection of a post; the markdown body is never loaded for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
        }
    }
}
