//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Post, PostSummary};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("record violates unique constraint `{constraint}`")]
    ConstraintViolation { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostParams {
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

/// Replacement content for an existing post. `slug` is the new identifier and may differ
/// from the slug the update is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostParams {
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Slug/title pairs in insertion order.
    async fn list_post_summaries(&self) -> Result<Vec<PostSummary>, RepoError>;

    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError>;

    /// Replace the post stored under `slug`. Fails with [`RepoError::NotFound`] when no post
    /// matches.
    async fn update_post(&self, slug: &str, params: UpdatePostParams) -> Result<Post, RepoError>;

    /// Remove the post stored under `slug`. Fails with [`RepoError::NotFound`] when nothing
    /// was deleted.
    async fn delete_post(&self, slug: &str) -> Result<(), RepoError>;
}

#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
