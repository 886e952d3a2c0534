//! Public read path: post index and rendered post pages.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;

use crate::application::render::{MarkdownRenderer, RenderError};
use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::entities::PostSummary;
use crate::domain::error::DomainError;
use crate::presentation::views::PostView;

#[derive(Debug, Error)]
pub enum PostReadError {
    #[error("post `{slug}` not found")]
    NotFound { slug: String },
    #[error(transparent)]
    Invariant(#[from] DomainError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct PostReadService {
    posts: Arc<dyn PostsRepo>,
    renderer: Arc<MarkdownRenderer>,
}

impl PostReadService {
    pub fn new(posts: Arc<dyn PostsRepo>, renderer: Arc<MarkdownRenderer>) -> Self {
        Self { posts, renderer }
    }

    pub async fn list_summaries(&self) -> Result<Vec<PostSummary>, PostReadError> {
        Ok(self.posts.list_post_summaries().await?)
    }

    pub async fn post_view(&self, slug: &str) -> Result<PostView, PostReadError> {
        // Routing never produces an empty segment; reaching this is a wiring bug.
        if slug.is_empty() {
            return Err(DomainError::invariant("slug is required").into());
        }

        let post = self
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| PostReadError::NotFound {
                slug: slug.to_string(),
            })?;

        let markdown_html = self.renderer.render(&post.markdown)?;
        counter!("quillpost_post_views_total").increment(1);

        Ok(PostView {
            title: post.title,
            markdown_html,
        })
    }
}
