use std::sync::Arc;

use metrics::counter;
use tracing::info;

use crate::application::repos::{
    CreatePostParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::Post;

use super::types::{
    AdminPostError, EditorLoad, EditorTarget, PostDraft, PostIntent, PostSubmission,
    SubmitOutcome,
};

const LOG_TARGET: &str = "quillpost::admin::posts";

#[derive(Clone)]
pub struct AdminPostService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
}

impl AdminPostService {
    pub fn new(reader: Arc<dyn PostsRepo>, writer: Arc<dyn PostsWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, AdminPostError> {
        Ok(self.reader.list_posts().await?)
    }

    pub async fn load_editor(&self, target: &EditorTarget) -> Result<EditorLoad, AdminPostError> {
        let slug = match target {
            EditorTarget::New => return Ok(EditorLoad::Blank),
            EditorTarget::Existing(slug) => slug,
        };

        match self.reader.find_by_slug(slug).await? {
            Some(post) => Ok(EditorLoad::Existing(post)),
            None => Ok(EditorLoad::NotFound { slug: slug.clone() }),
        }
    }

    /// Apply an editor submission. Delete skips field validation; every other intent
    /// validates first and then creates or updates depending on `target`.
    pub async fn submit(
        &self,
        actor: &str,
        target: &EditorTarget,
        submission: PostSubmission,
    ) -> Result<SubmitOutcome, AdminPostError> {
        let PostSubmission { intent, input } = submission;

        if intent == Some(PostIntent::Delete) {
            return self.delete_post(actor, target).await;
        }

        let draft = match input.validate() {
            Ok(draft) => draft,
            Err(errors) => return Ok(SubmitOutcome::ValidationFailed { errors, input }),
        };

        match target {
            EditorTarget::New => self.create_post(actor, draft).await,
            EditorTarget::Existing(slug) => self.update_post(actor, slug, draft).await,
        }
    }

    async fn create_post(
        &self,
        actor: &str,
        draft: PostDraft,
    ) -> Result<SubmitOutcome, AdminPostError> {
        let slug = draft.slug.clone();
        let params = CreatePostParams {
            slug: draft.slug,
            title: draft.title,
            markdown: draft.markdown,
        };

        let post = self
            .writer
            .create_post(params)
            .await
            .map_err(|err| constraint_for(err, &slug))?;

        counter!("quillpost_post_writes_total", "action" => "create").increment(1);
        info!(target = LOG_TARGET, actor, slug = %post.slug, "post created");
        Ok(SubmitOutcome::Saved(post))
    }

    async fn update_post(
        &self,
        actor: &str,
        current_slug: &str,
        draft: PostDraft,
    ) -> Result<SubmitOutcome, AdminPostError> {
        let slug = draft.slug.clone();
        let params = UpdatePostParams {
            slug: draft.slug,
            title: draft.title,
            markdown: draft.markdown,
        };

        let post = match self.writer.update_post(current_slug, params).await {
            Ok(post) => post,
            Err(RepoError::NotFound) => {
                return Ok(SubmitOutcome::NotFound {
                    slug: current_slug.to_string(),
                });
            }
            Err(err) => return Err(constraint_for(err, &slug)),
        };

        counter!("quillpost_post_writes_total", "action" => "update").increment(1);
        info!(
            target = LOG_TARGET,
            actor,
            previous_slug = current_slug,
            slug = %post.slug,
            "post updated"
        );
        Ok(SubmitOutcome::Saved(post))
    }

    async fn delete_post(
        &self,
        actor: &str,
        target: &EditorTarget,
    ) -> Result<SubmitOutcome, AdminPostError> {
        let slug = match target {
            EditorTarget::New => return Err(AdminPostError::DeleteWithoutPost),
            EditorTarget::Existing(slug) => slug,
        };

        match self.writer.delete_post(slug).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => {
                return Ok(SubmitOutcome::NotFound { slug: slug.clone() });
            }
            Err(err) => return Err(err.into()),
        }

        counter!("quillpost_post_writes_total", "action" => "delete").increment(1);
        info!(target = LOG_TARGET, actor, slug = %slug, "post deleted");
        Ok(SubmitOutcome::Deleted { slug: slug.clone() })
    }
}

fn constraint_for(err: RepoError, slug: &str) -> AdminPostError {
    match err {
        RepoError::ConstraintViolation { .. } => AdminPostError::ConstraintViolation {
            slug: slug.to_string(),
        },
        other => AdminPostError::Repo(other),
    }
}
