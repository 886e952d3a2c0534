use axum::{
    Extension, Form,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    application::{
        admin::posts::{
            AdminPostError, EditorLoad, EditorTarget, PostFieldErrors, PostInput, PostSubmission,
            SubmitOutcome,
        },
        auth::AdminIdentity,
        error::HttpError,
    },
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{super::AdminState, errors::admin_post_error, forms::AdminPostForm};

const ADMIN_INDEX_PATH: &str = "/posts/admin";

pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
) -> Response {
    const SOURCE: &str = "infra::http::admin::posts::admin_post_edit";

    let target = match EditorTarget::from_path(&slug) {
        Ok(target) => target,
        Err(err) => return admin_post_error(SOURCE, AdminPostError::from(err)).into_response(),
    };

    let input = match state.posts.load_editor(&target).await {
        Ok(EditorLoad::Blank) => PostInput::default(),
        Ok(EditorLoad::Existing(post)) => PostInput::from_post(&post),
        Ok(EditorLoad::NotFound { slug }) => {
            return missing_post(SOURCE, &slug).into_response();
        }
        Err(err) => return admin_post_error(SOURCE, err).into_response(),
    };

    render_editor(&target, &input, PostFieldErrors::default(), StatusCode::OK)
}

pub(crate) async fn admin_post_submit(
    State(state): State<AdminState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(slug): Path<String>,
    form: Result<Form<AdminPostForm>, FormRejection>,
) -> Response {
    const SOURCE: &str = "infra::http::admin::posts::admin_post_submit";

    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            return HttpError::from_error(
                SOURCE,
                rejection.status(),
                "Post request could not be processed",
                &rejection,
            )
            .into_response();
        }
    };

    let target = match EditorTarget::from_path(&slug) {
        Ok(target) => target,
        Err(err) => return admin_post_error(SOURCE, AdminPostError::from(err)).into_response(),
    };

    let (intent, input) = form.into_parts();
    let submission = match PostSubmission::decode(intent.as_deref(), input) {
        Ok(submission) => submission,
        Err(err) => return admin_post_error(SOURCE, err).into_response(),
    };

    match state
        .posts
        .submit(&identity.email, &target, submission)
        .await
    {
        Ok(SubmitOutcome::Saved(_)) | Ok(SubmitOutcome::Deleted { .. }) => {
            Redirect::to(ADMIN_INDEX_PATH).into_response()
        }
        Ok(SubmitOutcome::ValidationFailed { errors, input }) => {
            render_editor(&target, &input, errors, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Ok(SubmitOutcome::NotFound { slug }) => missing_post(SOURCE, &slug).into_response(),
        Err(err) => admin_post_error(SOURCE, err).into_response(),
    }
}

fn render_editor(
    target: &EditorTarget,
    input: &PostInput,
    errors: PostFieldErrors,
    status: StatusCode,
) -> Response {
    let view = admin_views::AdminPostEditorView::new(target, input, errors);
    render_template_response(admin_views::AdminPostEditorTemplate { view }, status)
}

fn missing_post(source: &'static str, slug: &str) -> HttpError {
    HttpError::not_found(
        source,
        format!("Uh oh! This post with the slug \"{slug}\" does not exist!"),
    )
}
