use axum::http::StatusCode;

use crate::application::{admin::posts::AdminPostError, error::HttpError};
use crate::infra::http::repo_error_to_http;

pub(crate) fn admin_post_error(source: &'static str, err: AdminPostError) -> HttpError {
    match err {
        AdminPostError::ConstraintViolation { .. } => HttpError::from_error(
            source,
            StatusCode::CONFLICT,
            "Duplicate post",
            &err,
        ),
        AdminPostError::UnknownIntent(_) | AdminPostError::DeleteWithoutPost => {
            HttpError::from_error(
                source,
                StatusCode::BAD_REQUEST,
                "Post request could not be processed",
                &err,
            )
        }
        AdminPostError::Invariant(_) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &err,
        ),
        AdminPostError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
