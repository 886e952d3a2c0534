use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    application::{
        error::HttpError,
        posts::{PostReadError, PostReadService},
        repos::DatabaseHealth,
    },
    presentation::views::{
        PostIndexTemplate, PostIndexView, PostTemplate, render_template_response,
    },
};

use super::{RouterState, db_health_response, repo_error_to_http};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostReadService>,
    pub health: Arc<dyn DatabaseHealth>,
}

pub fn build_public_router() -> Router<RouterState> {
    Router::new()
        .route("/posts", get(index))
        .route("/posts/{slug}", get(post_detail))
        .route("/_health/db", get(public_health))
}

async fn index(State(state): State<HttpState>) -> Response {
    match state.posts.list_summaries().await {
        Ok(summaries) => render_template_response(
            PostIndexTemplate {
                view: PostIndexView::from_summaries(summaries),
            },
            StatusCode::OK,
        ),
        Err(err) => post_read_error("infra::http::public::index", err).into_response(),
    }
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.posts.post_view(&slug).await {
        Ok(view) => render_template_response(PostTemplate { view }, StatusCode::OK),
        Err(err) => post_read_error("infra::http::public::post_detail", err).into_response(),
    }
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.health.health_check().await)
}

pub(super) async fn fallback() -> Response {
    HttpError::not_found("infra::http::public::fallback", "Page not found").into_response()
}

fn post_read_error(source: &'static str, err: PostReadError) -> HttpError {
    match err {
        PostReadError::NotFound { slug } => HttpError::not_found(
            source,
            format!("This post with the slug \"{slug}\" does not exist."),
        ),
        PostReadError::Repo(repo) => repo_error_to_http(source, repo),
        other => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &other,
        ),
    }
}
