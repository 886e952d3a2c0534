use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    application::auth::AdminIdentity,
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{AdminState, posts::admin_post_error};

pub(super) async fn admin_dashboard(
    State(state): State<AdminState>,
    Extension(identity): Extension<AdminIdentity>,
) -> Response {
    let posts = match state.posts.list_posts().await {
        Ok(posts) => posts,
        Err(err) => {
            return admin_post_error("infra::http::admin::dashboard", err).into_response();
        }
    };

    let view = admin_views::AdminIndexView::new(identity.email, posts);
    render_template_response(admin_views::AdminIndexTemplate { view }, StatusCode::OK)
}
