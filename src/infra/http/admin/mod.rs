mod dashboard;
mod posts;
mod state;

pub use state::AdminState;

use axum::{Router, middleware, routing::get};

use super::{RouterState, middleware::require_admin};

/// Admin pages. Every route sits behind the admin gate, so no handler runs for a denied caller.
pub fn build_admin_router(state: AdminState) -> Router<RouterState> {
    Router::new()
        .route("/posts/admin", get(dashboard::admin_dashboard))
        .route(
            "/posts/admin/{slug}",
            get(posts::admin_post_edit).post(posts::admin_post_submit),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
