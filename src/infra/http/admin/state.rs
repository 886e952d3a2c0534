use std::sync::Arc;

use crate::application::{admin::posts::AdminPostService, auth::AdminGate};

#[derive(Clone)]
pub struct AdminState {
    pub posts: Arc<AdminPostService>,
    pub gate: Arc<dyn AdminGate>,
}
