mod errors;
mod forms;
mod handlers;

pub(super) use errors::admin_post_error;
pub(super) use handlers::{admin_post_edit, admin_post_submit};
