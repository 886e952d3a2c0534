mod service;
pub mod types;

pub use service::AdminPostService;
pub use types::{
    AdminPostError, EditorLoad, EditorTarget, NEW_POST_SLUG, PostDraft, PostFieldErrors,
    PostInput, PostIntent, PostSubmission, SubmitOutcome,
};
