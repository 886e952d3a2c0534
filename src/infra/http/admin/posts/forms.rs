use serde::Deserialize;

use crate::application::admin::posts::PostInput;

/// Editor form body. Every field is optional so a partial submission still decodes and can
/// be answered with per-field messages.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminPostForm {
    pub(crate) intent: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) markdown: Option<String>,
}

impl AdminPostForm {
    pub(crate) fn into_parts(self) -> (Option<String>, PostInput) {
        let input = PostInput {
            title: self.title,
            slug: self.slug,
            markdown: self.markdown,
        };
        (self.intent, input)
    }
}
