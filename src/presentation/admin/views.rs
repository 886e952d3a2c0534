use askama::Template;
use time::{OffsetDateTime, macros::format_description};

use crate::application::admin::posts::types::{
    EditorTarget, PostFieldErrors, PostInput, PostIntent,
};
use crate::domain::entities::Post;

pub fn format_timestamp(time: OffsetDateTime) -> String {
    let format = format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");
    time.format(format).unwrap_or_else(|_| time.to_string())
}

pub struct AdminPostRowView {
    pub title: String,
    pub slug: String,
    pub edit_href: String,
    pub updated_at: String,
}

pub struct AdminIndexView {
    pub admin_email: String,
    pub new_post_href: String,
    pub posts: Vec<AdminPostRowView>,
}

impl AdminIndexView {
    pub fn new(admin_email: String, posts: Vec<Post>) -> Self {
        let posts = posts
            .into_iter()
            .map(|post| AdminPostRowView {
                edit_href: format!("/posts/admin/{}", post.slug),
                updated_at: format_timestamp(post.updated_at),
                title: post.title,
                slug: post.slug,
            })
            .collect();

        Self {
            admin_email,
            new_post_href: format!("/posts/admin/{}", EditorTarget::New.path_slug()),
            posts,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/index.html")]
pub struct AdminIndexTemplate {
    pub view: AdminIndexView,
}

pub struct AdminPostEditorView {
    pub heading: String,
    pub form_action: String,
    pub is_new: bool,
    pub submit_intent: &'static str,
    pub submit_label: &'static str,
    pub delete_intent: &'static str,
    pub title: String,
    pub slug: String,
    pub markdown: String,
    pub errors: PostFieldErrors,
}

impl AdminPostEditorView {
    pub fn new(target: &EditorTarget, input: &PostInput, errors: PostFieldErrors) -> Self {
        let is_new = matches!(target, EditorTarget::New);
        let (heading, submit_intent, submit_label) = if is_new {
            ("New post".to_string(), PostIntent::Create, "Create post")
        } else {
            (
                format!("Edit \"{}\"", target.path_slug()),
                PostIntent::Update,
                "Save changes",
            )
        };

        Self {
            heading,
            form_action: format!("/posts/admin/{}", target.path_slug()),
            is_new,
            submit_intent: submit_intent.as_str(),
            submit_label,
            delete_intent: PostIntent::Delete.as_str(),
            title: input.title.clone().unwrap_or_default(),
            slug: input.slug.clone().unwrap_or_default(),
            markdown: input.markdown.clone().unwrap_or_default(),
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/edit.html")]
pub struct AdminPostEditorTemplate {
    pub view: AdminPostEditorView,
}
