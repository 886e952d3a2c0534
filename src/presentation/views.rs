use crate::application::error::HttpError;
use crate::domain::entities::PostSummary;
use askama::{Error as AskamaError, Template};
use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Render the error page, falling back to plain text when the template itself fails.
pub fn render_error_page(view: ErrorPageView, status: StatusCode) -> Response {
    let fallback = view.heading.clone();
    match (ErrorTemplate { view }).render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(_) => (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            fallback,
        )
            .into_response(),
    }
}

pub struct ErrorPageView {
    pub title: String,
    pub heading: String,
    pub detail: Option<String>,
}

impl ErrorPageView {
    /// Catch-all failure page. The raw error message is shown below the apology.
    pub fn boundary(public_message: &'static str, detail: String) -> Self {
        Self {
            title: public_message.to_string(),
            heading: "Oh no, something went wrong!".to_string(),
            detail: (!detail.is_empty()).then_some(detail),
        }
    }

    pub fn missing(message: String) -> Self {
        Self {
            title: "Not found".to_string(),
            heading: message,
            detail: None,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: ErrorPageView,
}

pub struct PostView {
    pub title: String,
    pub markdown_html: String,
}

#[derive(Template)]
#[template(path = "posts/show.html")]
pub struct PostTemplate {
    pub view: PostView,
}

pub struct PostIndexView {
    pub posts: Vec<PostLinkView>,
}

pub struct PostLinkView {
    pub title: String,
    pub href: String,
}

impl PostIndexView {
    pub fn from_summaries(summaries: Vec<PostSummary>) -> Self {
        let posts = summaries
            .into_iter()
            .map(|summary| PostLinkView {
                href: format!("/posts/{}", summary.slug),
                title: summary.title,
            })
            .collect();
        Self { posts }
    }
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostIndexTemplate {
    pub view: PostIndexView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_template_injects_html_unescaped_and_escapes_title() {
        let html = PostTemplate {
            view: PostView {
                title: "Fish & Chips".to_string(),
                markdown_html: "<h1>Hi</h1>\n".to_string(),
            },
        }
        .render()
        .expect("render");

        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("Fish &#38; Chips") || html.contains("Fish &amp; Chips"));
    }

    #[test]
    fn index_links_each_post() {
        let view = PostIndexView::from_summaries(vec![PostSummary {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
        }]);
        let html = PostIndexTemplate { view }.render().expect("render");
        assert!(html.contains("href=\"/posts/hello\""));
    }

    #[test]
    fn error_page_keeps_status() {
        let response = render_error_page(
            ErrorPageView::boundary("Internal error", "pool timed out".to_string()),
            StatusCode::SERVICE_UNAVAILABLE,
        );
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
