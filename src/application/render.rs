//! Markdown to HTML conversion for post bodies.
//!
//! Output is not sanitized. Posts are authored only by the administrator, so raw HTML
//! inside the markdown is passed through and the templates inject the result unescaped.

use comrak::{Arena, Options, format_html, parse_document};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to format markdown: {message}")]
    Markdown { message: String },
}

pub struct MarkdownRenderer {
    options: Options<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::default();
        configure_extensions(&mut options);
        Self { options }
    }

    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| RenderError::Markdown {
            message: err.to_string(),
        })?;
        Ok(html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.r#unsafe = true;
}
