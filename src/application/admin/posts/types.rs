use std::str::FromStr;

use thiserror::Error;

use crate::{application::repos::RepoError, domain::entities::Post, domain::error::DomainError};

/// Path segment that opens the editor in create mode.
pub const NEW_POST_SLUG: &str = "new";

pub const TITLE_REQUIRED: &str = "Title is required";
pub const SLUG_REQUIRED: &str = "Slug is required";
pub const MARKDOWN_REQUIRED: &str = "Markdown is required";
pub const SLUG_NOT_URL_SAFE: &str = "Slug may only contain letters, digits, '-' and '_'";
pub const SLUG_RESERVED: &str = "Slug \"new\" is reserved";

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error("a post with slug `{slug}` already exists")]
    ConstraintViolation { slug: String },
    #[error("unknown intent `{0}`")]
    UnknownIntent(String),
    #[error("a post that has not been created cannot be deleted")]
    DeleteWithoutPost,
    #[error(transparent)]
    Invariant(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Which post the editor is bound to, decoded from the `{slug}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Existing(String),
}

impl EditorTarget {
    pub fn from_path(slug: &str) -> Result<Self, DomainError> {
        match slug {
            "" => Err(DomainError::invariant("slug is required")),
            NEW_POST_SLUG => Ok(Self::New),
            other => Ok(Self::Existing(other.to_string())),
        }
    }

    pub fn path_slug(&self) -> &str {
        match self {
            Self::New => NEW_POST_SLUG,
            Self::Existing(slug) => slug,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostIntent {
    Create,
    Update,
    Delete,
}

impl PostIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for PostIntent {
    type Err = AdminPostError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(AdminPostError::UnknownIntent(other.to_string())),
        }
    }
}

/// Field values exactly as submitted; kept so a rejected form can be re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

impl PostInput {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: Some(post.title.clone()),
            slug: Some(post.slug.clone()),
            markdown: Some(post.markdown.clone()),
        }
    }

    /// Whitespace-only values count as missing. Accepted values are kept verbatim; a slug
    /// must be URL-safe and cannot shadow the create-mode path segment.
    pub fn validate(&self) -> Result<PostDraft, PostFieldErrors> {
        let title = present(&self.title);
        let slug = present(&self.slug);
        let markdown = present(&self.markdown);
        let slug_error = match slug {
            None => Some(SLUG_REQUIRED),
            Some(slug) => check_slug(slug),
        };

        match (title, slug, markdown, slug_error) {
            (Some(title), Some(slug), Some(markdown), None) => Ok(PostDraft {
                title: title.to_string(),
                slug: slug.to_string(),
                markdown: markdown.to_string(),
            }),
            (title, _, markdown, slug_error) => Err(PostFieldErrors {
                title: title.is_none().then_some(TITLE_REQUIRED),
                slug: slug_error,
                markdown: markdown.is_none().then_some(MARKDOWN_REQUIRED),
            }),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn check_slug(slug: &str) -> Option<&'static str> {
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Some(SLUG_NOT_URL_SAFE)
    } else if slug == NEW_POST_SLUG {
        Some(SLUG_RESERVED)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFieldErrors {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
}

impl PostFieldErrors {
    pub fn has_errors(&self) -> bool {
        self.title.is_some() || self.slug.is_some() || self.markdown.is_some()
    }
}

/// Validated post content, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSubmission {
    /// `None` when the form carried no intent; treated as a save.
    pub intent: Option<PostIntent>,
    pub input: PostInput,
}

impl PostSubmission {
    pub fn decode(intent: Option<&str>, input: PostInput) -> Result<Self, AdminPostError> {
        let intent = match intent.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Some(value.parse::<PostIntent>()?),
            None => None,
        };
        Ok(Self { intent, input })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorLoad {
    Blank,
    Existing(Post),
    NotFound { slug: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Post),
    Deleted { slug: String },
    ValidationFailed {
        errors: PostFieldErrors,
        input: PostInput,
    },
    NotFound { slug: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, slug: &str, markdown: &str) -> PostInput {
        PostInput {
            title: Some(title.to_string()),
            slug: Some(slug.to_string()),
            markdown: Some(markdown.to_string()),
        }
    }

    #[test]
    fn editor_target_recognises_new_sentinel() {
        assert_eq!(EditorTarget::from_path("new").unwrap(), EditorTarget::New);
        assert_eq!(
            EditorTarget::from_path("hello").unwrap(),
            EditorTarget::Existing("hello".into())
        );
        assert!(matches!(
            EditorTarget::from_path(""),
            Err(DomainError::Invariant { .. })
        ));
    }

    #[test]
    fn validate_keeps_accepted_values_verbatim() {
        let draft = input(" Hello ", "hello_2-b", "# Hi\n").validate().unwrap();
        assert_eq!(
            draft,
            PostDraft {
                title: " Hello ".into(),
                slug: "hello_2-b".into(),
                markdown: "# Hi\n".into(),
            }
        );
    }

    #[test]
    fn validate_rejects_slugs_that_are_not_url_safe() {
        for slug in ["a/b", " hello ", "caf\u{e9}", "a?b", "a%2Fb", "a.b"] {
            let errors = input("Hello", slug, "# Hi").validate().unwrap_err();
            assert_eq!(
                errors,
                PostFieldErrors {
                    title: None,
                    slug: Some(SLUG_NOT_URL_SAFE),
                    markdown: None,
                },
                "slug {slug:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_the_create_mode_slug() {
        let errors = input("Hello", NEW_POST_SLUG, "# Hi").validate().unwrap_err();
        assert_eq!(errors.slug, Some(SLUG_RESERVED));
        assert_eq!(errors.title, None);

        assert!(input("Hello", "New", "# Hi").validate().is_ok());
        assert!(input("Hello", "new-post", "# Hi").validate().is_ok());
    }

    #[test]
    fn validate_reports_slug_error_alongside_missing_fields() {
        let errors = input("", "a/b", "").validate().unwrap_err();
        assert_eq!(errors.title, Some(TITLE_REQUIRED));
        assert_eq!(errors.slug, Some(SLUG_NOT_URL_SAFE));
        assert_eq!(errors.markdown, Some(MARKDOWN_REQUIRED));
    }

    #[test]
    fn validate_reports_only_missing_fields() {
        let errors = input("", "hello", "# Hi").validate().unwrap_err();
        assert_eq!(
            errors,
            PostFieldErrors {
                title: Some(TITLE_REQUIRED),
                slug: None,
                markdown: None,
            }
        );
    }

    #[test]
    fn validate_treats_absent_and_blank_fields_as_missing() {
        let errors = PostInput {
            title: None,
            slug: Some("   ".into()),
            markdown: None,
        }
        .validate()
        .unwrap_err();
        assert!(errors.has_errors());
        assert_eq!(errors.title, Some(TITLE_REQUIRED));
        assert_eq!(errors.slug, Some(SLUG_REQUIRED));
        assert_eq!(errors.markdown, Some(MARKDOWN_REQUIRED));
    }

    #[test]
    fn decode_parses_known_intents() {
        let submission = PostSubmission::decode(Some("delete"), PostInput::default()).unwrap();
        assert_eq!(submission.intent, Some(PostIntent::Delete));

        let submission = PostSubmission::decode(Some(""), PostInput::default()).unwrap();
        assert_eq!(submission.intent, None);
    }

    #[test]
    fn decode_rejects_unknown_intent() {
        let err = PostSubmission::decode(Some("publish"), PostInput::default()).unwrap_err();
        assert!(matches!(err, AdminPostError::UnknownIntent(value) if value == "publish"));
    }
}
