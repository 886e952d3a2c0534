use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{infra::error::InfraError, presentation::views::ErrorPageView};

#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }

    fn headline(&self) -> String {
        self.messages.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
enum ErrorPage {
    /// Generic failure page that shows the raw error message.
    Boundary,
    /// Missing-resource page; the report headline is shown as the page message.
    Missing,
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    page: ErrorPage,
    report: ErrorReport,
}

impl HttpError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        let report = ErrorReport::from_message(source, status, detail);
        Self {
            status,
            public_message,
            page: ErrorPage::Boundary,
            report,
        }
    }

    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            page: ErrorPage::Boundary,
            report,
        }
    }

    /// A 404 whose message is shown to the visitor verbatim.
    pub fn not_found(source: &'static str, message: impl Into<String>) -> Self {
        let report = ErrorReport::from_message(source, StatusCode::NOT_FOUND, message);
        Self {
            status: StatusCode::NOT_FOUND,
            public_message: "Not found",
            page: ErrorPage::Missing,
            report,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn report(&self) -> &ErrorReport {
        &self.report
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let view = match self.page {
            ErrorPage::Boundary => {
                ErrorPageView::boundary(self.public_message, self.report.headline())
            }
            ErrorPage::Missing => ErrorPageView::missing(self.report.headline()),
        };
        let mut response = crate::presentation::views::render_error_page(view, self.status);
        self.report.attach(&mut response);
        response
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
