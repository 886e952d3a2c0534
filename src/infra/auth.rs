//! Admin gate backed by an authenticating reverse proxy.
//!
//! The proxy in front of the service signs visitors in and forwards the verified email in a
//! trusted header. Requests are admitted when that email matches the configured admin.

use async_trait::async_trait;
use axum::http::HeaderName;
use tracing::debug;
use url::form_urlencoded;

use crate::application::auth::{AdminDenied, AdminGate, AdminIdentity, AdminRequest};
use crate::config::AdminSettings;

#[derive(Debug, Clone)]
pub struct HeaderAdminGate {
    admin_email: String,
    identity_header: HeaderName,
    login_path: String,
}

impl HeaderAdminGate {
    pub fn new(
        admin_email: impl Into<String>,
        identity_header: HeaderName,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            admin_email: admin_email.into(),
            identity_header,
            login_path: login_path.into(),
        }
    }

    pub fn from_settings(settings: &AdminSettings) -> Self {
        Self::new(
            settings.email.clone(),
            settings.identity_header.clone(),
            settings.login_path.clone(),
        )
    }

    fn login_location(&self, path_and_query: &str) -> String {
        let redirect_to: String = form_urlencoded::byte_serialize(path_and_query.as_bytes()).collect();
        format!("{}?redirectTo={redirect_to}", self.login_path)
    }
}

#[async_trait]
impl AdminGate for HeaderAdminGate {
    async fn require_admin(&self, request: &AdminRequest<'_>) -> Result<AdminIdentity, AdminDenied> {
        let email = request
            .headers
            .get(&self.identity_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match email {
            Some(email) if email.eq_ignore_ascii_case(&self.admin_email) => Ok(AdminIdentity {
                email: email.to_string(),
            }),
            other => {
                debug!(
                    target = "quillpost::auth",
                    path = request.path_and_query,
                    identity_present = other.is_some(),
                    "admin access denied"
                );
                Err(AdminDenied {
                    location: self.login_location(request.path_and_query),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn gate() -> HeaderAdminGate {
        HeaderAdminGate::new(
            "admin@example.com",
            HeaderName::from_static("x-forwarded-email"),
            "/login",
        )
    }

    fn headers(email: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(email) = email {
            headers.insert("x-forwarded-email", HeaderValue::from_static(email));
        }
        headers
    }

    #[tokio::test]
    async fn admits_the_configured_admin_case_insensitively() {
        let headers = headers(Some(" Admin@Example.com "));
        let identity = gate()
            .require_admin(&AdminRequest {
                headers: &headers,
                path_and_query: "/posts/admin",
            })
            .await
            .expect("admin admitted");
        assert_eq!(identity.email, "Admin@Example.com");
    }

    #[tokio::test]
    async fn redirects_other_users_to_login() {
        let headers = headers(Some("reader@example.com"));
        let denied = gate()
            .require_admin(&AdminRequest {
                headers: &headers,
                path_and_query: "/posts/admin/hello?x=1",
            })
            .await
            .expect_err("non-admin denied");
        assert_eq!(
            denied.location,
            "/login?redirectTo=%2Fposts%2Fadmin%2Fhello%3Fx%3D1"
        );
    }

    #[tokio::test]
    async fn redirects_anonymous_requests() {
        let headers = headers(None);
        let denied = gate()
            .require_admin(&AdminRequest {
                headers: &headers,
                path_and_query: "/posts/admin",
            })
            .await
            .expect_err("anonymous denied");
        assert_eq!(denied.location, "/login?redirectTo=%2Fposts%2Fadmin");
    }
}
