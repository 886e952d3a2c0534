//! Admin authorization contract consumed by the admin routes.

use async_trait::async_trait;
use axum::http::HeaderMap;

/// Proof that the current request comes from the configured administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
}

/// The caller is not an administrator and should be sent to `location` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDenied {
    pub location: String,
}

/// The parts of an inbound request an [`AdminGate`] may inspect.
pub struct AdminRequest<'a> {
    pub headers: &'a HeaderMap,
    pub path_and_query: &'a str,
}

#[async_trait]
pub trait AdminGate: Send + Sync {
    async fn require_admin(&self, request: &AdminRequest<'_>) -> Result<AdminIdentity, AdminDenied>;
}
