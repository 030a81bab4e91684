//! Caller identity extraction
//!
//! Privileged endpoints identify the caller by account name
//! (`x-cms-account`) and session token (`Authorization: Bearer <token>`).
//! Missing or malformed headers are not rejected here; they produce an
//! identity that resolves to no permission.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::convert::Infallible;

use crate::domain::Caller;

/// Header carrying the caller's account name
pub const ACCOUNT_HEADER: &str = "x-cms-account";

/// Claimed identity of the caller
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Caller);

impl CallerIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let name = headers
            .get(ACCOUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default();
        CallerIdentity(Caller::new(name, token))
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
