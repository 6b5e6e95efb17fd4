//! Bearer token authentication provider.
//!
//! Validates `Authorization: Bearer <token>` headers carrying driver tokens
//! issued by [`TokenIssuer`]. A missing header, a different scheme or an
//! empty token all count as missing credentials; anything else that fails
//! verification is invalid or expired.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, request::Parts};
use tracing::{debug, instrument};
use transit_common::caller::Caller;

use crate::auth::{error::AuthError, jwt::TokenIssuer, provider::AuthProvider};

pub struct BearerAuthProvider {
    tokens: Arc<TokenIssuer>,
}

impl BearerAuthProvider {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }

    /// Extract Bearer token from Authorization header
    fn extract_bearer_token(headers: &header::HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl AuthProvider for BearerAuthProvider {
    #[instrument(skip(self, parts), fields(scheme = "bearer"))]
    async fn authenticate(&self, parts: &Parts) -> Result<Caller, AuthError> {
        let token =
            Self::extract_bearer_token(&parts.headers).ok_or(AuthError::MissingCredentials)?;

        let claims = self.tokens.verify(&token).map_err(|e| {
            debug!(error = %e, "Bearer token rejected");
            AuthError::from(e)
        })?;

        debug!(driver_id = claims.id, bus_id = claims.bus_id, "Bearer token accepted");

        Ok(Caller::driver(claims.id, claims.bus_id))
    }

    fn scheme(&self) -> &'static str {
        "bearer"
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, Request};
    use chrono::{Duration, Utc};

    use super::*;

    fn provider() -> (BearerAuthProvider, Arc<TokenIssuer>) {
        let tokens = Arc::new(TokenIssuer::new("test-secret", Duration::hours(1)));
        (BearerAuthProvider::new(tokens.clone()), tokens)
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/driver/bus");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_extract_bearer_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer test_token_123".parse().unwrap(),
        );

        let result = BearerAuthProvider::extract_bearer_token(&headers);
        assert_eq!(result, Some("test_token_123".to_string()));
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(BearerAuthProvider::extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert_eq!(BearerAuthProvider::extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_extract_bearer_token_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());

        assert_eq!(BearerAuthProvider::extract_bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn valid_token_yields_driver_caller() {
        let (provider, tokens) = provider();
        let token = tokens.issue(2, 2).unwrap();

        let caller = provider
            .authenticate(&parts_with_auth(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(caller, Caller::driver(2, 2));
    }

    #[tokio::test]
    async fn absent_header_is_missing_credentials() {
        let (provider, _) = provider();
        assert!(matches!(
            provider.authenticate(&parts_with_auth(None)).await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_expired() {
        let (provider, tokens) = provider();
        let token = tokens.issue_at(1, 1, Utc::now() - Duration::hours(3)).unwrap();

        assert!(matches!(
            provider
                .authenticate(&parts_with_auth(Some(&format!("Bearer {token}"))))
                .await,
            Err(AuthError::Expired)
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let (provider, _) = provider();
        assert!(matches!(
            provider
                .authenticate(&parts_with_auth(Some("Bearer abc.def.ghi")))
                .await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
