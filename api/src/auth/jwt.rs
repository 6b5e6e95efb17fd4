//! Bearer token issuance and verification for drivers.
//!
//! Tokens are HS256 JWTs signed with one shared secret from configuration.
//! The payload is `{id, busId, iat, exp}`; nothing is stored server-side, so
//! a token stays valid until `exp` regardless of what happens to the driver.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a driver bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverClaims {
    /// Driver id
    pub id: u32,
    /// The bus the driver may update
    pub bus_id: u32,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiry timestamp
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a token for `driver_id` valid from now for the configured TTL.
    pub fn issue(&self, driver_id: u32, bus_id: u32) -> Result<String, TokenError> {
        self.issue_at(driver_id, bus_id, Utc::now())
    }

    pub fn issue_at(
        &self,
        driver_id: u32,
        bus_id: u32,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::SigningFailed("token expiry is out of range".into()))?;

        self.sign(&DriverClaims {
            id: driver_id,
            bus_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Sign arbitrary claims. [`TokenIssuer::issue`] is the normal entry point.
    pub fn sign(&self, claims: &DriverClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Check signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> Result<DriverClaims, TokenError> {
        decode::<DriverClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
