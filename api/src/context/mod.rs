use std::sync::Arc;

use transit_db::storage::Storage;

use crate::{
    auth::{AuthManager, BearerAuthProvider, CredentialVerifier, StoredCredentialVerifier, TokenIssuer},
    config::TransitApiConfig,
};

/// State shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<dyn Storage>,
    pub tokens: Arc<TokenIssuer>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub auth_manager: Arc<AuthManager>,
}

impl ApiContext {
    pub fn new(db: Arc<dyn Storage>, tokens: TokenIssuer) -> Self {
        let tokens = Arc::new(tokens);
        let auth_manager =
            AuthManager::new().with_provider(BearerAuthProvider::new(Arc::clone(&tokens)));

        Self {
            credentials: Arc::new(StoredCredentialVerifier::new(Arc::clone(&db))),
            db,
            tokens,
            auth_manager: Arc::new(auth_manager),
        }
    }

    pub fn from_config(config: &TransitApiConfig, db: Arc<dyn Storage>) -> anyhow::Result<Self> {
        let secret = config.jwt.get_jwt_secret()?;
        let ttl = config.token_ttl()?;

        Ok(Self::new(db, TokenIssuer::new(&secret, ttl)))
    }
}
