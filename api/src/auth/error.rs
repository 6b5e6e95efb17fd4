use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credentials expired")]
    Expired,

    #[error(transparent)]
    Storage(#[from] transit_db::storage::StoreError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<super::jwt::TokenError> for AuthError {
    fn from(err: super::jwt::TokenError) -> Self {
        match err {
            super::jwt::TokenError::Expired => AuthError::Expired,
            super::jwt::TokenError::Invalid(_) => AuthError::InvalidCredentials,
            super::jwt::TokenError::SigningFailed(reason) => {
                AuthError::Other(anyhow::anyhow!("token signing failed: {reason}"))
            }
        }
    }
}
