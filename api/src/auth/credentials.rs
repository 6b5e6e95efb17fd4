use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use tracing::{debug, instrument};
use transit_db::{
    models::DbDriver,
    storage::{DriverStore, Storage},
};

use super::error::AuthError;

const DUMMY_COST: u32 = if cfg!(test) { 4 } else { bcrypt::DEFAULT_COST };

/// Hash checked whenever a login attempt would otherwise skip bcrypt, so
/// every attempt costs one verification.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| bcrypt::hash("transit-dummy-secret", DUMMY_COST).ok());

fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = bcrypt::verify(password, hash);
    }
}

/// Checks a driver's login credentials.
///
/// Every failure is reported as [`AuthError::InvalidCredentials`], whether
/// the email is unknown or the secret is wrong.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<DbDriver, AuthError>;
}

/// Verifies against driver records in storage, using whichever secret form
/// the record carries (plaintext or bcrypt).
pub struct StoredCredentialVerifier {
    db: Arc<dyn Storage>,
}

impl StoredCredentialVerifier {
    pub fn new(db: Arc<dyn Storage>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialVerifier for StoredCredentialVerifier {
    #[instrument(skip(self, password))]
    async fn verify(&self, email: &str, password: &str) -> Result<DbDriver, AuthError> {
        let Some(driver) = DriverStore::get_by_email(&*self.db, email).await? else {
            debug!("No driver with this email");
            verify_dummy(password);
            return Err(AuthError::InvalidCredentials);
        };

        if driver.secret.plaintext().is_some() {
            verify_dummy(password);
        }

        if !driver.secret.matches(password) {
            debug!(driver_id = driver.id, "Secret mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        debug!(%driver, "Credentials accepted");
        Ok(driver)
    }
}
