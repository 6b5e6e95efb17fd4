use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;
use transit_common::views::Driver;

/// How a driver's secret is stored.
///
/// Fixtures carry either a `password` key (plaintext, kept for compatibility
/// with the demo data) or a `passwordHash` key (bcrypt).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriverSecret {
    Password(String),
    PasswordHash(String),
}

impl DriverSecret {
    /// Check a candidate secret. Plaintext comparison is exact and
    /// case-sensitive.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            DriverSecret::Password(expected) => constant_time_eq(expected, candidate),
            DriverSecret::PasswordHash(hash) => match bcrypt::verify(candidate, hash) {
                Ok(matches) => matches,
                Err(e) => {
                    debug!(error = %e, "Stored bcrypt hash could not be verified");
                    false
                }
            },
        }
    }

    /// The plaintext secret, if this secret is not hashed.
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            DriverSecret::Password(password) => Some(password),
            DriverSecret::PasswordHash(_) => None,
        }
    }
}

impl std::fmt::Debug for DriverSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverSecret::Password(_) => f.write_str("Password(<redacted>)"),
            DriverSecret::PasswordHash(_) => f.write_str("PasswordHash(<redacted>)"),
        }
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbDriver {
    pub id: u32,
    pub name: String,
    pub email: String,

    #[serde(flatten)]
    pub secret: DriverSecret,

    pub bus_id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Display for DbDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbDriver {{ id: {}, name: {}, email: {}, bus_id: {} }}",
            self.id, self.name, self.email, self.bus_id
        )
    }
}

impl From<DbDriver> for Driver {
    fn from(value: DbDriver) -> Self {
        Self {
            id: value.id,
            password: value.secret.plaintext().map(str::to_string),
            name: value.name,
            email: value.email,
            bus_id: value.bus_id,
            profile_image: value.profile_image,
        }
    }
}
