use chrono::{Duration, Utc};
use clap::{Args, Parser};
use std::{net::SocketAddr, path::PathBuf};

#[derive(Clone, Debug, Parser)]
#[command(name = "transit-api")]
pub struct TransitApiConfig {
    #[clap(
        short,
        long,
        env = "TRANSIT_API_BIND_ADDR",
        default_value = "0.0.0.0:3000"
    )]
    pub bind_addr: SocketAddr,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    #[clap(flatten)]
    pub jwt: JwtSecretArgs,

    /// Lifetime of issued bearer tokens, in seconds.
    #[clap(long, env = "TRANSIT_API_TOKEN_TTL_SECS", default_value_t = 3600)]
    pub token_ttl_secs: u64,

    /// JSON file with `drivers`, `buses`, `stops` and `routes` to load instead
    /// of the built-in demo fleet.
    #[clap(long, env = "TRANSIT_API_FIXTURES_FILE")]
    pub fixtures_file: Option<PathBuf>,
}

impl TransitApiConfig {
    /// The token lifetime as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns an error if a token issued now would expire beyond the range
    /// of representable dates.
    pub fn token_ttl(&self) -> anyhow::Result<Duration> {
        i64::try_from(self.token_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| anyhow::anyhow!("token TTL of {}s is out of range", self.token_ttl_secs))
    }
}

/// Where the token signing secret comes from. Shared by the API server and
/// `transitctl` so both read the same flags and environment.
#[derive(Clone, Debug, Args)]
pub struct JwtSecretArgs {
    /// Shared secret used to sign and verify driver bearer tokens (HS256).
    ///
    /// Prefer `jwt_secret_file` so the secret does not end up in process
    /// listings or shell history.
    ///
    /// Takes precedence over `jwt_secret_file`.
    #[clap(long, env = "TRANSIT_API_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Path to a file holding the token signing secret. Surrounding
    /// whitespace is trimmed.
    #[clap(long, env = "TRANSIT_API_JWT_SECRET_FILE")]
    pub jwt_secret_file: Option<PathBuf>,
}

impl JwtSecretArgs {
    /// Get the token signing secret from either inline config or file.
    ///
    /// Checks `jwt_secret` first, then falls back to reading `jwt_secret_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither `jwt_secret` nor `jwt_secret_file` is configured
    /// - `jwt_secret_file` can't be read
    /// - The resulting secret is empty
    pub fn get_jwt_secret(&self) -> anyhow::Result<String> {
        let secret = if let Some(ref secret) = self.jwt_secret {
            secret.clone()
        } else if let Some(ref path) = self.jwt_secret_file {
            std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read JWT secret file: {}", e))?
                .trim()
                .to_string()
        } else {
            return Err(anyhow::anyhow!(
                "no JWT secret configured (set TRANSIT_API_JWT_SECRET or TRANSIT_API_JWT_SECRET_FILE)"
            ));
        };

        if secret.is_empty() {
            return Err(anyhow::anyhow!("configured JWT secret is empty"));
        }

        Ok(secret)
    }
}
