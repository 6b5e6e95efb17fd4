use chrono::Duration;
use clap::Parser;
use transit_api::{auth::TokenIssuer, config::JwtSecretArgs};

fn token_issuer(secret: &JwtSecretArgs, ttl: Duration) -> anyhow::Result<TokenIssuer> {
    Ok(TokenIssuer::new(&secret.get_jwt_secret()?, ttl))
}

#[derive(Clone, Parser)]
pub struct IssueTokenParams {
    #[clap(short, long)]
    pub driver_id: u32,

    #[clap(short, long)]
    pub bus_id: u32,

    #[clap(long, env = "TRANSIT_API_TOKEN_TTL_SECS", default_value_t = 3600)]
    pub ttl_secs: u32,

    #[clap(flatten)]
    pub secret: JwtSecretArgs,
}

#[derive(Clone, Parser)]
pub struct InspectTokenParams {
    pub token: String,

    #[clap(flatten)]
    pub secret: JwtSecretArgs,
}

pub fn issue_token(
    IssueTokenParams {
        driver_id,
        bus_id,
        ttl_secs,
        secret,
    }: IssueTokenParams,
) -> anyhow::Result<String> {
    let issuer = token_issuer(&secret, Duration::seconds(i64::from(ttl_secs)))?;
    Ok(issuer.issue(driver_id, bus_id)?)
}

pub fn inspect_token(InspectTokenParams { token, secret }: InspectTokenParams) -> anyhow::Result<String> {
    // TTL only matters when issuing.
    let issuer = token_issuer(&secret, Duration::zero())?;
    let claims = issuer.verify(token.trim())?;
    Ok(serde_json::to_string_pretty(&claims)?)
}
