use axum::extract::State;

use crate::{context::ApiContext, error::ApiError};

pub mod auth;
pub mod buses;
pub mod driver;
pub mod routes;
pub mod stops;


#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses((status = 200, description = "Service is healthy", body = String))
)]
pub async fn health_check(State(ctx): State<ApiContext>) -> Result<&'static str, ApiError> {
    ctx.db.ping().await?;
    Ok("Healthy")
}

/// Parse a numeric id from a path segment. Anything that is not a
/// non-negative integer matches no record.
pub(crate) fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
