use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, instrument};
use transit_common::{
    params::AuthLoginParams,
    views::{ApiErrorResponse, AuthLoginResponse},
};

use crate::{context::ApiContext, error::ApiError};

#[utoipa::path(
    post,
    path = "/login",
    tags = ["auth"],
    request_body(content = AuthLoginParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Successful login", body = AuthLoginResponse),
        (status = 401, description = "Unknown email or wrong secret", body = ApiErrorResponse),
        (status = 422, description = "Malformed login body", body = ApiErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn auth_login(
    State(ctx): State<ApiContext>,
    body: Result<Json<AuthLoginParams>, JsonRejection>,
) -> Result<Json<AuthLoginResponse>, ApiError> {
    let Json(params) = body?;

    let driver = ctx
        .credentials
        .verify(&params.email, &params.password)
        .await?;

    let token = ctx
        .tokens
        .issue(driver.id, driver.bus_id)
        .map_err(anyhow::Error::from)?;

    info!(driver_id = driver.id, bus_id = driver.bus_id, "Driver logged in");

    Ok(Json(AuthLoginResponse {
        message: "Login successful".into(),
        token,
        driver: driver.into(),
    }))
}
