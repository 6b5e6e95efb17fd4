use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use tracing::{info, instrument};
use transit_common::{
    params::UpdateLocationParams,
    views::{ApiErrorResponse, Bus, UpdateLocationResponse},
};
use transit_db::{
    models::BusLocationUpdate,
    storage::{BusStore, StopStore, StoreError, Storage},
};

use crate::{auth::Auth, context::ApiContext, error::ApiError};

/// The bus assigned to the authenticated driver.
#[utoipa::path(
    get,
    path = "/driver/bus",
    tags = ["driver"],
    responses(
        (status = 200, description = "The driver's bus", body = Bus),
        (status = 401, description = "Invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "No token provided", body = ApiErrorResponse),
        (status = 404, description = "The token's bus does not exist", body = ApiErrorResponse),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all)]
pub async fn driver_bus(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
) -> Result<Json<Bus>, ApiError> {
    let bus = BusStore::get(&*ctx.db, caller.bus_id)
        .await?
        .ok_or(ApiError::not_found("Bus"))?;

    Ok(Json(bus.into()))
}

/// Apply a location update to the authenticated driver's bus.
///
/// The bus is the one named in the token; the driver cannot address any
/// other bus.
#[utoipa::path(
    put,
    path = "/driver/update-location",
    tags = ["driver"],
    request_body(content = UpdateLocationParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Bus location updated", body = UpdateLocationResponse),
        (status = 401, description = "Invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "No token provided", body = ApiErrorResponse),
        (status = 404, description = "The token's bus does not exist", body = ApiErrorResponse),
        (status = 422, description = "Unknown stop, negative passenger count or malformed body", body = ApiErrorResponse),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all)]
pub async fn update_location(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    body: Result<Json<UpdateLocationParams>, JsonRejection>,
) -> Result<Json<UpdateLocationResponse>, ApiError> {
    let bus_id = caller.bus_id;

    if BusStore::get(&*ctx.db, bus_id).await?.is_none() {
        return Err(ApiError::not_found("Bus"));
    }

    let Json(params) = body?;
    let update = validate_update(&*ctx.db, params).await?;

    let bus = ctx
        .db
        .update_location(bus_id, update)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::not_found("Bus"),
            e => e.into(),
        })?;

    info!(
        driver_id = caller.driver_id,
        bus_id,
        current_stop = bus.current_stop,
        next_stop = bus.next_stop,
        current_passengers = bus.current_passengers,
        "Bus location updated"
    );

    Ok(Json(UpdateLocationResponse {
        message: "Bus location updated".into(),
        bus: bus.into(),
    }))
}

async fn validate_update(
    db: &dyn Storage,
    params: UpdateLocationParams,
) -> Result<BusLocationUpdate, ApiError> {
    let current_passengers = u32::try_from(params.current_passengers).map_err(|_| {
        ApiError::validation(format!(
            "currentPassengers must be between 0 and {}",
            u32::MAX
        ))
    })?;

    for (field, stop_id) in [
        ("currentStop", params.current_stop),
        ("nextStop", params.next_stop),
    ] {
        if StopStore::get(db, stop_id).await?.is_none() {
            return Err(ApiError::validation(format!(
                "{field} {stop_id} is not a known stop"
            )));
        }
    }

    Ok(BusLocationUpdate {
        current_stop: params.current_stop,
        next_stop: params.next_stop,
        current_passengers,
        updated_at: Utc::now(),
    })
}
