use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use transit_common::views::{ApiErrorResponse, Bus, Lookup, Stop};
use transit_db::storage::{BusStore, StopStore};

use super::parse_id;
use crate::{context::ApiContext, error::ApiError};

const NO_BUS_ARRIVING: &str = "No bus arriving soon";

#[utoipa::path(
    get,
    path = "/stops",
    tags = ["stops"],
    responses((status = 200, description = "Every stop", body = Vec<Stop>))
)]
pub async fn list_stops(State(ctx): State<ApiContext>) -> Result<Json<Vec<Stop>>, ApiError> {
    let stops = StopStore::list(&*ctx.db).await?;
    Ok(Json(stops.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/stops/{id}",
    tags = ["stops"],
    params(("id" = u32, Path, description = "Stop id")),
    responses(
        (status = 200, description = "Resolved stop", body = Stop),
        (status = 404, description = "No stop with this id", body = ApiErrorResponse),
    )
)]
#[instrument(skip(ctx))]
pub async fn get_stop(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Stop>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::not_found("Stop"))?;
    let stop = StopStore::get(&*ctx.db, id)
        .await?
        .ok_or(ApiError::not_found("Stop"))?;

    Ok(Json(stop.into()))
}

/// Every bus heading to this stop next.
#[utoipa::path(
    get,
    path = "/stops/{id}/arrivals",
    tags = ["stops"],
    params(("id" = u32, Path, description = "Stop id")),
    responses((status = 200, description = "Buses whose next stop is this stop", body = Vec<Bus>))
)]
#[instrument(skip(ctx))]
pub async fn stop_arrivals(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Bus>>, ApiError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(Vec::new()));
    };

    let buses = ctx.db.arriving_at(id).await?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}

/// The first bus, by id, whose next stop is this stop. A miss is answered
/// with `200 {"message": "No bus arriving soon"}`.
#[utoipa::path(
    get,
    path = "/next-bus/{stopId}",
    tags = ["stops"],
    params(("stopId" = u32, Path, description = "Stop id")),
    responses((status = 200, description = "Next bus arriving, or a message when none is", body = Bus))
)]
#[instrument(skip(ctx))]
pub async fn next_bus(
    State(ctx): State<ApiContext>,
    Path(stop_id): Path<String>,
) -> Result<Json<Lookup<Bus>>, ApiError> {
    let next = match parse_id(&stop_id) {
        Some(stop_id) => ctx.db.arriving_at(stop_id).await?.into_iter().next(),
        None => None,
    };

    Ok(Json(Lookup::from_option(next.map(Into::into), NO_BUS_ARRIVING)))
}
