use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use transit_common::views::{ApiErrorResponse, Bus, BusOverview, Stop};
use transit_db::storage::{BusStore, RouteStore, StopStore};

use super::parse_id;
use crate::{context::ApiContext, error::ApiError};

#[utoipa::path(
    get,
    path = "/buses",
    tags = ["buses"],
    responses((status = 200, description = "Every bus in the fleet", body = Vec<Bus>))
)]
pub async fn list_buses(State(ctx): State<ApiContext>) -> Result<Json<Vec<Bus>>, ApiError> {
    let buses = BusStore::list(&*ctx.db).await?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/bus/{id}",
    tags = ["buses"],
    params(("id" = u32, Path, description = "Bus id")),
    responses(
        (status = 200, description = "Resolved bus", body = Bus),
        (status = 404, description = "No bus with this id", body = ApiErrorResponse),
    )
)]
#[instrument(skip(ctx))]
pub async fn get_bus(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Bus>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::not_found("Bus"))?;
    let bus = BusStore::get(&*ctx.db, id)
        .await?
        .ok_or(ApiError::not_found("Bus"))?;

    Ok(Json(bus.into()))
}

/// A bus together with the stops and route it references, in the shape the
/// bus detail screen renders.
#[utoipa::path(
    get,
    path = "/bus/{id}/overview",
    tags = ["buses"],
    params(("id" = u32, Path, description = "Bus id")),
    responses(
        (status = 200, description = "Bus joined with its stops and route", body = BusOverview),
        (status = 404, description = "No bus with this id", body = ApiErrorResponse),
    )
)]
#[instrument(skip(ctx))]
pub async fn bus_overview(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<BusOverview>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::not_found("Bus"))?;
    let bus = BusStore::get(&*ctx.db, id)
        .await?
        .ok_or(ApiError::not_found("Bus"))?;

    let current_stop = StopStore::get(&*ctx.db, bus.current_stop).await?;
    let next_stop = StopStore::get(&*ctx.db, bus.next_stop).await?;
    let route = ctx.db.get_for_bus(bus.id).await?;

    let mut route_stops: Vec<Stop> = Vec::new();
    if let Some(route) = &route {
        for stop_id in &route.stops {
            if let Some(stop) = StopStore::get(&*ctx.db, *stop_id).await? {
                route_stops.push(stop.into());
            }
        }
    }

    Ok(Json(BusOverview {
        bus: bus.into(),
        current_stop: current_stop.map(Into::into),
        next_stop: next_stop.map(Into::into),
        route: route.map(Into::into),
        route_stops,
    }))
}
