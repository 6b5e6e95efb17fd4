use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use transit_common::views::{BusRoute, Lookup};
use transit_db::storage::RouteStore;

use super::parse_id;
use crate::{context::ApiContext, error::ApiError};

const NO_ROUTE: &str = "No bus in this route";

/// The route serviced by a bus. A miss is answered with
/// `200 {"message": "No bus in this route"}` for compatibility with the
/// mobile clients.
#[utoipa::path(
    get,
    path = "/routes/{busId}",
    tags = ["routes"],
    params(("busId" = u32, Path, description = "Bus id")),
    responses((status = 200, description = "The bus's route, or a message when it has none", body = BusRoute))
)]
#[instrument(skip(ctx))]
pub async fn get_route(
    State(ctx): State<ApiContext>,
    Path(bus_id): Path<String>,
) -> Result<Json<Lookup<BusRoute>>, ApiError> {
    let route = match parse_id(&bus_id) {
        Some(bus_id) => ctx.db.get_for_bus(bus_id).await?,
        None => None,
    };

    Ok(Json(Lookup::from_option(route.map(Into::into), NO_ROUTE)))
}
