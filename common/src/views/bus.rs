use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BusRoute, Stop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusStatus {
    /// The bus is driving its route.
    #[default]
    OnRoute,

    /// The bus is stationary at a stop.
    Stopped,

    /// The bus is not taking passengers.
    OutOfService,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    /// The unique identifier for this bus.
    pub id: u32,

    /// Line number label shown to riders, e.g. `B101`.
    pub number: String,

    /// Name of the driver. Copied from the driver record, not linked to it.
    pub driver: String,

    pub current_stop: u32,
    pub next_stop: u32,
    pub capacity: u32,
    pub current_passengers: u32,
    pub status: BusStatus,
    pub last_updated: DateTime<Utc>,
}

/// Response for a successful location update.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateLocationResponse {
    pub message: String,
    pub bus: Bus,
}

/// A bus joined with the stops and route it references.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusOverview {
    pub bus: Bus,

    /// The stop `bus.current_stop` points at, if it exists.
    pub current_stop: Option<Stop>,

    /// The stop `bus.next_stop` points at, if it exists.
    pub next_stop: Option<Stop>,

    pub route: Option<BusRoute>,

    /// The route's stops, in route order.
    pub route_stops: Vec<Stop>,
}
