use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The loop of stops a bus services.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusRoute {
    pub bus_id: u32,

    /// Stop ids in the order the bus visits them.
    pub stops: Vec<u32>,

    /// Time to complete the loop, in minutes.
    pub estimated_duration: u32,

    /// Length of the loop, in kilometres.
    pub distance: f64,

    /// Minutes between departures.
    pub frequency: u32,
}
