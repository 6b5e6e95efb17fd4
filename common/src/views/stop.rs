use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// The unique identifier for this stop.
    pub id: u32,

    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,

    /// Amenities available at the stop, e.g. `shelter` or `wifi`.
    pub facilities: Vec<String>,

    /// Line number labels of the buses serving this stop.
    pub bus_lines: Vec<String>,
}
