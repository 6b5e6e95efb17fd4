use serde::{Deserialize, Serialize};
use transit_common::views::BusRoute;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbRoute {
    pub bus_id: u32,
    pub stops: Vec<u32>,
    pub estimated_duration: u32,
    pub distance: f64,
    pub frequency: u32,
}

impl From<DbRoute> for BusRoute {
    fn from(value: DbRoute) -> Self {
        Self {
            bus_id: value.bus_id,
            stops: value.stops,
            estimated_duration: value.estimated_duration,
            distance: value.distance,
            frequency: value.frequency,
        }
    }
}
