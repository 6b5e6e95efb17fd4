use serde::{Deserialize, Serialize};
use transit_common::views::Stop;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStop {
    pub id: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,

    #[serde(default)]
    pub facilities: Vec<String>,

    #[serde(default)]
    pub bus_lines: Vec<String>,
}

impl From<DbStop> for Stop {
    fn from(value: DbStop) -> Self {
        Self {
            id: value.id,
            name: value.name,
            latitude: value.latitude,
            longitude: value.longitude,
            address: value.address,
            facilities: value.facilities,
            bus_lines: value.bus_lines,
        }
    }
}
