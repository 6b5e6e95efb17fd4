use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use transit_common::views::{Bus, BusStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbBus {
    pub id: u32,
    pub number: String,

    /// Denormalized driver name. Fixture validation only warns when it
    /// disagrees with the owning driver record.
    pub driver: String,

    pub current_stop: u32,
    pub next_stop: u32,
    pub capacity: u32,
    pub current_passengers: u32,

    #[serde(default)]
    pub status: BusStatus,

    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Display for DbBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbBus {{ id: {}, number: {}, current_stop: {}, next_stop: {} }}",
            self.id, self.number, self.current_stop, self.next_stop
        )
    }
}

impl DbBus {
    /// Overwrite the location fields in place and stamp the update time.
    pub fn apply(&mut self, update: &BusLocationUpdate) {
        self.current_stop = update.current_stop;
        self.next_stop = update.next_stop;
        self.current_passengers = update.current_passengers;
        self.last_updated = update.updated_at;
    }
}

impl From<DbBus> for Bus {
    fn from(value: DbBus) -> Self {
        Self {
            id: value.id,
            number: value.number,
            driver: value.driver,
            current_stop: value.current_stop,
            next_stop: value.next_stop,
            capacity: value.capacity,
            current_passengers: value.current_passengers,
            status: value.status,
            last_updated: value.last_updated,
        }
    }
}

/// The fields a driver's location update replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusLocationUpdate {
    pub current_stop: u32,
    pub next_stop: u32,
    pub current_passengers: u32,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus() -> DbBus {
        DbBus {
            id: 1,
            number: "B101".into(),
            driver: "John Doe".into(),
            current_stop: 1,
            next_stop: 2,
            capacity: 50,
            current_passengers: 32,
            status: BusStatus::OnRoute,
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn apply_replaces_location_fields_only() {
        let mut bus = bus();
        let now = Utc::now();
        bus.apply(&BusLocationUpdate {
            current_stop: 2,
            next_stop: 3,
            current_passengers: 40,
            updated_at: now,
        });

        assert_eq!(bus.current_stop, 2);
        assert_eq!(bus.next_stop, 3);
        assert_eq!(bus.current_passengers, 40);
        assert_eq!(bus.last_updated, now);
        assert_eq!(bus.capacity, 50);
        assert_eq!(bus.status, BusStatus::OnRoute);
        assert_eq!(bus.driver, "John Doe");
    }

    #[test]
    fn status_defaults_when_absent_from_fixture() {
        let bus: DbBus = serde_json::from_value(serde_json::json!({
            "id": 9,
            "number": "B909",
            "driver": "Nobody",
            "currentStop": 1,
            "nextStop": 2,
            "capacity": 10,
            "currentPassengers": 0
        }))
        .unwrap();

        assert_eq!(bus.status, BusStatus::OnRoute);
    }
}
