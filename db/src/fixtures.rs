//! Seed records loaded into storage at startup.
//!
//! [`Fixtures::demo`] is the built-in fleet of three buses and four stops.
//! [`Fixtures::from_file`] reads the same shape from a JSON document:
//!
//! ```json
//! { "drivers": [...], "buses": [...], "stops": [...], "routes": [...] }
//! ```

use std::{collections::HashSet, fmt::Display, path::Path};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use transit_common::views::BusStatus;

use crate::models::{DbBus, DbDriver, DbRoute, DbStop, DriverSecret};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixture file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("duplicate driver email {0}")]
    DuplicateEmail(String),

    #[error("driver {driver_id} is assigned to unknown bus {bus_id}")]
    UnknownDriverBus { driver_id: u32, bus_id: u32 },

    #[error("bus {bus_id} is assigned to both driver {first} and driver {second}")]
    SharedBus { bus_id: u32, first: u32, second: u32 },

    #[error("bus {bus_id} references unknown stop {stop_id}")]
    UnknownBusStop { bus_id: u32, stop_id: u32 },

    #[error("route references unknown bus {0}")]
    UnknownRouteBus(u32),

    #[error("route for bus {bus_id} references unknown stop {stop_id}")]
    UnknownRouteStop { bus_id: u32, stop_id: u32 },
}

/// Inconsistencies that are tolerated but worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureWarning {
    DriverNameMismatch {
        bus_id: u32,
        bus_driver: String,
        driver_name: String,
    },
}

impl Display for FixtureWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureWarning::DriverNameMismatch {
                bus_id,
                bus_driver,
                driver_name,
            } => write!(
                f,
                "bus {bus_id} lists driver {bus_driver:?} but is owned by {driver_name:?}"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub drivers: Vec<DbDriver>,

    #[serde(default)]
    pub buses: Vec<DbBus>,

    #[serde(default)]
    pub stops: Vec<DbStop>,

    #[serde(default)]
    pub routes: Vec<DbRoute>,
}

impl Fixtures {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Check referential integrity. Hard inconsistencies are errors; a
    /// denormalized driver name that disagrees with the owning driver is only
    /// reported as a warning.
    pub fn validate(&self) -> Result<Vec<FixtureWarning>, FixtureError> {
        unique_ids("driver", self.drivers.iter().map(|d| d.id))?;
        unique_ids("bus", self.buses.iter().map(|b| b.id))?;
        unique_ids("stop", self.stops.iter().map(|s| s.id))?;

        let mut emails = HashSet::new();
        for driver in &self.drivers {
            if !emails.insert(driver.email.as_str()) {
                return Err(FixtureError::DuplicateEmail(driver.email.clone()));
            }
        }

        let stop_ids: HashSet<u32> = self.stops.iter().map(|s| s.id).collect();

        for bus in &self.buses {
            for stop_id in [bus.current_stop, bus.next_stop] {
                if !stop_ids.contains(&stop_id) {
                    return Err(FixtureError::UnknownBusStop {
                        bus_id: bus.id,
                        stop_id,
                    });
                }
            }
        }

        let mut warnings = Vec::new();
        for (idx, driver) in self.drivers.iter().enumerate() {
            let bus = self
                .buses
                .iter()
                .find(|b| b.id == driver.bus_id)
                .ok_or(FixtureError::UnknownDriverBus {
                    driver_id: driver.id,
                    bus_id: driver.bus_id,
                })?;

            if let Some(other) = self.drivers[..idx].iter().find(|d| d.bus_id == driver.bus_id) {
                return Err(FixtureError::SharedBus {
                    bus_id: driver.bus_id,
                    first: other.id,
                    second: driver.id,
                });
            }

            if bus.driver != driver.name {
                warnings.push(FixtureWarning::DriverNameMismatch {
                    bus_id: bus.id,
                    bus_driver: bus.driver.clone(),
                    driver_name: driver.name.clone(),
                });
            }
        }

        for route in &self.routes {
            if !self.buses.iter().any(|b| b.id == route.bus_id) {
                return Err(FixtureError::UnknownRouteBus(route.bus_id));
            }

            if let Some(stop_id) = route.stops.iter().find(|id| !stop_ids.contains(id)) {
                return Err(FixtureError::UnknownRouteStop {
                    bus_id: route.bus_id,
                    stop_id: *stop_id,
                });
            }
        }

        Ok(warnings)
    }

    /// The demo fleet the mobile clients were built against.
    pub fn demo() -> Self {
        let now = Utc::now();

        let bus = |id: u32,
                   number: &str,
                   driver: &str,
                   current_stop: u32,
                   next_stop: u32,
                   capacity: u32,
                   current_passengers: u32,
                   status: BusStatus| DbBus {
            id,
            number: number.into(),
            driver: driver.into(),
            current_stop,
            next_stop,
            capacity,
            current_passengers,
            status,
            last_updated: now,
        };

        let driver = |id: u32, name: &str, email: &str, password: &str, profile_image: &str| {
            DbDriver {
                id,
                name: name.into(),
                email: email.into(),
                secret: DriverSecret::Password(password.into()),
                bus_id: id,
                profile_image: Some(profile_image.into()),
            }
        };

        let stop = |id: u32,
                    name: &str,
                    latitude: f64,
                    longitude: f64,
                    address: &str,
                    facilities: &[&str],
                    bus_lines: &[&str]| DbStop {
            id,
            name: name.into(),
            latitude,
            longitude,
            address: address.into(),
            facilities: facilities.iter().map(|s| s.to_string()).collect(),
            bus_lines: bus_lines.iter().map(|s| s.to_string()).collect(),
        };

        let route = |bus_id: u32, stops: [u32; 4], estimated_duration: u32, distance: f64, frequency: u32| {
            DbRoute {
                bus_id,
                stops: stops.to_vec(),
                estimated_duration,
                distance,
                frequency,
            }
        };

        Self {
            drivers: vec![
                driver(
                    1,
                    "John Doe",
                    "john@example.com",
                    "123456",
                    "https://images.unsplash.com/photo-1633332755192-727a05c4013d?w=400",
                ),
                driver(
                    2,
                    "Alice Smith",
                    "alice@example.com",
                    "password",
                    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400",
                ),
                driver(
                    3,
                    "Bob Wilson",
                    "bob@example.com",
                    "securepass",
                    "https://images.unsplash.com/photo-1599566150163-29194dcaad36?w=400",
                ),
            ],
            buses: vec![
                bus(1, "B101", "John Doe", 1, 2, 50, 32, BusStatus::OnRoute),
                bus(2, "B202", "Alice Smith", 3, 4, 45, 28, BusStatus::OnRoute),
                bus(3, "B303", "Bob Wilson", 2, 3, 50, 41, BusStatus::Stopped),
            ],
            stops: vec![
                stop(
                    1,
                    "Main Street Station",
                    40.7128,
                    -74.0060,
                    "123 Main St, New York, NY",
                    &["shelter", "seating", "lighting", "schedule_display"],
                    &["B101", "B202"],
                ),
                stop(
                    2,
                    "Broadway Junction",
                    40.7158,
                    -74.0020,
                    "456 Broadway, New York, NY",
                    &["shelter", "seating", "lighting"],
                    &["B101", "B303"],
                ),
                stop(
                    3,
                    "Central Park South",
                    40.7851,
                    -73.9683,
                    "789 Central Park S, New York, NY",
                    &["shelter", "seating", "lighting", "wifi"],
                    &["B202", "B303"],
                ),
                stop(
                    4,
                    "Fifth Avenue Plaza",
                    40.7769,
                    -73.9718,
                    "1010 5th Ave, New York, NY",
                    &["shelter", "seating", "lighting", "schedule_display", "wifi"],
                    &["B101", "B202", "B303"],
                ),
            ],
            routes: vec![
                route(1, [1, 2, 3, 4], 45, 12.5, 15),
                route(2, [3, 4, 1, 2], 40, 11.8, 20),
                route(3, [2, 3, 4, 1], 42, 12.1, 18),
            ],
        }
    }
}

fn unique_ids(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fixtures_are_consistent() {
        let warnings = Fixtures::demo().validate().unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn every_demo_driver_owns_a_distinct_bus() {
        let fixtures = Fixtures::demo();
        for driver in &fixtures.drivers {
            assert!(fixtures.buses.iter().any(|b| b.id == driver.bus_id));
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut fixtures = Fixtures::demo();
        fixtures.drivers[1].email = fixtures.drivers[0].email.clone();

        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::DuplicateEmail(email)) if email == "john@example.com"
        ));
    }

    #[test]
    fn duplicate_bus_id_is_rejected() {
        let mut fixtures = Fixtures::demo();
        fixtures.buses[2].id = 1;

        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::DuplicateId { kind: "bus", id: 1 })
        ));
    }

    #[test]
    fn bus_pointing_at_unknown_stop_is_rejected() {
        let mut fixtures = Fixtures::demo();
        fixtures.buses[0].next_stop = 99;

        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::UnknownBusStop { bus_id: 1, stop_id: 99 })
        ));
    }

    #[test]
    fn driver_without_bus_is_rejected() {
        let mut fixtures = Fixtures::demo();
        fixtures.drivers[2].bus_id = 42;

        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::UnknownDriverBus { driver_id: 3, bus_id: 42 })
        ));
    }

    #[test]
    fn two_drivers_on_one_bus_is_rejected() {
        let mut fixtures = Fixtures::demo();
        fixtures.drivers[1].bus_id = 1;

        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::SharedBus { bus_id: 1, first: 1, second: 2 })
        ));
    }

    #[test]
    fn route_with_unknown_stop_is_rejected() {
        let mut fixtures = Fixtures::demo();
        fixtures.routes[1].stops.push(17);

        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::UnknownRouteStop { bus_id: 2, stop_id: 17 })
        ));
    }

    #[test]
    fn renamed_driver_only_warns() {
        let mut fixtures = Fixtures::demo();
        fixtures.drivers[0].name = "Johnny Doe".into();

        let warnings = fixtures.validate().unwrap();
        assert_eq!(
            warnings,
            vec![FixtureWarning::DriverNameMismatch {
                bus_id: 1,
                bus_driver: "John Doe".into(),
                driver_name: "Johnny Doe".into(),
            }]
        );
    }

    #[test]
    fn parses_fixture_document() {
        let fixtures = Fixtures::from_json(
            r#"{
                "drivers": [{
                    "id": 7, "name": "Kim Lee", "email": "kim@example.com",
                    "password": "pw", "busId": 70
                }],
                "buses": [{
                    "id": 70, "number": "B700", "driver": "Kim Lee",
                    "currentStop": 1, "nextStop": 1, "capacity": 30,
                    "currentPassengers": 0, "status": "OUT_OF_SERVICE",
                    "lastUpdated": "2024-05-01T12:00:00Z"
                }],
                "stops": [{
                    "id": 1, "name": "Depot", "latitude": 1.0,
                    "longitude": 2.0, "address": "1 Depot Rd"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(fixtures.buses[0].status, BusStatus::OutOfService);
        assert!(fixtures.routes.is_empty());
        assert!(fixtures.stops[0].facilities.is_empty());
        assert!(fixtures.validate().unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(matches!(
            Fixtures::from_json("{ \"buses\": 3 }"),
            Err(FixtureError::Parse(_))
        ));
    }

    #[test]
    fn fixture_file_round_trips_the_demo_fleet() {
        let path = std::env::temp_dir().join(format!("transit-fixtures-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&Fixtures::demo()).unwrap()).unwrap();

        let loaded = Fixtures::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.drivers.len(), 3);
        assert_eq!(loaded.buses[2].number, "B303");
        assert_eq!(loaded.routes[1].stops, [3, 4, 1, 2]);
        assert!(loaded.drivers[0].secret.matches("123456"));
        assert!(loaded.validate().unwrap().is_empty());
    }

    #[test]
    fn missing_fixture_file_is_io_error() {
        assert!(matches!(
            Fixtures::from_file("/nonexistent/transit-fixtures.json"),
            Err(FixtureError::Io(_))
        ));
    }
}
