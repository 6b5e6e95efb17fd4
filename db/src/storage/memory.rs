use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::{
    fixtures::Fixtures,
    models::{BusLocationUpdate, DbBus, DbDriver, DbRoute, DbStop},
    storage::{BusStore, DriverStore, RouteStore, StopStore, StoreError, Storage},
};

/// Process-memory storage seeded from [`Fixtures`].
///
/// Drivers, stops and routes never change after construction. Buses sit
/// behind a lock so a location update replaces a record atomically;
/// concurrent writers to the same bus are last-write-wins.
#[derive(Debug)]
pub struct MemoryStorage {
    drivers: Vec<DbDriver>,
    stops: BTreeMap<u32, DbStop>,
    routes: Vec<DbRoute>,
    buses: RwLock<BTreeMap<u32, DbBus>>,
}

impl MemoryStorage {
    /// Validate `fixtures` and take ownership of them.
    pub fn new(fixtures: Fixtures) -> Result<Self, StoreError> {
        for warning in fixtures.validate()? {
            warn!(%warning, "Fixture inconsistency");
        }

        let Fixtures {
            drivers,
            buses,
            stops,
            routes,
        } = fixtures;

        debug!(
            drivers = drivers.len(),
            buses = buses.len(),
            stops = stops.len(),
            routes = routes.len(),
            "Loaded fixtures into memory"
        );

        Ok(Self {
            drivers,
            stops: stops.into_iter().map(|s| (s.id, s)).collect(),
            routes,
            buses: RwLock::new(buses.into_iter().map(|b| (b.id, b)).collect()),
        })
    }

    pub fn demo() -> Result<Self, StoreError> {
        Self::new(Fixtures::demo())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl BusStore for MemoryStorage {
    async fn list(&self) -> Result<Vec<DbBus>, StoreError> {
        Ok(self.buses.read().await.values().cloned().collect())
    }

    async fn get(&self, id: u32) -> Result<Option<DbBus>, StoreError> {
        Ok(self.buses.read().await.get(&id).cloned())
    }

    async fn arriving_at(&self, stop_id: u32) -> Result<Vec<DbBus>, StoreError> {
        Ok(self
            .buses
            .read()
            .await
            .values()
            .filter(|b| b.next_stop == stop_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn update_location(
        &self,
        id: u32,
        update: BusLocationUpdate,
    ) -> Result<DbBus, StoreError> {
        let mut buses = self.buses.write().await;
        let bus = buses.get_mut(&id).ok_or(StoreError::NotFound)?;
        bus.apply(&update);
        debug!(%bus, "Bus location updated");
        Ok(bus.clone())
    }
}

#[async_trait]
impl StopStore for MemoryStorage {
    async fn list(&self) -> Result<Vec<DbStop>, StoreError> {
        Ok(self.stops.values().cloned().collect())
    }

    async fn get(&self, id: u32) -> Result<Option<DbStop>, StoreError> {
        Ok(self.stops.get(&id).cloned())
    }
}

#[async_trait]
impl RouteStore for MemoryStorage {
    async fn get_for_bus(&self, bus_id: u32) -> Result<Option<DbRoute>, StoreError> {
        Ok(self.routes.iter().find(|r| r.bus_id == bus_id).cloned())
    }
}

#[async_trait]
impl DriverStore for MemoryStorage {
    async fn get_by_email(&self, email: &str) -> Result<Option<DbDriver>, StoreError> {
        Ok(self.drivers.iter().find(|d| d.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::fixtures::FixtureError;

    fn update(current_stop: u32, next_stop: u32, current_passengers: u32) -> BusLocationUpdate {
        BusLocationUpdate {
            current_stop,
            next_stop,
            current_passengers,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lists_buses_in_id_order() {
        let stg = MemoryStorage::demo().unwrap();
        let ids: Vec<u32> = BusStore::list(&stg).await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_location_mutates_in_place() {
        let stg = MemoryStorage::demo().unwrap();

        let updated = stg.update_location(1, update(2, 3, 40)).await.unwrap();
        assert_eq!(
            (updated.current_stop, updated.next_stop, updated.current_passengers),
            (2, 3, 40)
        );

        let reread = BusStore::get(&stg, 1).await.unwrap().unwrap();
        assert_eq!(reread, updated);
    }

    #[tokio::test]
    async fn update_location_for_unknown_bus_changes_nothing() {
        let stg = MemoryStorage::demo().unwrap();
        let before = BusStore::list(&stg).await.unwrap();

        let result = stg.update_location(99, update(2, 3, 40)).await;
        assert!(matches!(result, Err(StoreError::NotFound)));

        let after = BusStore::list(&stg).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn concurrent_updates_are_last_write_wins() {
        let stg = Arc::new(MemoryStorage::demo().unwrap());

        let a = {
            let stg = stg.clone();
            tokio::spawn(async move { stg.update_location(1, update(2, 3, 10)).await })
        };
        let b = {
            let stg = stg.clone();
            tokio::spawn(async move { stg.update_location(1, update(4, 1, 20)).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let bus = BusStore::get(&*stg, 1).await.unwrap().unwrap();
        let fields = (bus.current_stop, bus.next_stop, bus.current_passengers);
        assert!(fields == (2, 3, 10) || fields == (4, 1, 20), "merged record: {fields:?}");
    }

    #[tokio::test]
    async fn arriving_at_filters_on_next_stop() {
        let stg = MemoryStorage::demo().unwrap();

        let arriving = stg.arriving_at(3).await.unwrap();
        assert_eq!(arriving.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3]);

        assert!(stg.arriving_at(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn route_lookup_matches_on_bus_id() {
        let stg = MemoryStorage::demo().unwrap();

        let route = stg.get_for_bus(2).await.unwrap().unwrap();
        assert_eq!(route.bus_id, 2);
        assert_eq!(route.stops, vec![3, 4, 1, 2]);

        assert!(stg.get_for_bus(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn driver_lookup_by_email_is_exact() {
        let stg = MemoryStorage::demo().unwrap();

        let driver = stg.get_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(driver.bus_id, 2);

        assert!(stg.get_by_email("Alice@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_fixtures_are_refused() {
        let mut fixtures = Fixtures::demo();
        fixtures.buses[0].current_stop = 50;

        let result = MemoryStorage::new(fixtures);
        assert!(matches!(
            result,
            Err(StoreError::Fixture(FixtureError::UnknownBusStop { .. }))
        ));
    }
}
