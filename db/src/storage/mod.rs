use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    fixtures::FixtureError,
    models::{BusLocationUpdate, DbBus, DbDriver, DbRoute, DbStop},
};

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

#[async_trait]
pub trait Storage:
    BusStore + StopStore + RouteStore + DriverStore + Debug + Send + Sync + 'static
{
    async fn ping(&self) -> Result<(), StoreError>;
}

/// The fleet store: the only mutable records in the system.
#[async_trait]
pub trait BusStore {
    async fn list(&self) -> Result<Vec<DbBus>, StoreError>;
    async fn get(&self, id: u32) -> Result<Option<DbBus>, StoreError>;

    /// All buses whose next stop is `stop_id`, in id order.
    async fn arriving_at(&self, stop_id: u32) -> Result<Vec<DbBus>, StoreError>;

    /// Replace a bus's location fields in place and return the updated record.
    /// Returns [`StoreError::NotFound`] without touching anything if the bus
    /// does not exist.
    async fn update_location(
        &self,
        id: u32,
        update: BusLocationUpdate,
    ) -> Result<DbBus, StoreError>;
}

#[async_trait]
pub trait StopStore {
    async fn list(&self) -> Result<Vec<DbStop>, StoreError>;
    async fn get(&self, id: u32) -> Result<Option<DbStop>, StoreError>;
}

#[async_trait]
pub trait RouteStore {
    async fn get_for_bus(&self, bus_id: u32) -> Result<Option<DbRoute>, StoreError>;
}

#[async_trait]
pub trait DriverStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<DbDriver>, StoreError>;
}
