//! Keyed storage for sensors.
//!
//! The store persists whatever it is given. Domain rules such as the
//! threshold ordering are enforced by [`crate::services::SensorService`]
//! before anything reaches this layer.

pub mod database;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Sensor;
use crate::error::StoreResult;

pub use database::DbSensorStore;
pub use memory::InMemorySensorStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// All stored sensors. `None` means the backend had no result set to
    /// read from, which is different from an empty collection.
    async fn list_all(&self) -> StoreResult<Option<Vec<Sensor>>>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sensor>>;

    async fn insert(&self, sensor: Sensor) -> StoreResult<()>;

    /// Overwrite the stored sensor that has the same id
    async fn replace(&self, sensor: Sensor) -> StoreResult<()>;

    /// No-op when the id is unknown
    async fn remove_by_id(&self, id: Uuid) -> StoreResult<()>;
}
