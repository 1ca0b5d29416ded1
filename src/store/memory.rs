//! In-memory sensor store.
//!
//! Used by the test suites and handy for local runs without a database.
//! Nothing survives a restart.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Sensor;
use crate::error::{StoreError, StoreResult};

use super::SensorStore;

#[derive(Debug, Default)]
pub struct InMemorySensorStore {
    sensors: RwLock<HashMap<Uuid, Sensor>>,
}

fn poison_err<T>(_: PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned
}

impl InMemorySensorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sensors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if a writer panicked.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.sensors.read().map_err(poison_err)?.len())
    }

    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if a writer panicked.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SensorStore for InMemorySensorStore {
    async fn list_all(&self) -> StoreResult<Option<Vec<Sensor>>> {
        let sensors = self.sensors.read().map_err(poison_err)?;
        let mut all: Vec<Sensor> = sensors.values().cloned().collect();
        all.sort_by_key(Sensor::creation_time);
        Ok(Some(all))
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sensor>> {
        let sensors = self.sensors.read().map_err(poison_err)?;
        Ok(sensors.get(&id).cloned())
    }

    async fn insert(&self, sensor: Sensor) -> StoreResult<()> {
        let mut sensors = self.sensors.write().map_err(poison_err)?;
        sensors.insert(sensor.id(), sensor);
        Ok(())
    }

    async fn replace(&self, sensor: Sensor) -> StoreResult<()> {
        let mut sensors = self.sensors.write().map_err(poison_err)?;
        sensors.insert(sensor.id(), sensor);
        Ok(())
    }

    async fn remove_by_id(&self, id: Uuid) -> StoreResult<()> {
        let mut sensors = self.sensors.write().map_err(poison_err)?;
        sensors.remove(&id);
        Ok(())
    }
}
