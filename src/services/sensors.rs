use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Sensor, SensorInput, SensorView};
use crate::error::SensorResult;
use crate::store::SensorStore;

/// Sensor CRUD on top of a [`SensorStore`].
///
/// Threshold validation happens here, before the store is touched. A missing
/// sensor is reported as `None`/`false`, never as an error, so callers can
/// tell it apart from a validation failure.
pub struct SensorService {
    store: Arc<dyn SensorStore>,
}

impl SensorService {
    pub fn new(store: Arc<dyn SensorStore>) -> Self {
        Self { store }
    }

    /// List all sensors. `None` when the store had no result set at all.
    pub async fn list_sensors(&self) -> SensorResult<Option<Vec<SensorView>>> {
        debug!("Listing sensors");

        let Some(sensors) = self.store.list_all().await? else {
            return Ok(None);
        };

        info!(count = sensors.len(), "Listed sensors");
        Ok(Some(sensors.iter().map(SensorView::from).collect()))
    }

    pub async fn get_sensor(&self, id: Uuid) -> SensorResult<Option<SensorView>> {
        debug!(sensor_id = %id, "Getting sensor");

        let sensor = self.store.get_by_id(id).await?;
        Ok(sensor.as_ref().map(SensorView::from))
    }

    /// Create a sensor with a fresh id and the current time as creation time
    pub async fn create_sensor(&self, input: SensorInput) -> SensorResult<Uuid> {
        debug!(name = ?input.name, "Creating sensor");

        // Microsecond precision survives a round trip through every backend
        let creation_time = Utc::now().trunc_subsecs(6);
        let sensor = Sensor::new(Uuid::new_v4(), creation_time, input)?;
        let id = sensor.id();

        self.store.insert(sensor).await?;

        info!(sensor_id = %id, "Sensor created successfully");
        Ok(id)
    }

    /// Returns `false` if no sensor has this id
    pub async fn update_sensor(&self, id: Uuid, input: SensorInput) -> SensorResult<bool> {
        debug!(sensor_id = %id, "Updating sensor");

        input.thresholds()?;

        let Some(mut sensor) = self.store.get_by_id(id).await? else {
            debug!(sensor_id = %id, "Sensor not found for update");
            return Ok(false);
        };

        sensor.apply(input)?;
        self.store.replace(sensor).await?;

        info!(sensor_id = %id, "Sensor updated successfully");
        Ok(true)
    }

    /// Returns `false` if no sensor has this id
    pub async fn delete_sensor(&self, id: Uuid) -> SensorResult<bool> {
        debug!(sensor_id = %id, "Deleting sensor");

        if self.store.get_by_id(id).await?.is_none() {
            debug!(sensor_id = %id, "Sensor not found for delete");
            return Ok(false);
        }

        self.store.remove_by_id(id).await?;

        info!(sensor_id = %id, "Sensor deleted successfully");
        Ok(true)
    }
}
