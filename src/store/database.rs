use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::domain::Sensor;
use crate::entity::sensors;
use crate::error::StoreResult;

use super::SensorStore;

/// Sensor store backed by a sea-orm connection (Postgres or SQLite)
#[derive(Clone)]
pub struct DbSensorStore {
    db: DatabaseConnection,
}

impl DbSensorStore {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<sensors::Model> for Sensor {
    fn from(m: sensors::Model) -> Self {
        Self::restore(
            m.id,
            m.name,
            m.location,
            m.creation_time,
            m.upper_warning,
            m.lower_warning,
        )
    }
}

impl From<&Sensor> for sensors::ActiveModel {
    fn from(s: &Sensor) -> Self {
        Self {
            id: Set(s.id()),
            name: Set(s.name().map(str::to_string)),
            location: Set(s.location().map(str::to_string)),
            creation_time: Set(s.creation_time()),
            upper_warning: Set(s.upper_warning()),
            lower_warning: Set(s.lower_warning()),
        }
    }
}

#[async_trait]
impl SensorStore for DbSensorStore {
    async fn list_all(&self) -> StoreResult<Option<Vec<Sensor>>> {
        let rows = sensors::Entity::find()
            .order_by_asc(sensors::Column::CreationTime)
            .all(&self.db)
            .await?;

        Ok(Some(rows.into_iter().map(Sensor::from).collect()))
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sensor>> {
        let row = sensors::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Sensor::from))
    }

    async fn insert(&self, sensor: Sensor) -> StoreResult<()> {
        sensors::Entity::insert(sensors::ActiveModel::from(&sensor))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn replace(&self, sensor: Sensor) -> StoreResult<()> {
        sensors::ActiveModel::from(&sensor).update(&self.db).await?;
        Ok(())
    }

    async fn remove_by_id(&self, id: Uuid) -> StoreResult<()> {
        let result = sensors::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(sensor_id = %id, rows = result.rows_affected, "Deleted sensor rows");
        Ok(())
    }
}
