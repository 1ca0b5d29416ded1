use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{SensorError, SensorResult};

pub const INVERTED_THRESHOLDS_MESSAGE: &str = "UpperWarning cannot be lower than LowerWarning";

/// Warning band of a sensor. Can only be built with `upper >= lower`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    upper: f64,
    lower: f64,
}

impl Thresholds {
    /// # Errors
    ///
    /// Returns `SensorError::Validation` when `upper < lower` or either bound is NaN.
    pub fn new(upper: f64, lower: f64) -> SensorResult<Self> {
        match upper.partial_cmp(&lower) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(Self { upper, lower }),
            Some(Ordering::Less) | None => Err(SensorError::Validation(
                INVERTED_THRESHOLDS_MESSAGE.to_string(),
            )),
        }
    }

    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }
}

/// Persisted sensor. Identity and creation time are fixed at construction;
/// everything else changes only through [`Sensor::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    id: Uuid,
    name: Option<String>,
    location: Option<String>,
    creation_time: DateTime<Utc>,
    thresholds: Thresholds,
}

impl Sensor {
    /// Build a new sensor from caller input.
    ///
    /// # Errors
    ///
    /// Returns `SensorError::Validation` if the input thresholds are inverted.
    pub fn new(id: Uuid, creation_time: DateTime<Utc>, input: SensorInput) -> SensorResult<Self> {
        let thresholds = input.thresholds()?;
        Ok(Self {
            id,
            name: input.name,
            location: input.location,
            creation_time,
            thresholds,
        })
    }

    /// Rehydrate a sensor exactly as it was stored. Storage does not enforce
    /// the threshold ordering, so neither does this.
    #[must_use]
    pub const fn restore(
        id: Uuid,
        name: Option<String>,
        location: Option<String>,
        creation_time: DateTime<Utc>,
        upper_warning: f64,
        lower_warning: f64,
    ) -> Self {
        Self {
            id,
            name,
            location,
            creation_time,
            thresholds: Thresholds {
                upper: upper_warning,
                lower: lower_warning,
            },
        }
    }

    /// Overwrite name, location and thresholds. The sensor is left untouched
    /// when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `SensorError::Validation` if the input thresholds are inverted.
    pub fn apply(&mut self, input: SensorInput) -> SensorResult<()> {
        let thresholds = input.thresholds()?;
        self.name = input.name;
        self.location = input.location;
        self.thresholds = thresholds;
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub const fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    #[must_use]
    pub const fn upper_warning(&self) -> f64 {
        self.thresholds.upper
    }

    #[must_use]
    pub const fn lower_warning(&self) -> f64 {
        self.thresholds.lower
    }
}

/// Sensor as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorView {
    pub id: Uuid,
    pub name: Option<String>,
    pub location: Option<String>,
    pub creation_time: DateTime<Utc>,
    pub upper_warning: f64,
    pub lower_warning: f64,
}

impl From<&Sensor> for SensorView {
    fn from(sensor: &Sensor) -> Self {
        Self {
            id: sensor.id,
            name: sensor.name.clone(),
            location: sensor.location.clone(),
            creation_time: sensor.creation_time,
            upper_warning: sensor.thresholds.upper,
            lower_warning: sensor.thresholds.lower,
        }
    }
}

/// Create/update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorInput {
    pub name: Option<String>,
    pub location: Option<String>,
    /// Defaults to the largest finite value (no upper bound)
    #[serde(default = "unbounded_upper")]
    pub upper_warning: f64,
    /// Defaults to the smallest finite value (no lower bound)
    #[serde(default = "unbounded_lower")]
    pub lower_warning: f64,
}

const fn unbounded_upper() -> f64 {
    f64::MAX
}

const fn unbounded_lower() -> f64 {
    f64::MIN
}

impl SensorInput {
    /// # Errors
    ///
    /// Returns `SensorError::Validation` if the thresholds are inverted.
    pub fn thresholds(&self) -> SensorResult<Thresholds> {
        Thresholds::new(self.upper_warning, self.lower_warning)
    }
}
