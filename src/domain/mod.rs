mod sensor;

pub use sensor::{INVERTED_THRESHOLDS_MESSAGE, Sensor, SensorInput, SensorView, Thresholds};
