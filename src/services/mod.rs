pub mod sensors;

pub use sensors::SensorService;
