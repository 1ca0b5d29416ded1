//! Sensor Registry - sensor catalogue API with a read-only proxy to the
//! telemetry platform.
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod domain;
pub mod entity;
pub mod error;
pub mod platform;
pub mod routes;
pub mod services;
pub mod store;
