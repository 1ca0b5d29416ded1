mod client;
mod models;

pub use client::{PlatformClient, PlatformError, build_url};
pub use models::{PlatformOutcome, PlatformQueryParameters, PlatformReading};
