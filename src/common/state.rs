use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::platform::PlatformClient;
use crate::services::SensorService;
use crate::store::SensorStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sensors: Arc<SensorService>,
    pub platform_client: Arc<PlatformClient>,
    /// Cancelled on shutdown; in-flight platform calls derive child tokens from it
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SensorStore>,
        config: Config,
        platform_client: PlatformClient,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sensors: Arc::new(SensorService::new(store)),
            platform_client: Arc::new(platform_client),
            shutdown,
        }
    }
}
