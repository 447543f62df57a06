use std::sync::Arc;

use backend_domain::ports::AlertService;
use backend_domain::{Detector, RuntimeConfig};

use crate::Metrics;

/// Entries accepted in one detection request.
pub const MAX_BATCH_ENTRIES: usize = 50_000;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub detector: Arc<Detector>,
    pub alert_service: Arc<dyn AlertService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: RuntimeConfig, alert_service: Arc<dyn AlertService>) -> Self {
        let detector = Detector::from_settings(&config.rules, config.practice_timezone);
        Self {
            config,
            detector: Arc::new(detector),
            alert_service,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
