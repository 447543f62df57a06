use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::AppState;
use backend_infrastructure::{AppConfig, WebhookAlertService};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config()?;
        info!(
            "practice offset {}, alert webhook {}",
            runtime_config.practice_timezone,
            if runtime_config.alert_webhook_url.is_some() { "configured" } else { "unset" }
        );

        let state = AppState::new(runtime_config, Arc::new(WebhookAlertService::new()));
        Ok(Self { state })
    }
}
