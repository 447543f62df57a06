use async_trait::async_trait;

use crate::entities::{AlertDeliveryRecord, Anomaly, RuntimeConfig};

#[async_trait]
pub trait AlertService: Send + Sync {
    /// Delivers qualifying anomalies in the background. Never blocks detection.
    fn spawn_alerts(&self, config: RuntimeConfig, anomalies: Vec<Anomaly>);
    async fn list_alert_deliveries(&self, limit: usize) -> Vec<AlertDeliveryRecord>;
    async fn last_alert_delivery(&self) -> Option<AlertDeliveryRecord>;
}
