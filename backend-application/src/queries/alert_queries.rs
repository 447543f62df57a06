use backend_domain::AlertDeliveryRecord;

use crate::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 200;

pub async fn list_alert_deliveries(state: &AppState, limit: Option<usize>) -> Vec<AlertDeliveryRecord> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    state.alert_service.list_alert_deliveries(limit).await
}

pub async fn last_alert_delivery(state: &AppState) -> Option<AlertDeliveryRecord> {
    state.alert_service.last_alert_delivery().await
}
