use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use backend_application::commands::detect_commands::run_detection;
use backend_application::queries::{alert_queries, rule_queries};
use backend_application::state::MAX_BATCH_ENTRIES;
use backend_application::{AppError, AppState};
use backend_domain::ports::AlertService;
use backend_domain::{
    AlertDeliveryRecord, Anomaly, AnomalyCategory, AuditLogRecord, RuleSettings, RuntimeConfig,
};

#[derive(Default)]
struct RecordingAlerts {
    batches: Mutex<Vec<Vec<Anomaly>>>,
}

#[async_trait]
impl AlertService for RecordingAlerts {
    fn spawn_alerts(&self, _config: RuntimeConfig, anomalies: Vec<Anomaly>) {
        self.batches.lock().unwrap().push(anomalies);
    }

    async fn list_alert_deliveries(&self, limit: usize) -> Vec<AlertDeliveryRecord> {
        let count = self.batches.lock().unwrap().len().min(limit);
        (0..count)
            .map(|_| AlertDeliveryRecord {
                delivered_at: chrono::Utc::now(),
                status: "ok".to_string(),
                attempts: 1,
                alert_count: 1,
                categories: vec![AnomalyCategory::FridayLateDelete],
                error: None,
            })
            .collect()
    }

    async fn last_alert_delivery(&self) -> Option<AlertDeliveryRecord> {
        None
    }
}

fn make_state(config: RuntimeConfig) -> (AppState, Arc<RecordingAlerts>) {
    let alerts = Arc::new(RecordingAlerts::default());
    (AppState::new(config, alerts.clone()), alerts)
}

fn make_record(id: &str, action: &str, timestamp: &str, amount: f64) -> AuditLogRecord {
    AuditLogRecord {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        actor_id: "102".to_string(),
        actor_name: "Receptionist Kelly".to_string(),
        actor_role: "STAFF".to_string(),
        action_type: action.to_string(),
        amount: Some(amount),
        ..AuditLogRecord::default()
    }
}

#[tokio::test]
async fn detection_forwards_anomalies_and_counts_metrics() {
    let (state, alerts) = make_state(RuntimeConfig::default());
    let records = vec![
        make_record("L1", "PAYMENT_DELETE", "2023-12-08T16:45:00", 150.0),
        make_record("L2", "ADJUSTMENT", "2023-12-06T10:30:00", 450.0),
    ];

    let report = run_detection(&state, records).await.unwrap();
    assert_eq!(report.anomalies.len(), 2);

    let batches = alerts.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
    drop(batches);

    let metrics = state.metrics.render_prometheus();
    assert!(metrics.contains("watchdog_anomalies_total 2\n"));
}

#[tokio::test]
async fn quiet_batch_sends_no_alerts() {
    let (state, alerts) = make_state(RuntimeConfig::default());
    let report = run_detection(&state, vec![make_record("L3", "PAYMENT_EDIT", "2023-12-05T09:15:00", 0.0)])
        .await
        .unwrap();
    assert!(report.is_clean());
    assert!(alerts.batches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_batch_is_a_bad_request() {
    let (state, _) = make_state(RuntimeConfig::default());
    let records = vec![AuditLogRecord::default(); MAX_BATCH_ENTRIES + 1];
    let err = run_detection(&state, records).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn rule_catalog_follows_settings() {
    let config = RuntimeConfig {
        rules: RuleSettings {
            late_week_delete_enabled: false,
            ..RuleSettings::default()
        },
        ..RuntimeConfig::default()
    };
    let (state, _) = make_state(config);
    let catalog = rule_queries::list_rules(&state);
    assert_eq!(catalog.practice_utc_offset, "+00:00");
    assert_eq!(catalog.rules.len(), 1);
    assert_eq!(catalog.rules[0].category, AnomalyCategory::UnauthorizedHighAdjustment);

    let report = run_detection(
        &state,
        vec![make_record("L1", "PAYMENT_DELETE", "2023-12-08T16:45:00", 150.0)],
    )
    .await
    .unwrap();
    assert!(report.anomalies.is_empty());
}

#[tokio::test]
async fn delivery_limit_is_clamped() {
    let (state, alerts) = make_state(RuntimeConfig::default());
    for _ in 0..3 {
        alerts.spawn_alerts(RuntimeConfig::default(), Vec::new());
    }
    assert_eq!(alert_queries::list_alert_deliveries(&state, Some(0)).await.len(), 1);
    assert_eq!(alert_queries::list_alert_deliveries(&state, None).await.len(), 3);
}
