use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use backend_domain::ports::AlertService;
use backend_domain::{AlertDeliveryRecord, Anomaly, RuntimeConfig};

const DEFAULT_TEMPLATE: &str = r#"{"text":"Watchdog: {total} suspicious financial event(s)\n{lines}"}"#;
const MAX_LINES: usize = 8;
const MAX_ATTEMPTS: u8 = 2;
const DELIVERY_HISTORY: usize = 100;

/// Silent alarm: posts qualifying anomalies to a webhook in the background.
#[derive(Default, Clone)]
pub struct WebhookAlertService {
    deliveries: Arc<RwLock<VecDeque<AlertDeliveryRecord>>>,
}

impl WebhookAlertService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertService for WebhookAlertService {
    fn spawn_alerts(&self, config: RuntimeConfig, anomalies: Vec<Anomaly>) {
        let alerts = select_alerts(&config, anomalies);
        if alerts.is_empty() {
            return;
        }
        let Some(url) = config.alert_webhook_url.clone() else {
            debug!("{} alert(s) not sent, no alert webhook configured", alerts.len());
            return;
        };
        let deliveries = self.deliveries.clone();
        tokio::spawn(async move {
            let record = deliver(&config, &url, &alerts).await;
            match &record.error {
                Some(err) => warn!("alert webhook failed: {}", err),
                None => info!("delivered {} alert(s) to webhook", record.alert_count),
            }
            push_delivery(&deliveries, record).await;
        });
    }

    async fn list_alert_deliveries(&self, limit: usize) -> Vec<AlertDeliveryRecord> {
        self.deliveries
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    async fn last_alert_delivery(&self) -> Option<AlertDeliveryRecord> {
        self.deliveries.read().await.back().cloned()
    }
}

fn select_alerts(config: &RuntimeConfig, anomalies: Vec<Anomaly>) -> Vec<Anomaly> {
    anomalies
        .into_iter()
        .filter(|anomaly| anomaly.severity >= config.alert_min_severity)
        .collect()
}

async fn push_delivery(deliveries: &RwLock<VecDeque<AlertDeliveryRecord>>, record: AlertDeliveryRecord) {
    let mut guard = deliveries.write().await;
    guard.push_back(record);
    while guard.len() > DELIVERY_HISTORY {
        guard.pop_front();
    }
}

async fn deliver(config: &RuntimeConfig, url: &str, alerts: &[Anomaly]) -> AlertDeliveryRecord {
    let mut categories = alerts.iter().map(|a| a.category).collect::<Vec<_>>();
    categories.sort();
    categories.dedup();

    let mut attempts = 0;
    let mut last_error = None;
    while attempts < MAX_ATTEMPTS {
        attempts += 1;
        match send_http_alerts(config, url, alerts).await {
            Ok(()) => {
                last_error = None;
                break;
            }
            Err(err) => last_error = Some(err.to_string()),
        }
    }

    let status = if last_error.is_none() { "ok" } else { "failed" };
    AlertDeliveryRecord {
        delivered_at: Utc::now(),
        status: status.to_string(),
        attempts,
        alert_count: alerts.len(),
        categories,
        error: last_error,
    }
}

async fn send_http_alerts(config: &RuntimeConfig, url: &str, alerts: &[Anomaly]) -> Result<()> {
    let template = config
        .alert_webhook_template
        .as_deref()
        .unwrap_or(DEFAULT_TEMPLATE);

    let payload = build_payload(alerts, template);
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;

    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

fn build_line(anomaly: &Anomaly) -> String {
    let mut line = format!(
        "[{}] {} | entry {}",
        anomaly.severity, anomaly.title, anomaly.source_entry_id
    );
    if let Some(amount) = anomaly.amount {
        line.push_str(&format!(" | {}", amount));
    }
    line
}

/// Fills `{total}` and `{lines}`; line text is JSON-escaped so the template stays valid JSON.
fn build_payload(alerts: &[Anomaly], template: &str) -> String {
    let mut lines = alerts
        .iter()
        .take(MAX_LINES)
        .map(build_line)
        .collect::<Vec<_>>();
    if alerts.len() > MAX_LINES {
        lines.push(format!("...and {} more", alerts.len() - MAX_LINES));
    }
    let joined = lines.join("\n");
    let escaped = serde_json::to_string(&joined).unwrap_or_default();
    let escaped = escaped
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or_default();
    template
        .replace("{total}", &alerts.len().to_string())
        .replace("{lines}", escaped)
}
