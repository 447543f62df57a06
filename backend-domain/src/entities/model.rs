use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::PracticeTimezone;
use crate::value_objects::{AnomalyCategory, Money, Severity};

/// Which rules are registered and with what parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSettings {
    pub late_week_delete_enabled: bool,
    pub late_week_cutoff_hour: u32,
    pub high_adjustment_enabled: bool,
    pub high_adjustment_threshold: Money,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            late_week_delete_enabled: true,
            late_week_cutoff_hour: 12,
            high_adjustment_enabled: true,
            high_adjustment_threshold: Money::from_cents(20_000),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    pub name: String,
    pub category: AnomalyCategory,
    pub severity: Severity,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertDeliveryRecord {
    pub delivered_at: DateTime<Utc>,
    pub status: String,
    pub attempts: u8,
    pub alert_count: usize,
    pub categories: Vec<AnomalyCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub practice_timezone: PracticeTimezone,
    pub rules: RuleSettings,
    pub alert_webhook_url: Option<String>,
    pub alert_webhook_template: Option<String>,
    pub alert_min_severity: Severity,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            practice_timezone: PracticeTimezone::utc(),
            rules: RuleSettings::default(),
            alert_webhook_url: None,
            alert_webhook_template: None,
            alert_min_severity: Severity::High,
            max_body_bytes: 8 * 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
