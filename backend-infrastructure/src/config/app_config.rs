use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{RuleSettings, RuntimeConfig};

use super::validation::{validate_severity, validate_threshold, validate_utc_offset};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub practice_utc_offset: String,
    pub late_week_delete_enabled: bool,
    pub late_week_cutoff_hour: u32,
    pub high_adjustment_enabled: bool,
    pub high_adjustment_threshold: f64,
    pub alert_webhook_url: Option<String>,
    pub alert_webhook_template: Option<String>,
    pub alert_min_severity: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            practice_utc_offset: "+00:00".to_string(),
            late_week_delete_enabled: true,
            late_week_cutoff_hour: 12,
            high_adjustment_enabled: true,
            high_adjustment_threshold: 200.0,
            alert_webhook_url: None,
            alert_webhook_template: None,
            alert_min_severity: "HIGH".to_string(),
            max_body_bytes: 8 * 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("WATCHDOG_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path)
                .await
                .with_context(|| format!("reading {}", file_path.display()))?;
            toml::from_str::<AppConfig>(&content)
                .with_context(|| format!("parsing {}", file_path.display()))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(url) = &self.alert_webhook_url {
            if url.trim().is_empty() {
                self.alert_webhook_url = None;
            }
        }
        if let Some(template) = &self.alert_webhook_template {
            if template.trim().is_empty() {
                self.alert_webhook_template = None;
            }
        }
        self.practice_utc_offset = self.practice_utc_offset.trim().to_string();
        self.alert_min_severity = self.alert_min_severity.trim().to_uppercase();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_utc_offset(&self.practice_utc_offset)?;
        validate_severity(&self.alert_min_severity)?;
        validate_threshold(self.high_adjustment_threshold)?;
        if self.late_week_cutoff_hour > 23 {
            return Err(anyhow!("late_week_cutoff_hour must be between 0 and 23"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if let Some(url) = &self.alert_webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow!("alert_webhook_url must be an http(s) url"));
            }
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            practice_timezone: validate_utc_offset(&self.practice_utc_offset)?,
            rules: RuleSettings {
                late_week_delete_enabled: self.late_week_delete_enabled,
                late_week_cutoff_hour: self.late_week_cutoff_hour,
                high_adjustment_enabled: self.high_adjustment_enabled,
                high_adjustment_threshold: validate_threshold(self.high_adjustment_threshold)?,
            },
            alert_webhook_url: self.alert_webhook_url.clone(),
            alert_webhook_template: self.alert_webhook_template.clone(),
            alert_min_severity: validate_severity(&self.alert_min_severity)?,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Unparseable values are an error, never a silent fallback to the file value.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("WATCHDOG_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("WATCHDOG_PRACTICE_UTC_OFFSET") {
            self.practice_utc_offset = value;
        }
        if let Some(value) = lookup("WATCHDOG_LATE_WEEK_DELETE_ENABLED") {
            self.late_week_delete_enabled = parse_flag("WATCHDOG_LATE_WEEK_DELETE_ENABLED", &value)?;
        }
        if let Some(value) = lookup("WATCHDOG_LATE_WEEK_CUTOFF_HOUR") {
            self.late_week_cutoff_hour = parse_value("WATCHDOG_LATE_WEEK_CUTOFF_HOUR", &value)?;
        }
        if let Some(value) = lookup("WATCHDOG_HIGH_ADJUSTMENT_ENABLED") {
            self.high_adjustment_enabled = parse_flag("WATCHDOG_HIGH_ADJUSTMENT_ENABLED", &value)?;
        }
        if let Some(value) = lookup("WATCHDOG_HIGH_ADJUSTMENT_THRESHOLD") {
            self.high_adjustment_threshold = parse_value("WATCHDOG_HIGH_ADJUSTMENT_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("WATCHDOG_ALERT_WEBHOOK_URL") {
            self.alert_webhook_url = Some(value);
        }
        if let Some(value) = lookup("WATCHDOG_ALERT_WEBHOOK_TEMPLATE") {
            self.alert_webhook_template = Some(value);
        }
        if let Some(value) = lookup("WATCHDOG_ALERT_MIN_SEVERITY") {
            self.alert_min_severity = value;
        }
        if let Some(value) = lookup("WATCHDOG_MAX_BODY_BYTES") {
            self.max_body_bytes = parse_value("WATCHDOG_MAX_BODY_BYTES", &value)?;
        }
        if let Some(value) = lookup("WATCHDOG_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = parse_value("WATCHDOG_REQUEST_TIMEOUT_SECONDS", &value)?;
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}={:?}: {}", key, value, err))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("invalid {}={:?}: expected true or false", key, value)),
    }
}
