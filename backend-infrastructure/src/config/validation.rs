use anyhow::{anyhow, Result};

use backend_domain::{Money, PracticeTimezone, Severity};

pub fn validate_utc_offset(value: &str) -> Result<PracticeTimezone> {
    PracticeTimezone::parse_offset(value).map_err(|err| anyhow!("invalid practice_utc_offset: {}", err))
}

pub fn validate_severity(value: &str) -> Result<Severity> {
    value
        .parse::<Severity>()
        .map_err(|err| anyhow!("invalid alert_min_severity: {}", err))
}

pub fn validate_threshold(value: f64) -> Result<Money> {
    if value < 0.0 {
        return Err(anyhow!("high_adjustment_threshold must not be negative"));
    }
    Money::from_dollars(value).ok_or_else(|| anyhow!("high_adjustment_threshold must be a finite amount"))
}
