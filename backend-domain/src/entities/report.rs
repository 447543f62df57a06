// Detection report entity

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Anomaly;
use crate::error::RejectedEntry;
use crate::value_objects::{AnomalyCategory, Severity};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub run_at: DateTime<Utc>,
    /// Entries that passed validation and went through every rule.
    pub evaluated: usize,
    pub anomalies: Vec<Anomaly>,
    pub rejected: Vec<RejectedEntry>,
    pub summary: DetectionSummary,
}

impl DetectionReport {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty() && self.rejected.is_empty()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<AnomalyCategory, usize>,
}

impl DetectionSummary {
    pub fn from_anomalies(anomalies: &[Anomaly]) -> Self {
        let mut summary = Self {
            total: anomalies.len(),
            ..Self::default()
        };
        for anomaly in anomalies {
            *summary.by_severity.entry(anomaly.severity).or_default() += 1;
            *summary.by_category.entry(anomaly.category).or_default() += 1;
        }
        summary
    }
}
