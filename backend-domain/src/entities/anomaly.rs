// Anomaly entity
// A finding produced by one rule against one audit log entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AnomalyCategory, AnomalyId, EntryId, Money, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: AnomalyId,
    pub category: AnomalyCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub detected_at: DateTime<Utc>,
    pub source_entry_id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
}

/// Rule output before the detection run stamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub category: AnomalyCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub source_entry_id: EntryId,
    pub amount: Option<Money>,
}

impl Finding {
    pub fn into_anomaly(self, detected_at: DateTime<Utc>) -> Anomaly {
        Anomaly {
            id: AnomalyId::derive(&self.source_entry_id, self.category),
            category: self.category,
            severity: self.severity,
            title: self.title,
            description: self.description,
            detected_at,
            source_entry_id: self.source_entry_id,
            amount: self.amount,
        }
    }
}
