use chrono::{DateTime, Utc};
use tracing::debug;

use crate::entities::{
    Anomaly, AuditLogEntry, AuditLogRecord, DetectionReport, DetectionSummary, RuleSettings,
};
use crate::error::RejectedEntry;
use crate::services::{PracticeTimezone, RuleSet};

/// Stateless rule evaluation over a batch of audit log entries.
///
/// Output order is entry order first, then rule registration order. A detector
/// holds no mutable state and can be shared across threads.
#[derive(Debug)]
pub struct Detector {
    rules: RuleSet,
    timezone: PracticeTimezone,
}

impl Detector {
    pub fn new(rules: RuleSet, timezone: PracticeTimezone) -> Self {
        Self { rules, timezone }
    }

    pub fn standard() -> Self {
        Self::new(RuleSet::standard(), PracticeTimezone::utc())
    }

    pub fn from_settings(settings: &RuleSettings, timezone: PracticeTimezone) -> Self {
        Self::new(RuleSet::from_settings(settings), timezone)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn timezone(&self) -> PracticeTimezone {
        self.timezone
    }

    /// Evaluates already-validated entries. Total: never fails.
    pub fn detect_entries(&self, entries: &[AuditLogEntry], detected_at: DateTime<Utc>) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();
        for entry in entries {
            for rule in self.rules.iter() {
                if let Some(finding) = rule.evaluate(entry) {
                    anomalies.push(finding.into_anomaly(detected_at));
                }
            }
        }
        anomalies
    }

    /// Validates raw records, evaluates the valid ones and reports every
    /// rejected record alongside the anomalies.
    pub fn detect(&self, records: &[AuditLogRecord], run_at: DateTime<Utc>) -> DetectionReport {
        let mut entries = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();
        for (position, record) in records.iter().enumerate() {
            match AuditLogEntry::from_record(record, &self.timezone) {
                Ok(entry) => entries.push(entry),
                Err(errors) => {
                    let id = record.id.trim();
                    rejected.push(RejectedEntry {
                        position,
                        entry_id: (!id.is_empty()).then(|| id.to_string()),
                        errors,
                    });
                }
            }
        }

        let anomalies = self.detect_entries(&entries, run_at);
        debug!(
            evaluated = entries.len(),
            rejected = rejected.len(),
            anomalies = anomalies.len(),
            "detection run finished"
        );

        DetectionReport {
            run_at,
            evaluated: entries.len(),
            summary: DetectionSummary::from_anomalies(&anomalies),
            anomalies,
            rejected,
        }
    }

    pub fn detect_now(&self, records: &[AuditLogRecord]) -> DetectionReport {
        self.detect(records, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DetectionRule;
    use crate::value_objects::{AnomalyCategory, Severity};

    fn make_record(id: &str, action: &str, timestamp: &str, amount: Option<f64>) -> AuditLogRecord {
        AuditLogRecord {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            actor_id: "102".to_string(),
            actor_name: "Receptionist Kelly".to_string(),
            actor_role: "STAFF".to_string(),
            action_type: action.to_string(),
            amount,
            ..AuditLogRecord::default()
        }
    }

    struct EveryEntryRule;

    impl DetectionRule for EveryEntryRule {
        fn name(&self) -> &'static str {
            "every_entry"
        }
        fn category(&self) -> AnomalyCategory {
            AnomalyCategory::BackdatedTransaction
        }
        fn severity(&self) -> Severity {
            Severity::Low
        }
        fn summary(&self) -> String {
            "matches everything".to_string()
        }
        fn matches(&self, _entry: &AuditLogEntry) -> bool {
            true
        }
        fn title(&self, _entry: &AuditLogEntry) -> String {
            "always".to_string()
        }
        fn describe(&self, entry: &AuditLogEntry) -> String {
            format!("saw {}", entry.id)
        }
    }

    #[test]
    fn orders_by_entry_then_rule() {
        let detector = Detector::new(
            RuleSet::standard().with_rule(EveryEntryRule),
            PracticeTimezone::utc(),
        );
        let records = vec![
            make_record("A", "PAYMENT_DELETE", "2023-12-08T16:45:00", Some(150.0)),
            make_record("B", "OTHER", "2023-12-05T09:00:00", None),
        ];
        let report = detector.detect_now(&records);
        let pairs: Vec<(String, AnomalyCategory)> = report
            .anomalies
            .iter()
            .map(|a| (a.source_entry_id.0.clone(), a.category))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), AnomalyCategory::FridayLateDelete),
                ("A".to_string(), AnomalyCategory::BackdatedTransaction),
                ("B".to_string(), AnomalyCategory::BackdatedTransaction),
            ]
        );
    }

    #[test]
    fn stamps_every_anomaly_with_run_time() {
        let run_at = DateTime::parse_from_rfc3339("2024-01-01T06:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let records = vec![
            make_record("A", "PAYMENT_DELETE", "2023-12-08T16:45:00", Some(150.0)),
            make_record("B", "ADJUSTMENT", "2023-12-06T10:30:00", Some(450.0)),
        ];
        let report = Detector::standard().detect(&records, run_at);
        assert_eq!(report.run_at, run_at);
        assert!(report.anomalies.iter().all(|a| a.detected_at == run_at));
    }

    #[test]
    fn rejected_records_do_not_stop_the_batch() {
        let records = vec![
            make_record("A", "PAYMENT_DELETE", "yesterday", Some(150.0)),
            make_record("B", "PAYMENT_DELETE", "2023-12-08T16:45:00", Some(75.0)),
            make_record("", "SHRED", "2023-12-08T16:45:00", None),
        ];
        let report = Detector::standard().detect_now(&records);

        assert_eq!(report.evaluated, 1);
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].source_entry_id.0, "B");

        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].position, 0);
        assert_eq!(report.rejected[0].entry_id.as_deref(), Some("A"));
        assert_eq!(report.rejected[1].position, 2);
        assert_eq!(report.rejected[1].entry_id, None);
        assert_eq!(report.rejected[1].errors.len(), 2);
        assert!(report.has_rejections());
    }

    #[test]
    fn empty_batch_is_clean() {
        let report = Detector::standard().detect_now(&[]);
        assert_eq!(report.evaluated, 0);
        assert!(report.is_clean());
        assert_eq!(report.summary.total, 0);
    }

    #[test]
    fn summary_counts_by_severity_and_category() {
        let records = vec![
            make_record("A", "PAYMENT_DELETE", "2023-12-08T16:45:00", Some(150.0)),
            make_record("B", "PAYMENT_DELETE", "2023-12-15T12:00:00", Some(20.0)),
            make_record("C", "ADJUSTMENT", "2023-12-06T10:30:00", Some(450.0)),
        ];
        let report = Detector::standard().detect_now(&records);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.by_severity.get(&Severity::High), Some(&2));
        assert_eq!(report.summary.by_severity.get(&Severity::Medium), Some(&1));
        assert_eq!(
            report.summary.by_category.get(&AnomalyCategory::UnauthorizedHighAdjustment),
            Some(&1)
        );
    }

    #[test]
    fn anomaly_id_is_derived_from_entry_and_category() {
        let records = vec![make_record("L7", "PAYMENT_DELETE", "2023-12-08T16:45:00", None)];
        let report = Detector::standard().detect_now(&records);
        assert_eq!(report.anomalies[0].id.as_str(), "AN-L7-FRIDAY_LATE_DELETE");
    }
}
