use chrono::{Datelike, Timelike, Weekday};

use crate::entities::{AuditLogEntry, Finding, RuleDescriptor};
use crate::value_objects::{ActionType, AnomalyCategory, Money, Severity};

/// A pure predicate over one audit log entry plus the text for its finding.
///
/// Rules never see other entries or other rules' results.
pub trait DetectionRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn category(&self) -> AnomalyCategory;
    fn severity(&self) -> Severity;
    fn summary(&self) -> String;

    fn matches(&self, entry: &AuditLogEntry) -> bool;
    fn title(&self, entry: &AuditLogEntry) -> String;
    fn describe(&self, entry: &AuditLogEntry) -> String;

    fn evaluate(&self, entry: &AuditLogEntry) -> Option<Finding> {
        if !self.matches(entry) {
            return None;
        }
        Some(Finding {
            category: self.category(),
            severity: self.severity(),
            title: self.title(entry),
            description: self.describe(entry),
            source_entry_id: entry.id.clone(),
            amount: entry.amount,
        })
    }

    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: self.name().to_string(),
            category: self.category(),
            severity: self.severity(),
            summary: self.summary(),
        }
    }
}

/// Payment deleted on a Friday at or after the cutoff hour.
#[derive(Debug, Clone)]
pub struct LateWeekDeletionRule {
    cutoff_hour: u32,
}

impl LateWeekDeletionRule {
    pub fn new(cutoff_hour: u32) -> Self {
        Self { cutoff_hour }
    }
}

impl Default for LateWeekDeletionRule {
    fn default() -> Self {
        Self::new(12)
    }
}

impl DetectionRule for LateWeekDeletionRule {
    fn name(&self) -> &'static str {
        "late_week_deletion"
    }

    fn category(&self) -> AnomalyCategory {
        AnomalyCategory::FridayLateDelete
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn summary(&self) -> String {
        format!(
            "Payment deleted on a Friday at or after {:02}:00 practice time",
            self.cutoff_hour
        )
    }

    fn matches(&self, entry: &AuditLogEntry) -> bool {
        entry.action_type == ActionType::PaymentDelete
            && entry.timestamp.weekday() == Weekday::Fri
            && entry.timestamp.hour() >= self.cutoff_hour
    }

    fn title(&self, _entry: &AuditLogEntry) -> String {
        "Suspicious Deletion (Friday)".to_string()
    }

    fn describe(&self, entry: &AuditLogEntry) -> String {
        format!(
            "User {} deleted a payment of {} on a Friday afternoon. This is a common pattern for embezzlement.",
            entry.actor_display_name(),
            entry.amount_or_zero()
        )
    }
}

/// Adjustment above the threshold made by anyone but the owner.
#[derive(Debug, Clone)]
pub struct UnauthorizedHighAdjustmentRule {
    threshold: Money,
}

impl UnauthorizedHighAdjustmentRule {
    pub fn new(threshold: Money) -> Self {
        Self { threshold }
    }
}

impl Default for UnauthorizedHighAdjustmentRule {
    fn default() -> Self {
        Self::new(Money::from_cents(20_000))
    }
}

impl DetectionRule for UnauthorizedHighAdjustmentRule {
    fn name(&self) -> &'static str {
        "unauthorized_high_adjustment"
    }

    fn category(&self) -> AnomalyCategory {
        AnomalyCategory::UnauthorizedHighAdjustment
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn summary(&self) -> String {
        format!(
            "Adjustment over {} performed by a role other than OWNER_DOCTOR",
            self.threshold
        )
    }

    fn matches(&self, entry: &AuditLogEntry) -> bool {
        entry.action_type == ActionType::Adjustment
            && entry.amount_or_zero() > self.threshold
            && !entry.actor_role.is_owner()
    }

    fn title(&self, _entry: &AuditLogEntry) -> String {
        "High-Value Adjustment by Staff".to_string()
    }

    fn describe(&self, entry: &AuditLogEntry) -> String {
        format!(
            "User {} ({}) performed an adjustment of {}. Adjustments over {} should typically be approved by an Owner.",
            entry.actor_display_name(),
            entry.actor_role,
            entry.amount_or_zero(),
            self.threshold
        )
    }
}
