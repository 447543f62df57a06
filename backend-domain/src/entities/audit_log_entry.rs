// Audit log entry entity
// One financial/administrative action recorded by the practice-management system

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::entities::AuditLogRecord;
use crate::error::{EntryError, EntryField};
use crate::services::PracticeTimezone;
use crate::value_objects::{ActionType, ActorId, ActorRole, EntryId, Money, PatientId};

/// Validated, immutable audit log entry. `timestamp` is expressed in the
/// practice's offset so weekday and hour are the practice's wall clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: EntryId,
    pub timestamp: DateTime<FixedOffset>,
    pub actor_id: ActorId,
    pub actor_name: String,
    pub actor_role: ActorRole,
    pub action_type: ActionType,
    pub description: String,
    pub related_patient_id: Option<PatientId>,
    pub amount: Option<Money>,
}

impl AuditLogEntry {
    /// Validates every field and reports all malformed ones at once.
    pub fn from_record(
        record: &AuditLogRecord,
        timezone: &PracticeTimezone,
    ) -> Result<Self, Vec<EntryError>> {
        let mut errors = record.invalid_fields.clone();
        if record.is_flagged(EntryField::Entry) {
            return Err(errors);
        }

        let id = record.id.trim();
        if id.is_empty() && !record.is_flagged(EntryField::Id) {
            errors.push(EntryError::new(EntryField::Id, "missing"));
        }

        let timestamp = if record.is_flagged(EntryField::Timestamp) {
            None
        } else {
            timezone
                .localize(&record.timestamp)
                .map_err(|reason| errors.push(EntryError::new(EntryField::Timestamp, reason)))
                .ok()
        };

        let actor_role = if record.is_flagged(EntryField::ActorRole) {
            None
        } else {
            record
                .actor_role
                .parse::<ActorRole>()
                .map_err(|err| errors.push(EntryError::new(EntryField::ActorRole, err.to_string())))
                .ok()
        };

        let action_type = if record.is_flagged(EntryField::ActionType) {
            None
        } else {
            record
                .action_type
                .parse::<ActionType>()
                .map_err(|err| errors.push(EntryError::new(EntryField::ActionType, err.to_string())))
                .ok()
        };

        let amount = match record.amount {
            Some(value) => match Money::from_dollars(value) {
                Some(money) => Some(money),
                None => {
                    errors.push(EntryError::new(
                        EntryField::Amount,
                        format!("{} is not a usable amount", value),
                    ));
                    None
                }
            },
            None => None,
        };

        match (timestamp, actor_role, action_type) {
            (Some(timestamp), Some(actor_role), Some(action_type)) if errors.is_empty() => Ok(Self {
                id: EntryId(id.to_string()),
                timestamp,
                actor_id: ActorId(record.actor_id.trim().to_string()),
                actor_name: record.actor_name.trim().to_string(),
                actor_role,
                action_type,
                description: record.description.clone(),
                related_patient_id: record
                    .related_patient_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(|value| PatientId(value.to_string())),
                amount,
            }),
            _ => Err(errors),
        }
    }

    /// Absent amounts compare as zero.
    pub fn amount_or_zero(&self) -> Money {
        self.amount.unwrap_or(Money::ZERO)
    }

    /// Name shown in anomaly text; falls back to the actor id.
    pub fn actor_display_name(&self) -> &str {
        if !self.actor_name.is_empty() {
            &self.actor_name
        } else if !self.actor_id.0.is_empty() {
            &self.actor_id.0
        } else {
            "unknown user"
        }
    }
}
