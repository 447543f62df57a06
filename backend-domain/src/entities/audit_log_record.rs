// Raw audit log record
// Decoded field by field so one badly-typed value never fails the whole batch

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{EntryError, EntryField};

/// Audit record as delivered by the system of record, before validation.
///
/// Field names follow the Watchdog API (`actorRole`, `actionType`, ...) and also
/// accept the practice-management export names (`userRole`, `permType`, ...).
/// Values of the wrong JSON type are not a decode error: they are kept in
/// `invalid_fields` and the entry is rejected when it is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    pub id: String,
    pub timestamp: String,
    pub actor_id: String,
    pub actor_name: String,
    pub actor_role: String,
    pub action_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip)]
    pub invalid_fields: Vec<EntryError>,
}

impl AuditLogRecord {
    pub fn from_value(value: Value) -> Self {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Self {
                    invalid_fields: vec![EntryError::new(
                        EntryField::Entry,
                        format!("expected an object, got {}", kind_of(&other)),
                    )],
                    ..Self::default()
                }
            }
        };

        let mut raw = RawFields {
            fields,
            invalid: Vec::new(),
        };
        Self {
            id: raw.text(EntryField::Id, &["id"]).unwrap_or_default(),
            timestamp: raw
                .text(EntryField::Timestamp, &["timestamp", "logDateTime"])
                .unwrap_or_default(),
            actor_id: raw
                .text(EntryField::ActorId, &["actorId", "userNum"])
                .unwrap_or_default(),
            actor_name: raw
                .text(EntryField::ActorName, &["actorName", "userName"])
                .unwrap_or_default(),
            actor_role: raw
                .text(EntryField::ActorRole, &["actorRole", "userRole"])
                .unwrap_or_default(),
            action_type: raw
                .text(EntryField::ActionType, &["actionType", "permType"])
                .unwrap_or_default(),
            description: raw
                .text(EntryField::Description, &["description", "logText"])
                .unwrap_or_default(),
            related_patient_id: raw.text(EntryField::RelatedPatientId, &["relatedPatientId", "patNum"]),
            amount: raw.amount(),
            invalid_fields: raw.invalid,
        }
    }

    pub fn is_flagged(&self, field: EntryField) -> bool {
        self.invalid_fields.iter().any(|err| err.field == field)
    }
}

impl<'de> Deserialize<'de> for AuditLogRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

struct RawFields {
    fields: Map<String, Value>,
    invalid: Vec<EntryError>,
}

impl RawFields {
    fn take(&mut self, keys: &[&str]) -> Value {
        keys.iter()
            .find_map(|key| self.fields.remove(*key))
            .unwrap_or(Value::Null)
    }

    /// Strings as-is, numbers in their JSON spelling, null as absent.
    fn text(&mut self, field: EntryField, keys: &[&str]) -> Option<String> {
        match self.take(keys) {
            Value::Null => None,
            Value::String(value) => Some(value),
            Value::Number(value) => Some(value.to_string()),
            other => {
                self.invalid.push(EntryError::new(
                    field,
                    format!("expected text, got {}", kind_of(&other)),
                ));
                None
            }
        }
    }

    fn amount(&mut self) -> Option<f64> {
        match self.take(&["amount"]) {
            Value::Null => None,
            Value::Number(value) => value.as_f64(),
            other => {
                self.invalid.push(EntryError::new(
                    EntryField::Amount,
                    format!("expected a number, got {}", kind_of(&other)),
                ));
                None
            }
        }
    }
}

fn kind_of(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => format!("boolean {}", flag),
        Value::Number(number) => format!("number {}", number),
        Value::String(text) => format!("string {:?}", text),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> AuditLogRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_export_field_names() {
        let record = decode(
            r#"{
                "id": "LOG002",
                "logDateTime": "2023-12-06T10:30:00",
                "userNum": "102",
                "userName": "Receptionist Kelly",
                "userRole": "STAFF",
                "permType": "Adjustment",
                "logText": "Courtesy adjustment",
                "patNum": "P002",
                "amount": 450.0
            }"#,
        );
        assert_eq!(record.timestamp, "2023-12-06T10:30:00");
        assert_eq!(record.actor_id, "102");
        assert_eq!(record.actor_role, "STAFF");
        assert_eq!(record.action_type, "Adjustment");
        assert_eq!(record.related_patient_id.as_deref(), Some("P002"));
        assert_eq!(record.amount, Some(450.0));
        assert!(record.invalid_fields.is_empty());
    }

    #[test]
    fn numeric_ids_are_read_as_text() {
        let record = decode(r#"{"id": 7, "userNum": 102, "patNum": 5001, "amount": 150}"#);
        assert_eq!(record.id, "7");
        assert_eq!(record.actor_id, "102");
        assert_eq!(record.related_patient_id.as_deref(), Some("5001"));
        assert_eq!(record.amount, Some(150.0));
        assert!(record.invalid_fields.is_empty());
    }

    #[test]
    fn wrong_types_are_kept_as_field_errors() {
        let record = decode(r#"{"id": "L9", "amount": "150.00", "actorRole": ["STAFF"], "actionType": true}"#);
        assert_eq!(record.id, "L9");
        assert_eq!(record.amount, None);
        let fields: Vec<EntryField> = record.invalid_fields.iter().map(|err| err.field).collect();
        assert_eq!(fields, vec![EntryField::ActorRole, EntryField::ActionType, EntryField::Amount]);
        assert_eq!(
            record.invalid_fields[2].reason,
            "expected a number, got string \"150.00\""
        );
    }

    #[test]
    fn null_is_treated_as_absent() {
        let record = decode(r#"{"id": "L9", "actorRole": null, "amount": null}"#);
        assert_eq!(record.actor_role, "");
        assert_eq!(record.amount, None);
        assert!(record.invalid_fields.is_empty());
    }

    #[test]
    fn non_object_entry_is_flagged() {
        let records: Vec<AuditLogRecord> = serde_json::from_str(r#"[42, {"id": "L1"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_flagged(EntryField::Entry));
        assert_eq!(records[1].id, "L1");
    }
}
