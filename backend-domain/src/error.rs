// Domain errors

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Audit record field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryField {
    Entry,
    Id,
    Timestamp,
    ActorId,
    ActorName,
    ActorRole,
    ActionType,
    Description,
    RelatedPatientId,
    Amount,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Entry => "entry",
            EntryField::Id => "id",
            EntryField::Timestamp => "timestamp",
            EntryField::ActorId => "actorId",
            EntryField::ActorName => "actorName",
            EntryField::ActorRole => "actorRole",
            EntryField::ActionType => "actionType",
            EntryField::Description => "description",
            EntryField::RelatedPatientId => "relatedPatientId",
            EntryField::Amount => "amount",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {reason}")]
pub struct EntryError {
    pub field: EntryField,
    pub reason: String,
}

impl EntryError {
    pub fn new(field: EntryField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A record that could not be evaluated, with every malformed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedEntry {
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub errors: Vec<EntryError>,
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry_id {
            Some(id) => write!(f, "entry {} (position {})", id, self.position)?,
            None => write!(f, "entry at position {}", self.position)?,
        }
        f.write_str(" rejected")?;
        for (idx, err) in self.errors.iter().enumerate() {
            f.write_str(if idx == 0 { ": " } else { "; " })?;
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for RejectedEntry {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimezoneError {
    #[error("utc offset is empty")]
    Empty,
    #[error("invalid utc offset {0:?}, expected +HH:MM")]
    Invalid(String),
}
