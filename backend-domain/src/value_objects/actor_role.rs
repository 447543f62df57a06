// Actor role value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    OwnerDoctor,
    OfficeManager,
    Staff,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::OwnerDoctor => "OWNER_DOCTOR",
            ActorRole::OfficeManager => "OFFICE_MANAGER",
            ActorRole::Staff => "STAFF",
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, ActorRole::OwnerDoctor)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "OWNER_DOCTOR" => Ok(ActorRole::OwnerDoctor),
            "OFFICE_MANAGER" => Ok(ActorRole::OfficeManager),
            "STAFF" => Ok(ActorRole::Staff),
            _ => Err(UnknownValue::new("actor role", s)),
        }
    }
}
