// Anomaly category value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyCategory {
    FridayLateDelete,
    UnauthorizedHighAdjustment,
    /// Reserved. No rule emits this category yet.
    BackdatedTransaction,
}

impl AnomalyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyCategory::FridayLateDelete => "FRIDAY_LATE_DELETE",
            AnomalyCategory::UnauthorizedHighAdjustment => "UNAUTHORIZED_HIGH_ADJUSTMENT",
            AnomalyCategory::BackdatedTransaction => "BACKDATED_TRANSACTION",
        }
    }
}

impl fmt::Display for AnomalyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
