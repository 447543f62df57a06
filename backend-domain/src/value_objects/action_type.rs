// Action type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    PaymentEdit,
    PaymentDelete,
    Adjustment,
    Other,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::PaymentEdit => "PAYMENT_EDIT",
            ActionType::PaymentDelete => "PAYMENT_DELETE",
            ActionType::Adjustment => "ADJUSTMENT",
            ActionType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both `PAYMENT_DELETE` and the practice-management export's `PaymentDelete`.
impl FromStr for ActionType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "paymentedit" => Ok(ActionType::PaymentEdit),
            "paymentdelete" => Ok(ActionType::PaymentDelete),
            "adjustment" => Ok(ActionType::Adjustment),
            "other" => Ok(ActionType::Other),
            _ => Err(UnknownValue::new("action type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_export_spellings() {
        assert_eq!("PAYMENT_DELETE".parse::<ActionType>().unwrap(), ActionType::PaymentDelete);
        assert_eq!("PaymentDelete".parse::<ActionType>().unwrap(), ActionType::PaymentDelete);
        assert_eq!("PaymentEdit".parse::<ActionType>().unwrap(), ActionType::PaymentEdit);
        assert_eq!("adjustment".parse::<ActionType>().unwrap(), ActionType::Adjustment);
        assert_eq!("Other".parse::<ActionType>().unwrap(), ActionType::Other);
    }

    #[test]
    fn rejects_unknown_action() {
        assert!("REFUND".parse::<ActionType>().is_err());
        assert!("".parse::<ActionType>().is_err());
    }
}
