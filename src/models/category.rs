//! Expense category model
//!
//! Categories are a fixed set on the submission form, but snapshots coming
//! from older records may carry other spellings. Those are kept verbatim so
//! they still group under their own name in reports.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::wire::lenient_text;

/// Category of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ExpenseCategory {
    #[default]
    Food,
    Travel,
    Lodging,
    Utilities,
    Other,
    /// Any value outside the fixed set, stored exactly as received
    Unrecognized(String),
}

impl ExpenseCategory {
    /// The five categories offered by the submission form
    pub const KNOWN: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Travel,
        ExpenseCategory::Lodging,
        ExpenseCategory::Utilities,
        ExpenseCategory::Other,
    ];

    /// The category's wire string, which is also its report bucket key
    pub fn as_str(&self) -> &str {
        match self {
            Self::Food => "FOOD",
            Self::Travel => "TRAVEL",
            Self::Lodging => "LODGING",
            Self::Utilities => "UTILITIES",
            Self::Other => "OTHER",
            Self::Unrecognized(s) => s,
        }
    }

    /// Map a wire string to a category; never fails
    pub fn from_wire(s: &str) -> Self {
        match s {
            "FOOD" => Self::Food,
            "TRAVEL" => Self::Travel,
            "LODGING" => Self::Lodging,
            "UTILITIES" => Self::Utilities,
            "OTHER" => Self::Other,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Check whether this is one of the five form categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl Serialize for ExpenseCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExpenseCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_text(deserializer)?;
        Ok(Self::from_wire(raw.as_deref().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_round_trip() {
        for category in ExpenseCategory::KNOWN {
            assert_eq!(ExpenseCategory::from_wire(category.as_str()), category);
            assert!(category.is_known());
        }
    }

    #[test]
    fn test_unrecognized_kept_verbatim() {
        let category: ExpenseCategory = serde_json::from_str("\"Shopping\"").unwrap();
        assert_eq!(category, ExpenseCategory::Unrecognized("Shopping".into()));
        assert_eq!(category.as_str(), "Shopping");
        assert!(!category.is_known());

        // Matching is case-sensitive, as on the wire
        assert_eq!(
            ExpenseCategory::from_wire("Food"),
            ExpenseCategory::Unrecognized("Food".into())
        );
    }

    #[test]
    fn test_null_category() {
        let category: ExpenseCategory = serde_json::from_str("null").unwrap();
        assert_eq!(category.as_str(), "");
    }
}
