//! Expense identifiers
//!
//! The backend issues either numeric or string identifiers depending on the
//! endpoint, so the ID keeps whichever form it arrived in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::wire::text_from_value;

/// Backend-assigned expense identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ExpenseId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(n) = value.as_i64() {
            return Ok(Self::Number(n));
        }
        // null, floats and anything else keep their text
        Ok(text_from_value(value).map(Self::Text).unwrap_or_default())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ExpenseId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
