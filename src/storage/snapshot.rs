//! Expense snapshots
//!
//! A snapshot is the list of expenses the backend returned for one request
//! ("all expenses for a user" or "all expenses for all employees"), saved as
//! JSON. It is read once per command and never written back.

use serde_json::Value;
use std::io::Read;
use std::path::Path;

use super::file_io::read_json_required;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseRecord;

/// Records of a snapshot document: a bare array or `{"expenses": [...]}`
///
/// Each record is read on its own so an error names the one that failed.
fn records_from_value(value: Value) -> ExpenseResult<Vec<ExpenseRecord>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("expenses") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ExpenseError::Json(
                    "Expense snapshot object has no \"expenses\" array".into(),
                ))
            }
        },
        _ => {
            return Err(ExpenseError::Json(
                "Expense snapshot must be an array of expenses".into(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                ExpenseError::Json(format!("Failed to read expense #{}: {}", index, e))
            })
        })
        .collect()
}

/// Expenses as of one fetch
#[derive(Debug, Clone, Default)]
pub struct ExpenseSnapshot {
    expenses: Vec<ExpenseRecord>,
}

impl ExpenseSnapshot {
    pub fn new(expenses: Vec<ExpenseRecord>) -> Self {
        Self { expenses }
    }

    /// Load a snapshot file; `-` reads standard input
    pub fn load(path: impl AsRef<Path>) -> ExpenseResult<Self> {
        let path = path.as_ref();

        if path == Path::new("-") {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| ExpenseError::Io(format!("Failed to read stdin: {}", e)))?;
            return Self::from_json(&input);
        }

        let document: Value = read_json_required(path)?;
        let snapshot = Self::new(records_from_value(document)?);
        log::debug!(
            "Loaded {} expenses from {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> ExpenseResult<Self> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| ExpenseError::Json(format!("Failed to parse expense snapshot: {}", e)))?;
        Ok(Self::new(records_from_value(document)?))
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Expenses the submission form would have refused, with the reason
    pub fn invalid_expenses(&self) -> Vec<(&ExpenseRecord, ExpenseError)> {
        self.expenses
            .iter()
            .filter_map(|e| e.validate().err().map(|err| (e, err)))
            .collect()
    }
}
