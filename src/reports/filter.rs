//! Expense filtering
//!
//! One filter shared by every expense table: text search, category and an
//! inclusive date range, combined with AND. Which fields the text search
//! looks at is fixed by the view calling it (see [`SearchFields`]), not by
//! the query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCategory, ExpenseRecord};

/// Inclusive calendar date range; a missing bound is open on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Range with no bounds; contains every record, dated or not
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check whether a date falls inside `[start 00:00:00, end 23:59:59]`
    ///
    /// `None` (an unreadable date) only passes an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }

        let Some(date) = date else {
            return false;
        };

        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }

        true
    }
}

/// Record fields the text search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFields {
    #[serde(default)]
    pub name: bool,
    #[serde(default)]
    pub description: bool,
    #[serde(default)]
    pub category: bool,
}

impl SearchFields {
    /// Expense tables: search description and category
    pub const DESCRIPTION_AND_CATEGORY: SearchFields = SearchFields {
        name: false,
        description: true,
        category: true,
    };

    /// Simple expense list: search the name only
    pub const NAME_ONLY: SearchFields = SearchFields {
        name: true,
        description: false,
        category: false,
    };

    /// Parse a comma-separated list such as `description,category`
    pub fn parse(s: &str) -> ExpenseResult<Self> {
        let mut fields = SearchFields {
            name: false,
            description: false,
            category: false,
        };

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "name" => fields.name = true,
                "description" => fields.description = true,
                "category" => fields.category = true,
                other => {
                    return Err(ExpenseError::InvalidArgument(format!(
                        "Unknown search field '{}'. Use name, description or category",
                        other
                    )))
                }
            }
        }

        if fields.is_empty() {
            return Err(ExpenseError::InvalidArgument(
                "At least one search field is required".into(),
            ));
        }

        Ok(fields)
    }

    pub fn is_empty(&self) -> bool {
        !(self.name || self.description || self.category)
    }

    /// Check whether any selected field contains the lower-cased needle
    fn matches(&self, expense: &ExpenseRecord, needle: &str) -> bool {
        let contains = |value: Option<&str>| {
            value
                .map(|v| v.to_lowercase().contains(needle))
                .unwrap_or(false)
        };

        (self.name && contains(expense.name.as_deref()))
            || (self.description && contains(expense.description.as_deref()))
            || (self.category && contains(Some(expense.category.as_str())))
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::DESCRIPTION_AND_CATEGORY
    }
}

impl fmt::Display for SearchFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.name, "name"),
            (self.description, "description"),
            (self.category, "category"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

        write!(f, "{}", names.join(","))
    }
}

/// Criteria for an expense table query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty matches everything
    pub search_text: String,
    /// Exact category; `None` matches everything
    pub category: Option<ExpenseCategory>,
    /// Inclusive date bounds
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Check whether no criterion is active
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.category.is_none() && self.date_range.is_unbounded()
    }

    /// Check if an expense matches every active criterion
    pub fn matches(&self, expense: &ExpenseRecord, fields: SearchFields) -> bool {
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            if !fields.matches(expense, &needle) {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if expense.category != *category {
                return false;
            }
        }

        self.date_range.contains(expense.expense_date())
    }
}

/// Keep the expenses matching `criteria`, in their original order
pub fn filter_expenses<'a>(
    expenses: &'a [ExpenseRecord],
    criteria: &FilterCriteria,
    fields: SearchFields,
) -> Vec<&'a ExpenseRecord> {
    let matched: Vec<&ExpenseRecord> = expenses
        .iter()
        .filter(|e| criteria.matches(e, fields))
        .collect();

    log::debug!(
        "Filter kept {} of {} expenses",
        matched.len(),
        expenses.len()
    );

    matched
}

/// The `count` most recent expenses, newest first
///
/// Same-day expenses keep their input order; undated expenses come last.
pub fn recent_expenses(expenses: &[ExpenseRecord], count: usize) -> Vec<&ExpenseRecord> {
    let mut sorted: Vec<&ExpenseRecord> = expenses.iter().collect();
    // Stable sort; None < Some, so undated sink to the end under Reverse
    sorted.sort_by_key(|e| Reverse(e.expense_date()));
    sorted.truncate(count);
    sorted
}
