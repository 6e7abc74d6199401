//! Expense record model
//!
//! One submitted expense claim as handed over by the backend. The record
//! shape differs slightly between the employee endpoint, the manager
//! endpoint and older sample data (`itemName`, `expenseDate`, `itemId`);
//! all of them deserialize into this single type.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::category::ExpenseCategory;
use super::date::ExpenseDate;
use super::ids::ExpenseId;
use super::money::{self, Money};
use super::wire::lenient_text;
use crate::error::{ExpenseError, ExpenseResult};

/// Approval state of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ExpenseStatus {
    /// Submitted and waiting for a manager
    #[default]
    Pending,
    /// Approved by a manager
    Approved,
    /// Rejected by a manager, usually with a reason
    Rejected,
    /// Any other value, stored exactly as received
    Unrecognized(String),
}

impl ExpenseStatus {
    /// The three states a manager can move an expense between
    pub const KNOWN: [ExpenseStatus; 3] = [
        ExpenseStatus::Pending,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Unrecognized(s) => s,
        }
    }

    pub fn from_wire(s: &str) -> Self {
        match s {
            "PENDING" => Self::Pending,
            "APPROVED" => Self::Approved,
            "REJECTED" => Self::Rejected,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Parse a status typed by a user (case-insensitive, known values only)
    pub fn parse_known(s: &str) -> ExpenseResult<Self> {
        match Self::from_wire(&s.trim().to_uppercase()) {
            Self::Unrecognized(_) => Err(ExpenseError::Validation(format!(
                "Unknown status '{}'. Use pending, approved or rejected",
                s
            ))),
            status => Ok(status),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExpenseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExpenseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient_text(deserializer)? {
            Some(s) => Self::from_wire(&s),
            None => Self::default(),
        })
    }
}

/// A single submitted expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Backend identifier
    #[serde(alias = "itemId", default)]
    pub id: ExpenseId,

    /// Short name (list views)
    #[serde(
        alias = "itemName",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Free-text description (expense tables)
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Claimed amount; unusable values load as zero
    #[serde(default, deserialize_with = "money::deserialize_lenient")]
    pub amount: Money,

    /// Date the expense was incurred
    #[serde(alias = "expenseDate", default)]
    pub date: ExpenseDate,

    #[serde(default = "missing_category")]
    pub category: ExpenseCategory,

    #[serde(default)]
    pub status: ExpenseStatus,

    /// Manager's reason, only meaningful when rejected
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rejection_reason: Option<String>,

    /// Requesting employee, present in the manager's combined view
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub requester_first_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub requester_last_name: Option<String>,
}

fn missing_category() -> ExpenseCategory {
    ExpenseCategory::Unrecognized(String::new())
}

impl ExpenseRecord {
    /// Create a pending expense
    pub fn new(
        id: impl Into<ExpenseId>,
        date: NaiveDate,
        amount: Money,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            amount,
            date: ExpenseDate::from_date(date),
            category,
            status: ExpenseStatus::Pending,
            rejection_reason: None,
            requester_first_name: None,
            requester_last_name: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: ExpenseStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark as rejected with the manager's reason
    pub fn rejected(mut self, reason: impl Into<String>) -> Self {
        self.status = ExpenseStatus::Rejected;
        self.rejection_reason = Some(reason.into());
        self
    }

    pub fn with_requester(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.requester_first_name = Some(first.into());
        self.requester_last_name = Some(last.into());
        self
    }

    /// Calendar date, if readable
    pub fn expense_date(&self) -> Option<NaiveDate> {
        self.date.date()
    }

    /// Amount that counts toward totals (non-positive amounts count as zero)
    pub fn reportable_amount(&self) -> Money {
        if self.amount.is_positive() {
            self.amount
        } else {
            Money::zero()
        }
    }

    /// Best label for display: description, then name
    pub fn label(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// Rejection reason, only when the expense is actually rejected
    pub fn rejection(&self) -> Option<&str> {
        match self.status {
            ExpenseStatus::Rejected => self.rejection_reason.as_deref(),
            _ => None,
        }
    }

    /// Full requester name for the manager view
    pub fn requester_name(&self) -> Option<String> {
        match (&self.requester_first_name, &self.requester_last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Check the rules the submission form enforces before anything is stored
    pub fn validate(&self) -> ExpenseResult<()> {
        if self.label().trim().is_empty() {
            return Err(ExpenseError::Validation(format!(
                "Expense {} has no description",
                self.id
            )));
        }

        if !self.date.is_valid() {
            return Err(ExpenseError::Validation(format!(
                "Expense {} has no valid date ('{}')",
                self.id,
                self.date.raw()
            )));
        }

        if !self.amount.is_positive() {
            return Err(ExpenseError::Validation(format!(
                "Expense {} amount must be greater than zero (got {})",
                self.id, self.amount
            )));
        }

        Ok(())
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} [{}]",
            self.date,
            self.label(),
            self.category,
            self.amount,
            self.status
        )
    }
}
