//! Core data models for the expense ledger
//!
//! This module contains the data structures handed to the reporting code:
//! expense records and the value types they are built from.

pub mod category;
pub mod date;
pub mod expense;
pub mod ids;
pub mod money;
pub mod wire;

pub use category::ExpenseCategory;
pub use date::{parse_calendar_date, ExpenseDate, DATE_FORMAT};
pub use expense::{ExpenseRecord, ExpenseStatus};
pub use ids::ExpenseId;
pub use money::Money;
