//! Expense Ledger - filtering and aggregation over expense claims
//!
//! This library takes a snapshot of expense records (as exported by the
//! expense backend) and answers the questions the expense views ask of it:
//! which records match a search, how much was spent per category, month or
//! week, and how many claims are pending, approved or rejected.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Expense records and their field types
//! - `reports`: Pure filter, report and status computations
//! - `display`: Terminal formatting
//! - `storage`: Snapshot loading and JSON file helpers
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `expense` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::reports::{DateRange, ExpenseReport, ReportGrouping};
//! use expense_ledger::storage::ExpenseSnapshot;
//!
//! let snapshot = ExpenseSnapshot::load("expenses.json")?;
//! let report = ExpenseReport::generate(
//!     snapshot.expenses(),
//!     DateRange::unbounded(),
//!     ReportGrouping::ByMonth,
//! );
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
