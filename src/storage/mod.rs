//! Storage layer for the expense ledger
//!
//! Reads expense snapshots and reads/writes the settings file. Expense
//! records themselves are owned by the backend and never written here.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json_required, write_json_atomic};
pub use snapshot::ExpenseSnapshot;
