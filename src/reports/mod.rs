//! Reports module for the expense ledger
//!
//! Pure computations over a snapshot of expense records: table filtering,
//! grouped report totals, status partitions and the dashboard summary.
//! Nothing here performs I/O or keeps state between calls.

pub mod dashboard;
pub mod expense_report;
pub mod filter;
pub mod status_summary;

pub use dashboard::DashboardSummary;
pub use expense_report::{
    month_key, week_key, ExpenseReport, ReportBucket, ReportGrouping, UNDATED_KEY,
};
pub use filter::{filter_expenses, recent_expenses, DateRange, FilterCriteria, SearchFields};
pub use status_summary::{filter_by_status, StatusCounts, StatusPartition};
