//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the reporting layer.

pub mod expense;
pub mod report;
pub mod summary;

pub use expense::{handle_list_command, ListArgs, ListView};
pub use report::{handle_report_command, ReportArgs, ReportFormat};
pub use summary::{
    handle_check_command, handle_dashboard_command, handle_status_command, CheckArgs, StatusArgs,
};

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::DATE_FORMAT;
use crate::reports::DateRange;

/// Parse an optional `YYYY-MM-DD` command-line date
pub(crate) fn parse_date_arg(value: Option<&str>, label: &str) -> ExpenseResult<Option<NaiveDate>> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
                ExpenseError::Validation(format!(
                    "Invalid {} date format: {}. Use YYYY-MM-DD",
                    label, s
                ))
            })
        })
        .transpose()
}

/// Build a date range from `--from` / `--to`
pub(crate) fn parse_date_range(from: Option<&str>, to: Option<&str>) -> ExpenseResult<DateRange> {
    let range = DateRange::new(parse_date_arg(from, "start")?, parse_date_arg(to, "end")?);

    if let (Some(start), Some(end)) = (range.start, range.end) {
        if start > end {
            log::warn!("Start date {} is after end date {}; nothing will match", start, end);
        }
    }

    Ok(range)
}
