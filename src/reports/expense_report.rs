//! Grouped Expense Report
//!
//! Totals expenses per category, month or week over an optional date range.
//! This is the data behind the report charts: one bucket per key, sorted by
//! key, plus the overall total.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::display::report::{format_bar, format_percentage, truncate};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money};
use crate::reports::filter::DateRange;

/// How the report buckets expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportGrouping {
    /// One bucket per category string
    #[default]
    ByCategory,
    /// One bucket per `YYYY-MM`
    ByMonth,
    /// One bucket per `YYYY-W<n>`
    ByWeek,
}

impl ReportGrouping {
    /// Bucket key for an expense, or `None` when the expense has no usable date
    /// and the grouping needs one
    pub fn bucket_key(&self, expense: &ExpenseRecord) -> Option<String> {
        match self {
            Self::ByCategory => Some(expense.category.as_str().to_string()),
            Self::ByMonth => expense.expense_date().map(month_key),
            Self::ByWeek => expense.expense_date().map(week_key),
        }
    }

    pub fn needs_date(&self) -> bool {
        !matches!(self, Self::ByCategory)
    }

    /// Column header for the bucket key
    pub fn key_label(&self) -> &'static str {
        match self {
            Self::ByCategory => "Category",
            Self::ByMonth => "Month",
            Self::ByWeek => "Week",
        }
    }
}

impl fmt::Display for ReportGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByCategory => write!(f, "By Category"),
            Self::ByMonth => write!(f, "Monthly"),
            Self::ByWeek => write!(f, "Weekly"),
        }
    }
}

impl FromStr for ReportGrouping {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" | "by_category" | "by-category" => Ok(Self::ByCategory),
            "month" | "monthly" | "by_month" | "by-month" => Ok(Self::ByMonth),
            "week" | "weekly" | "by_week" | "by-week" => Ok(Self::ByWeek),
            other => Err(ExpenseError::InvalidArgument(format!(
                "Unknown report grouping '{}'. Use category, month or week",
                other
            ))),
        }
    }
}

/// Month/week bucket for in-range expenses that have no readable date
///
/// Sorts after every dated key.
pub const UNDATED_KEY: &str = "undated";

/// `YYYY-MM` with a zero-padded month
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// `YYYY-W<n>` for the week starting on the Monday on or before `date`
///
/// `n` is `ceil((month_index * 30 + day_of_month) / 7)` of that Monday, with
/// a zero-based month index. This is not an ISO week number; keys are only
/// comparable with each other. Keys with `n >= 10` sort lexicographically
/// before single-digit ones of the same year.
pub fn week_key(date: NaiveDate) -> String {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let ordinal = (monday.month0() * 30 + monday.day()).div_ceil(7);
    format!("{}-W{}", monday.year(), ordinal)
}

/// Total for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBucket {
    /// Bucket key (category, `YYYY-MM`, or `YYYY-W<n>`)
    pub key: String,
    /// Sum of reportable amounts
    pub total: Money,
    /// Number of expenses in the bucket
    pub expense_count: usize,
}

impl ReportBucket {
    /// Share of `total_amount`, in percent
    pub fn percentage_of(&self, total_amount: Money) -> f64 {
        if total_amount.is_zero() {
            0.0
        } else {
            (self.total.cents() as f64 / total_amount.cents() as f64) * 100.0
        }
    }
}

/// Expense totals grouped by category, month or week
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
    pub grouping: ReportGrouping,
    pub date_range: DateRange,
    /// Buckets in ascending key order
    pub buckets: Vec<ReportBucket>,
    /// Sum of all bucket totals
    pub total_amount: Money,
    /// Expenses inside the range
    pub expense_count: usize,
    /// Expenses inside the range that went to the `undated` bucket
    pub undated_count: usize,
}

impl ExpenseReport {
    /// Generate a report over `expenses`
    ///
    /// The date range is applied first, with the same rules as the expense
    /// filter. Non-positive amounts contribute zero.
    pub fn generate(
        expenses: &[ExpenseRecord],
        date_range: DateRange,
        grouping: ReportGrouping,
    ) -> Self {
        let mut totals: BTreeMap<String, (Money, usize)> = BTreeMap::new();
        let mut undated_count = 0;

        for expense in expenses
            .iter()
            .filter(|e| date_range.contains(e.expense_date()))
        {
            let key = match grouping.bucket_key(expense) {
                Some(key) => key,
                None => {
                    undated_count += 1;
                    UNDATED_KEY.to_string()
                }
            };

            let entry = totals.entry(key).or_insert((Money::zero(), 0));
            entry.0 += expense.reportable_amount();
            entry.1 += 1;
        }

        let buckets: Vec<ReportBucket> = totals
            .into_iter()
            .map(|(key, (total, expense_count))| ReportBucket {
                key,
                total,
                expense_count,
            })
            .collect();

        let total_amount: Money = buckets.iter().map(|b| b.total).sum();
        let expense_count = buckets.iter().map(|b| b.expense_count).sum();

        log::debug!(
            "{} report: {} buckets from {} expenses ({} undated)",
            grouping,
            buckets.len(),
            expense_count,
            undated_count
        );

        Self {
            grouping,
            date_range,
            buckets,
            total_amount,
            expense_count,
            undated_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Look up a bucket by key
    pub fn bucket(&self, key: &str) -> Option<&ReportBucket> {
        self.buckets.iter().find(|b| b.key == key)
    }

    /// The `limit` largest buckets, largest first
    pub fn top_buckets(&self, limit: usize) -> Vec<&ReportBucket> {
        let mut sorted: Vec<&ReportBucket> = self.buckets.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted.into_iter().take(limit).collect()
    }

    /// Format the report for terminal display, with a bar per bucket
    pub fn format_terminal(&self, currency_symbol: &str, chart_width: usize) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expense Report ({})\n", self.grouping));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        match (self.date_range.start, self.date_range.end) {
            (None, None) => output.push_str("Period: all dates\n"),
            (start, end) => output.push_str(&format!(
                "Period: {} to {}\n",
                start.map_or_else(|| "...".to_string(), |d| d.to_string()),
                end.map_or_else(|| "...".to_string(), |d| d.to_string())
            )),
        }
        output.push_str(&format!(
            "Total Expenses: {}\n\n",
            self.total_amount.format_with_symbol(currency_symbol)
        ));

        if self.buckets.is_empty() {
            output.push_str("No expense data available for the selected period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<16} {:>14} {:>6} {:>7}  {}\n",
            self.grouping.key_label(),
            "Amount",
            "Count",
            "%",
            "Chart"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let max_total = self
            .buckets
            .iter()
            .map(|b| b.total.cents())
            .max()
            .unwrap_or(0) as f64;

        for bucket in &self.buckets {
            output.push_str(&format!(
                "{:<16} {:>14} {:>6} {:>7}  {}\n",
                truncate(&bucket.key, 16),
                bucket.total.format_with_symbol(currency_symbol),
                bucket.expense_count,
                format_percentage(bucket.percentage_of(self.total_amount)),
                format_bar(bucket.total.cents() as f64, max_total, chart_width)
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14} {:>6}\n",
            "TOTAL",
            self.total_amount.format_with_symbol(currency_symbol),
            self.expense_count
        ));

        if self.undated_count > 0 {
            output.push_str(&format!(
                "\n{} expense(s) without a readable date are under '{}'.\n",
                self.undated_count, UNDATED_KEY
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([self.grouping.key_label(), "Amount", "Count", "Percentage"])?;

        for bucket in &self.buckets {
            csv_writer.write_record([
                bucket.key.clone(),
                format!("{:.2}", bucket.total.as_decimal()),
                bucket.expense_count.to_string(),
                format!("{:.2}", bucket.percentage_of(self.total_amount)),
            ])?;
        }

        csv_writer.write_record([
            "TOTAL".to_string(),
            format!("{:.2}", self.total_amount.as_decimal()),
            self.expense_count.to_string(),
            if self.total_amount.is_zero() {
                String::new()
            } else {
                "100.00".to_string()
            },
        ])?;

        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        Ok(())
    }

    /// Export the report as pretty-printed JSON
    pub fn export_json<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| ExpenseError::Export(e.to_string()))
    }

    /// Export the report as YAML
    pub fn export_yaml<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        serde_yaml::to_writer(writer, self).map_err(|e| ExpenseError::Export(e.to_string()))
    }
}
