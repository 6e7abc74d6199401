//! Dashboard Summary
//!
//! The employee landing page: status cards, the latest few expenses, and how
//! many expenses were filed under each category.

use std::collections::BTreeMap;

use crate::models::{ExpenseRecord, Money};
use crate::reports::filter::recent_expenses;
use crate::reports::status_summary::{StatusCounts, StatusPartition};

/// Summary for the dashboard view
#[derive(Debug, Clone)]
pub struct DashboardSummary<'a> {
    pub status_counts: StatusCounts,
    /// Expenses with a status outside the three known values
    pub unclassified: usize,
    /// Most recent expenses, newest first
    pub recent: Vec<&'a ExpenseRecord>,
    /// Number of expenses per category key, in key order
    pub category_counts: Vec<(String, usize)>,
    /// Sum of reportable amounts over all expenses
    pub total_amount: Money,
}

impl<'a> DashboardSummary<'a> {
    pub fn generate(expenses: &'a [ExpenseRecord], recent_count: usize) -> Self {
        let partition = StatusPartition::from_records(expenses);

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for expense in expenses {
            *counts.entry(expense.category.as_str()).or_insert(0) += 1;
        }

        Self {
            status_counts: partition.counts(),
            unclassified: partition.unclassified,
            recent: recent_expenses(expenses, recent_count),
            category_counts: counts
                .into_iter()
                .map(|(key, count)| (key.to_string(), count))
                .collect(),
            total_amount: expenses.iter().map(|e| e.reportable_amount()).sum(),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Expense Summary\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "Pending: {}  Rejected: {}  Approved: {}\n",
            self.status_counts.pending, self.status_counts.rejected, self.status_counts.approved
        ));
        output.push_str(&format!(
            "Total claimed: {}\n",
            self.total_amount.format_with_symbol(currency_symbol)
        ));

        if !self.recent.is_empty() {
            output.push_str("\nRecent Expenses\n");
            for expense in &self.recent {
                output.push_str(&format!(
                    "  {}  {:<24} {:>12}  {}\n",
                    expense.date,
                    expense.label(),
                    expense.amount.format_with_symbol(currency_symbol),
                    expense.status
                ));
            }
        }

        if !self.category_counts.is_empty() {
            output.push_str("\nExpenses by Category\n");
            for (category, count) in &self.category_counts {
                output.push_str(&format!("  {:<16} {:>4}\n", category, count));
            }
        }

        output
    }
}
