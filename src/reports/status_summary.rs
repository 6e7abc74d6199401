//! Status Summary
//!
//! Splits expenses into the pending / approved / rejected buckets used by
//! the dashboard cards and the manager's approval tabs.

use serde::Serialize;

use crate::models::{ExpenseRecord, ExpenseStatus};

/// Number of expenses in each status bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Sum of the three buckets (excludes unrecognized statuses)
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }

    pub fn get(&self, status: &ExpenseStatus) -> usize {
        match status {
            ExpenseStatus::Pending => self.pending,
            ExpenseStatus::Approved => self.approved,
            ExpenseStatus::Rejected => self.rejected,
            ExpenseStatus::Unrecognized(_) => 0,
        }
    }
}

/// Expenses split by status
///
/// An expense whose status is none of the three known values is in no
/// bucket. It is only tallied in `unclassified` so callers can notice it.
#[derive(Debug, Clone, Default)]
pub struct StatusPartition<'a> {
    pub pending: Vec<&'a ExpenseRecord>,
    pub approved: Vec<&'a ExpenseRecord>,
    pub rejected: Vec<&'a ExpenseRecord>,
    pub unclassified: usize,
}

impl<'a> StatusPartition<'a> {
    /// Partition expenses by status, keeping input order within each bucket
    pub fn from_records(expenses: &'a [ExpenseRecord]) -> Self {
        let mut partition = Self::default();

        for expense in expenses {
            match expense.status {
                ExpenseStatus::Pending => partition.pending.push(expense),
                ExpenseStatus::Approved => partition.approved.push(expense),
                ExpenseStatus::Rejected => partition.rejected.push(expense),
                ExpenseStatus::Unrecognized(ref status) => {
                    log::debug!("Expense {} has unrecognized status '{}'", expense.id, status);
                    partition.unclassified += 1;
                }
            }
        }

        partition
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            pending: self.pending.len(),
            approved: self.approved.len(),
            rejected: self.rejected.len(),
        }
    }

    /// Expenses in one bucket; empty for an unrecognized status
    pub fn bucket(&self, status: &ExpenseStatus) -> &[&'a ExpenseRecord] {
        match status {
            ExpenseStatus::Pending => &self.pending,
            ExpenseStatus::Approved => &self.approved,
            ExpenseStatus::Rejected => &self.rejected,
            ExpenseStatus::Unrecognized(_) => &[],
        }
    }
}

/// Expenses with exactly `status`, in input order (manager tabs)
pub fn filter_by_status<'a>(
    expenses: &'a [ExpenseRecord],
    status: &ExpenseStatus,
) -> Vec<&'a ExpenseRecord> {
    expenses.iter().filter(|e| e.status == *status).collect()
}
