//! Expense display formatting
//!
//! Renders expense lists as terminal tables. The manager view adds the
//! requester column; rejected expenses show the manager's reason.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::ExpenseRecord;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct RequesterRow {
    #[tabled(rename = "Requester")]
    requester: String,
    #[tabled(inline)]
    expense: ExpenseRow,
}

fn expense_row(expense: &ExpenseRecord, currency_symbol: &str) -> ExpenseRow {
    ExpenseRow {
        id: expense.id.to_string(),
        date: expense.date.to_string(),
        description: truncate(expense.label(), 32),
        category: expense.category.to_string(),
        amount: expense.amount.format_with_symbol(currency_symbol),
        status: expense.status.to_string(),
        note: expense.rejection().map(|r| truncate(r, 32)).unwrap_or_default(),
    }
}

/// Format expenses as a table
///
/// When any expense carries a requester name (the manager's combined view)
/// a Requester column is added.
pub fn format_expense_table(expenses: &[&ExpenseRecord], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found matching your criteria.\n".to_string();
    }

    let with_requester = expenses.iter().any(|e| e.requester_name().is_some());

    let mut table = if with_requester {
        Table::new(expenses.iter().map(|e| RequesterRow {
            requester: e.requester_name().unwrap_or_default(),
            expense: expense_row(e, currency_symbol),
        }))
    } else {
        Table::new(expenses.iter().map(|e| expense_row(e, currency_symbol)))
    };
    table.with(Style::sharp());

    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::NaiveDate;

    fn sample() -> ExpenseRecord {
        ExpenseRecord::new(
            7,
            NaiveDate::from_ymd_opt(2024, 7, 18).unwrap(),
            Money::from_cents(7500),
            ExpenseCategory::Food,
        )
        .with_description("Dinner")
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_expense_table(&[], "₹"),
            "No expenses found matching your criteria.\n"
        );
    }

    #[test]
    fn test_employee_table() {
        let expense = sample().rejected("Missing receipt");
        let output = format_expense_table(&[&expense], "₹");

        assert!(output.contains("Dinner"));
        assert!(output.contains("₹75.00"));
        assert!(output.contains("REJECTED"));
        assert!(output.contains("Missing receipt"));
        assert!(!output.contains("Requester"));
    }

    #[test]
    fn test_manager_table_has_requester() {
        let expense = sample().with_requester("Asha", "Rao");
        let output = format_expense_table(&[&expense], "₹");

        assert!(output.contains("Requester"));
        assert!(output.contains("Asha Rao"));
    }
}
