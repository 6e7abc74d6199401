//! CLI commands for status counts, the dashboard and record checks

use clap::Args;

use crate::config::Settings;
use crate::display::format_expense_table;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseStatus;
use crate::reports::{filter_by_status, DashboardSummary, StatusPartition};
use crate::storage::ExpenseSnapshot;

/// Arguments for `status`
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Also list the expenses in this bucket (pending, approved, rejected)
    #[arg(long)]
    pub show: Option<String>,
}

/// Arguments for `check`
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Fail when any record would be rejected by the submission form
    #[arg(long)]
    pub strict: bool,
}

/// Handle `status`
pub fn handle_status_command(
    snapshot: &ExpenseSnapshot,
    settings: &Settings,
    args: StatusArgs,
) -> ExpenseResult<()> {
    let partition = StatusPartition::from_records(snapshot.expenses());
    let counts = partition.counts();

    println!("Pending:  {:>5}", counts.pending);
    println!("Approved: {:>5}", counts.approved);
    println!("Rejected: {:>5}", counts.rejected);

    if partition.unclassified > 0 {
        println!(
            "\n{} expense(s) have an unrecognized status and are not counted above.",
            partition.unclassified
        );
    }

    if let Some(status) = args.show {
        let status = ExpenseStatus::parse_known(&status)?;
        let expenses = filter_by_status(snapshot.expenses(), &status);
        println!("\n{} expenses ({})", status, counts.get(&status));
        print!("{}", format_expense_table(&expenses, &settings.currency_symbol));
    }

    Ok(())
}

/// Handle `dashboard`
pub fn handle_dashboard_command(
    snapshot: &ExpenseSnapshot,
    settings: &Settings,
) -> ExpenseResult<()> {
    let summary = DashboardSummary::generate(snapshot.expenses(), settings.recent_count);
    print!("{}", summary.format_terminal(&settings.currency_symbol));
    Ok(())
}

/// Handle `check`
pub fn handle_check_command(snapshot: &ExpenseSnapshot, args: CheckArgs) -> ExpenseResult<()> {
    let invalid = snapshot.invalid_expenses();

    if invalid.is_empty() {
        println!("All {} expenses are valid.", snapshot.len());
        return Ok(());
    }

    for (expense, err) in &invalid {
        println!("  [{}] {}", expense.id, err);
    }
    println!("\n{} of {} expenses have problems.", invalid.len(), snapshot.len());

    if args.strict {
        return Err(ExpenseError::Validation(format!(
            "{} invalid expense(s)",
            invalid.len()
        )));
    }

    Ok(())
}
