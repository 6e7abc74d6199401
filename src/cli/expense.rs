//! CLI command for listing and filtering expenses

use clap::{Args, ValueEnum};

use super::parse_date_range;
use crate::config::Settings;
use crate::display::format_expense_table;
use crate::error::ExpenseResult;
use crate::models::{ExpenseCategory, ExpenseRecord, ExpenseStatus};
use crate::reports::{filter_expenses, FilterCriteria, SearchFields};
use crate::storage::ExpenseSnapshot;

/// Which view's search configuration to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ListView {
    /// Expense table (searches description and category by default)
    #[default]
    Table,
    /// Simple list (searches the name by default)
    List,
}

/// Arguments for `list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text to search for
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category (e.g. FOOD, TRAVEL)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Only expenses with this status (pending, approved, rejected)
    #[arg(long)]
    pub status: Option<String>,

    /// View whose search fields apply
    #[arg(long, value_enum, default_value_t = ListView::Table)]
    pub view: ListView,

    /// Override the searched fields (comma-separated: name,description,category)
    #[arg(long)]
    pub fields: Option<String>,
}

impl ListArgs {
    /// Build the filter criteria from the flags
    pub fn criteria(&self) -> ExpenseResult<FilterCriteria> {
        Ok(FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(ExpenseCategory::from_wire),
            date_range: parse_date_range(self.from.as_deref(), self.to.as_deref())?,
        })
    }

    /// Searched fields: explicit `--fields`, else the view's configured set
    pub fn search_fields(&self, settings: &Settings) -> ExpenseResult<SearchFields> {
        match &self.fields {
            Some(fields) => SearchFields::parse(fields),
            None => Ok(match self.view {
                ListView::Table => settings.table_search_fields,
                ListView::List => settings.list_search_fields,
            }),
        }
    }
}

/// Select the expenses matching `args`
pub fn select_expenses<'a>(
    snapshot: &'a ExpenseSnapshot,
    settings: &Settings,
    args: &ListArgs,
) -> ExpenseResult<Vec<&'a ExpenseRecord>> {
    let criteria = args.criteria()?;
    let fields = args.search_fields(settings)?;
    let mut expenses = filter_expenses(snapshot.expenses(), &criteria, fields);

    if let Some(status) = &args.status {
        let status = ExpenseStatus::parse_known(status)?;
        expenses.retain(|e| e.status == status);
    }

    Ok(expenses)
}

/// Handle `list`
pub fn handle_list_command(
    snapshot: &ExpenseSnapshot,
    settings: &Settings,
    args: ListArgs,
) -> ExpenseResult<()> {
    let expenses = select_expenses(snapshot, settings, &args)?;

    print!("{}", format_expense_table(&expenses, &settings.currency_symbol));
    println!("{} of {} expenses shown", expenses.len(), snapshot.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ExpenseSnapshot {
        ExpenseSnapshot::from_json(
            r#"[
                {"id": 1, "name": "Team dinner", "description": "Dinner", "amount": 50, "date": "2024-07-18", "category": "FOOD", "status": "PENDING"},
                {"id": 2, "name": "Cab", "description": "Fuel", "amount": 30, "date": "2024-07-19", "category": "TRAVEL", "status": "APPROVED"}
            ]"#,
        )
        .unwrap()
    }

    fn ids(expenses: &[&ExpenseRecord]) -> Vec<String> {
        expenses.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_select_by_search() {
        let snapshot = snapshot();
        let args = ListArgs {
            search: Some("din".into()),
            ..Default::default()
        };

        let selected = select_expenses(&snapshot, &Settings::default(), &args).unwrap();
        assert_eq!(ids(&selected), vec!["1"]);
    }

    #[test]
    fn test_list_view_searches_name() {
        let snapshot = snapshot();
        let args = ListArgs {
            search: Some("cab".into()),
            view: ListView::List,
            ..Default::default()
        };

        let selected = select_expenses(&snapshot, &Settings::default(), &args).unwrap();
        assert_eq!(ids(&selected), vec!["2"]);

        let table = ListArgs {
            search: Some("cab".into()),
            ..Default::default()
        };
        assert!(select_expenses(&snapshot, &Settings::default(), &table)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_select_by_status_and_dates() {
        let snapshot = snapshot();
        let args = ListArgs {
            from: Some("2024-07-19".into()),
            status: Some("approved".into()),
            ..Default::default()
        };

        let selected = select_expenses(&snapshot, &Settings::default(), &args).unwrap();
        assert_eq!(ids(&selected), vec!["2"]);
    }

    #[test]
    fn test_empty_category_is_no_filter() {
        let args = ListArgs {
            category: Some("  ".into()),
            ..Default::default()
        };
        assert!(args.criteria().unwrap().category.is_none());
    }

    #[test]
    fn test_bad_inputs() {
        let snapshot = snapshot();
        let bad_status = ListArgs {
            status: Some("lost".into()),
            ..Default::default()
        };
        assert!(select_expenses(&snapshot, &Settings::default(), &bad_status).is_err());

        let bad_fields = ListArgs {
            fields: Some("amount".into()),
            ..Default::default()
        };
        let err = select_expenses(&snapshot, &Settings::default(), &bad_fields).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
