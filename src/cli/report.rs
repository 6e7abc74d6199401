//! CLI command for grouped expense reports
//!
//! Prints the report as a table with a bar chart, or exports it as CSV,
//! JSON or YAML to stdout or a file.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::parse_date_range;
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{ExpenseReport, ReportGrouping};
use crate::storage::ExpenseSnapshot;

/// Output format for `report`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

/// Arguments for `report`
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Grouping: category, month or week (defaults to the configured grouping)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show top N buckets only (table format)
    #[arg(long)]
    pub top: Option<usize>,
}

impl ReportArgs {
    pub fn grouping(&self, settings: &Settings) -> ExpenseResult<ReportGrouping> {
        match &self.group {
            Some(group) => group.parse(),
            None => Ok(settings.default_grouping),
        }
    }
}

/// Build the report described by `args`
pub fn build_report(
    snapshot: &ExpenseSnapshot,
    settings: &Settings,
    args: &ReportArgs,
) -> ExpenseResult<ExpenseReport> {
    let grouping = args.grouping(settings)?;
    let range = parse_date_range(args.from.as_deref(), args.to.as_deref())?;

    let report = ExpenseReport::generate(snapshot.expenses(), range, grouping);
    if grouping.needs_date() && report.undated_count > 0 {
        log::warn!(
            "{} expense(s) without a readable date grouped as undated in the {} report",
            report.undated_count,
            grouping
        );
    }

    Ok(report)
}

/// Render the report in the requested format
pub fn render_report<W: Write>(
    report: &ExpenseReport,
    settings: &Settings,
    args: &ReportArgs,
    mut writer: W,
) -> ExpenseResult<()> {
    match args.format {
        ReportFormat::Table => {
            let text = report.format_terminal(&settings.currency_symbol, settings.chart_width);
            writer.write_all(text.as_bytes())?;

            if let Some(limit) = args.top {
                writeln!(writer)?;
                writeln!(writer, "Top {}:", limit)?;
                for bucket in report.top_buckets(limit) {
                    writeln!(
                        writer,
                        "  {:<20} {:>12}",
                        bucket.key,
                        bucket.total.format_with_symbol(&settings.currency_symbol)
                    )?;
                }
            }
            Ok(())
        }
        ReportFormat::Csv => report.export_csv(writer),
        ReportFormat::Json => {
            report.export_json(&mut writer)?;
            writeln!(writer)?;
            Ok(())
        }
        ReportFormat::Yaml => report.export_yaml(writer),
    }
}

fn create_output(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle `report`
pub fn handle_report_command(
    snapshot: &ExpenseSnapshot,
    settings: &Settings,
    args: ReportArgs,
) -> ExpenseResult<()> {
    let report = build_report(snapshot, settings, &args)?;

    if let Some(path) = &args.output {
        let mut writer = create_output(path)?;
        render_report(&report, settings, &args, &mut writer)?;
        writer.flush()?;
        println!("{} report exported to: {}", report.grouping, path.display());
    } else {
        let stdout = io::stdout();
        render_report(&report, settings, &args, stdout.lock())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn snapshot() -> ExpenseSnapshot {
        ExpenseSnapshot::from_json(
            r#"[
                {"id": 1, "description": "Dinner", "amount": 50, "date": "2024-07-18", "category": "FOOD"},
                {"id": 2, "description": "Fuel", "amount": 30, "date": "2024-07-19", "category": "TRAVEL"},
                {"id": 3, "description": "Lunch", "amount": 20, "date": "2024-08-02", "category": "FOOD"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_grouping_from_settings() {
        let settings = Settings {
            default_grouping: ReportGrouping::ByMonth,
            ..Settings::default()
        };
        let report = build_report(&snapshot(), &settings, &ReportArgs::default()).unwrap();

        assert_eq!(report.grouping, ReportGrouping::ByMonth);
        let keys: Vec<_> = report.buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-07", "2024-08"]);
    }

    #[test]
    fn test_unreadable_date_still_totals() {
        let snapshot = ExpenseSnapshot::from_json(
            r#"[
                {"id": 1, "amount": 50, "date": "2024-07-18", "category": "FOOD"},
                {"id": 2, "amount": 9, "date": "garbage", "category": "FOOD"}
            ]"#,
        )
        .unwrap();
        let args = ReportArgs {
            group: Some("month".into()),
            ..Default::default()
        };

        let report = build_report(&snapshot, &Settings::default(), &args).unwrap();
        assert_eq!(report.total_amount.to_string(), "59.00");
        assert_eq!(report.undated_count, 1);
    }

    #[test]
    fn test_unknown_grouping() {
        let args = ReportArgs {
            group: Some("yearly".into()),
            ..Default::default()
        };
        let err = build_report(&snapshot(), &Settings::default(), &args).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_render_csv() {
        let args = ReportArgs {
            format: ReportFormat::Csv,
            to: Some("2024-07-31".into()),
            ..Default::default()
        };
        let settings = Settings::default();
        let report = build_report(&snapshot(), &settings, &args).unwrap();

        let mut out = Vec::new();
        render_report(&report, &settings, &args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Category,Amount,Count,Percentage"));
        assert!(text.contains("FOOD,50.00,1"));
        assert!(text.contains("TRAVEL,30.00,1"));
    }

    #[test]
    fn test_render_table_with_top() {
        let args = ReportArgs {
            top: Some(1),
            ..Default::default()
        };
        let settings = Settings::default();
        let report = build_report(&snapshot(), &settings, &args).unwrap();

        let mut out = Vec::new();
        render_report(&report, &settings, &args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Top 1:"));
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        let args = ReportArgs {
            format: ReportFormat::Json,
            output: Some(path.clone()),
            ..Default::default()
        };

        handle_report_command(&snapshot(), &Settings::default(), args).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["expense_count"], 3);
    }
}
