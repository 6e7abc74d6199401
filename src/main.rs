use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use expense_ledger::cli::{
    handle_check_command, handle_dashboard_command, handle_list_command, handle_report_command,
    handle_status_command, CheckArgs, ListArgs, ReportArgs, StatusArgs,
};
use expense_ledger::config::{paths::ExpensePaths, settings::Settings};
use expense_ledger::models::ExpenseRecord;
use expense_ledger::storage::{write_json_atomic, ExpenseSnapshot};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Filter, total and summarize expense claims",
    long_about = "Reads a snapshot of expense claims (a JSON array of records) and \
                  lists, filters, groups and summarizes them from the command line."
)]
struct Cli {
    /// Expense snapshot to read (JSON); `-` reads stdin
    #[arg(short, long, global = true, env = "EXPENSE_LEDGER_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List expenses matching a search, category and date range
    #[command(alias = "ls")]
    List(ListArgs),

    /// Total expenses by category, month or week
    Report(ReportArgs),

    /// Count expenses per status
    Status(StatusArgs),

    /// Status counts, recent expenses and category counts
    Dashboard,

    /// List records the submission form would reject
    Check(CheckArgs),

    /// Write default settings and an empty snapshot
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let snapshot_path = cli.file.unwrap_or_else(|| paths.snapshot_file());

    match cli.command {
        Some(Commands::List(args)) => {
            let snapshot = ExpenseSnapshot::load(&snapshot_path)?;
            handle_list_command(&snapshot, &settings, args)?;
        }
        Some(Commands::Report(args)) => {
            let snapshot = ExpenseSnapshot::load(&snapshot_path)?;
            handle_report_command(&snapshot, &settings, args)?;
        }
        Some(Commands::Status(args)) => {
            let snapshot = ExpenseSnapshot::load(&snapshot_path)?;
            handle_status_command(&snapshot, &settings, args)?;
        }
        Some(Commands::Dashboard) => {
            let snapshot = ExpenseSnapshot::load(&snapshot_path)?;
            handle_dashboard_command(&snapshot, &settings)?;
        }
        Some(Commands::Check(args)) => {
            let snapshot = ExpenseSnapshot::load(&snapshot_path)?;
            handle_check_command(&snapshot, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing expense ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            let default_snapshot = paths.snapshot_file();
            if !default_snapshot.exists() {
                write_json_atomic(&default_snapshot, &Vec::<ExpenseRecord>::new())?;
            }

            println!("Initialization complete!");
            println!();
            println!("Put exported expenses in {}", default_snapshot.display());
            println!("or pass --file <PATH> to any command.");
        }
        Some(Commands::Config) => {
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Snapshot file:    {}", snapshot_path.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Default grouping:    {}", settings.default_grouping);
            println!("  Table search fields: {}", settings.table_search_fields);
            println!("  List search fields:  {}", settings.list_search_fields);
            println!("  Recent expenses:     {}", settings.recent_count);
        }
        None => {
            println!("Expense Ledger - filter and summarize expense claims");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init' to create the default configuration.");
        }
    }

    Ok(())
}
