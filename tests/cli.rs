use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"[
    {"id": 1, "name": "Team dinner", "description": "Dinner", "amount": 50, "date": "2024-07-18", "category": "FOOD", "status": "PENDING"},
    {"id": 2, "name": "Cab", "description": "Fuel", "amount": 30, "date": "2024-07-19", "category": "TRAVEL", "status": "APPROVED"},
    {"id": 3, "name": "Hotel", "description": "Hotel stay", "amount": 120.5, "date": "2024-08-02", "category": "LODGING", "status": "REJECTED", "rejectionReason": "No receipt"},
    {"itemId": "legacy-4", "itemName": "Snacks", "amount": "12", "expenseDate": "2024-08-03T10:00:00Z", "category": "FOOD", "status": "ARCHIVED"}
]"#;

struct Fixture {
    dir: TempDir,
    snapshot: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let snapshot = dir.path().join("expenses.json");
        fs::write(&snapshot, SNAPSHOT).expect("write snapshot");
        Self { dir, snapshot }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("expense").expect("bin");
        cmd.env("EXPENSE_LEDGER_DIR", self.dir.path().join("config"))
            .env_remove("EXPENSE_LEDGER_FILE")
            .env_remove("RUST_LOG")
            .arg("--file")
            .arg(&self.snapshot);
        cmd
    }
}

#[test]
fn list_filters_by_search_text() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["list", "--search", "DIN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dinner"))
        .stdout(predicate::str::contains("Fuel").not())
        .stdout(predicate::str::contains("1 of 4 expenses shown"));
}

#[test]
fn list_view_searches_name() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["list", "--view", "list", "--search", "snack"])
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy-4"));
}

#[test]
fn list_by_category_and_date_range() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["list", "--category", "FOOD", "--from", "2024-08-01", "--to", "2024-08-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy-4"))
        .stdout(predicate::str::contains("Dinner").not());
}

#[test]
fn list_with_no_matches() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["list", "--search", "nothing like this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found matching your criteria."));
}

#[test]
fn list_rejects_bad_date() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["list", "--from", "18/07/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start date format"));
}

#[test]
fn report_by_category_as_csv() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["report", "--group", "category", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Category,Amount,Count,Percentage"))
        .stdout(predicate::str::contains("FOOD,62.00,2"))
        .stdout(predicate::str::contains("LODGING,120.50,1"));
}

#[test]
fn report_by_month_table() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["report", "--group", "month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Report (Monthly)"))
        .stdout(predicate::str::contains("2024-07"))
        .stdout(predicate::str::contains("2024-08"));
}

#[test]
fn report_unknown_grouping_fails() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["report", "--group", "yearly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown report grouping"));
}

#[test]
fn report_exports_json_file() {
    let fixture = Fixture::new();
    let output = fixture.dir.path().join("report.json");

    fixture
        .cmd()
        .args(["report", "--group", "week", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("report exported to"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read report")).expect("json");
    assert_eq!(written["grouping"], "by_week");
    assert_eq!(written["expense_count"], 4);
}

#[test]
fn status_counts_skip_unrecognized() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending:      1"))
        .stdout(predicate::str::contains("Approved:     1"))
        .stdout(predicate::str::contains("Rejected:     1"))
        .stdout(predicate::str::contains("1 expense(s) have an unrecognized status"));
}

#[test]
fn status_show_lists_bucket() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["status", "--show", "rejected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No receipt"));
}

#[test]
fn dashboard_shows_recent_expenses() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent Expenses"))
        .stdout(predicate::str::contains("Snacks"))
        .stdout(predicate::str::contains("Dinner").not());
}

#[test]
fn snapshot_from_stdin() {
    let fixture = Fixture::new();

    Command::cargo_bin("expense")
        .expect("bin")
        .env("EXPENSE_LEDGER_DIR", fixture.dir.path().join("config"))
        .args(["--file", "-", "status"])
        .write_stdin(SNAPSHOT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved:     1"));
}

#[test]
fn check_strict_reports_invalid_records() {
    let dir = TempDir::new().expect("temp dir");
    let snapshot = dir.path().join("expenses.json");
    fs::write(
        &snapshot,
        r#"[{"id": 9, "description": "Taxi", "amount": 0, "date": "2024-07-01", "category": "TRAVEL"}]"#,
    )
    .expect("write snapshot");

    Command::cargo_bin("expense")
        .expect("bin")
        .env("EXPENSE_LEDGER_DIR", dir.path().join("config"))
        .arg("--file")
        .arg(&snapshot)
        .args(["check", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("amount must be greater than zero"));
}

#[test]
fn missing_snapshot_fails() {
    let dir = TempDir::new().expect("temp dir");

    Command::cargo_bin("expense")
        .expect("bin")
        .env("EXPENSE_LEDGER_DIR", dir.path())
        .env_remove("EXPENSE_LEDGER_FILE")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn init_then_config() {
    let dir = TempDir::new().expect("temp dir");

    Command::cargo_bin("expense")
        .expect("bin")
        .env("EXPENSE_LEDGER_DIR", dir.path())
        .env_remove("EXPENSE_LEDGER_FILE")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("data").join("expenses.json")).expect("snapshot"),
        "[]"
    );

    Command::cargo_bin("expense")
        .expect("bin")
        .env("EXPENSE_LEDGER_DIR", dir.path())
        .env_remove("EXPENSE_LEDGER_FILE")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Table search fields: description,category"));

    Command::cargo_bin("expense")
        .expect("bin")
        .env("EXPENSE_LEDGER_DIR", dir.path())
        .env_remove("EXPENSE_LEDGER_FILE")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 0 expenses shown"));
}
