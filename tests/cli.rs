use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("TALLY_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(home.join("data"));
    cmd
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn add(home: &Path, description: &str, amount: &str, category: &str, kind: &str, date: &str) {
    tally(home)
        .args(["add", description, amount, "--category", category, "--type", kind, "--date", date])
        .assert()
        .success();
}

#[test]
fn test_empty_list_shows_hint() {
    let home = TempDir::new().unwrap();
    tally(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions yet"));
}

#[test]
fn test_add_then_summary_totals() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Coffee", "50", "Food", "expense", "2024-01-01");
    add(home.path(), "Salary", "1000", "Salary", "income", "2024-01-01");

    tally(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{20b9}1,000.00"))
        .stdout(predicate::str::contains("\u{20b9}950.00"))
        .stdout(predicate::str::contains("\u{20b9}525.00"));
}

#[test]
fn test_add_rejects_invalid_fields() {
    let home = TempDir::new().unwrap();
    let output = tally(home.path())
        .args(["add", " ", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: description: Please enter a description"))
        .stderr(predicate::str::contains("Error: amount: Please enter a valid amount"))
        .stderr(predicate::str::contains("Please select a category"))
        .stderr(predicate::str::contains("Please select a type"))
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    let field_lines = stderr.lines().filter(|l| l.starts_with("Error: ")).count();
    assert!(field_lines >= 4, "expected one line per field, got:\n{stderr}");

    tally(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions yet"));
}

#[test]
fn test_list_filters_and_delete() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Groceries", "30", "Food", "expense", "2024-02-01");
    add(home.path(), "Bonus", "200", "Salary", "income", "2024-02-02");

    tally(home.path())
        .args(["list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bonus"))
        .stdout(predicate::str::contains("Groceries").not());

    tally(home.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transaction with ID 1"));

    tally(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Bonus"));
}

#[test]
fn test_breakdown_for_today() {
    let home = TempDir::new().unwrap();
    let date = today();
    add(home.path(), "Rent", "300", "Housing", "expense", &date);
    add(home.path(), "Lunch", "100", "Food", "expense", &date);

    tally(home.path())
        .args(["breakdown", "--period", "daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total daily expenses"))
        .stdout(predicate::str::contains("\u{20b9}400.00"))
        .stdout(predicate::str::contains("75.0%"))
        .stdout(predicate::str::contains("25.0%"));
}

#[test]
fn test_breakdown_period_without_expenses() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Old trip", "80", "Travel", "expense", "2001-05-05");

    tally(home.path())
        .args(["breakdown", "--period", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses for this period"));
}

#[test]
fn test_clear_with_yes() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Coffee", "5", "Food", "expense", "2024-01-01");

    tally(home.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 transaction(s)."));

    tally(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions yet"));
}

#[test]
fn test_clear_declined_keeps_data() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Coffee", "5", "Food", "expense", "2024-01-01");

    tally(home.path())
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    tally(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));
}

#[test]
fn test_theme_toggle_persists() {
    let home = TempDir::new().unwrap();
    tally(home.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));
    tally(home.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));
    tally(home.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));
}

#[test]
fn test_init_saves_currency() {
    let home = TempDir::new().unwrap();
    tally(home.path())
        .args(["init", "--currency", "$"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tally"));
    assert!(home.path().join(".config/tally/settings.json").exists());

    add(home.path(), "Book", "12", "Education", "expense", "2024-03-03");
    tally(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  1"))
        .stdout(predicate::str::contains("$12.00"));
}

#[test]
fn test_export_writes_csv() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Coffee", "5", "Food", "expense", "2024-01-01");
    let out = home.path().join("out.csv");

    tally(home.path())
        .args(["export", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("id,date,time,type,category,description,amount"));
    assert!(text.contains("2024-01-01,,expense,Food,Coffee,-5.0"));
}
