use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn billbank(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("billbank").unwrap();
    cmd.env("BILLBANK_DATA_DIR", dir.path())
        .env_remove("BILLBANK_PASSWORD")
        .env("BILLBANK_LOG", "off");
    cmd
}

#[test]
fn complete_lists_candidates_and_state() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args(["complete", "pay"])
        .assert()
        .success()
        .stdout("pay bill\npay card\n[in progress]\n");

    billbank(&dir)
        .args(["complete", "help"])
        .assert()
        .success()
        .stdout("help\n[ready]\n");

    billbank(&dir)
        .args(["complete", "frobnicate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[error]"));
}

#[test]
fn run_creates_and_lists_bills() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args([
            "run",
            "--month",
            "2025-03",
            "new bill Rent",
            "set bill amount 1200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bill 'Rent'"))
        .stdout(predicate::str::contains("$1200.00"));

    billbank(&dir)
        .args(["bill", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("1200.00"));
}

#[test]
fn run_stops_at_first_failing_line() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args(["run", "pay bill 10", "new bill Water"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bill selected"));

    billbank(&dir)
        .args(["bill", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water").not());
}

#[test]
fn run_rejects_incomplete_line() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args(["run", "deposit"])
        .assert()
        .failure();
}

#[test]
fn account_deposits_show_in_transfers() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args([
            "run",
            "--month",
            "2025-03",
            "new account Checking",
            "balance 1000",
            "deposit 24.75",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1024.75"));

    billbank(&dir)
        .args(["transfer", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"));

    billbank(&dir)
        .args(["account", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn audit_records_commands() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries."));

    billbank(&dir)
        .args(["run", "new card Visa", "rename card Amex"])
        .assert()
        .success();

    billbank(&dir)
        .args(["audit", "--count", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amex"));
}

#[test]
fn config_shows_data_dir() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().as_ref()))
        .stdout(predicate::str::contains("Password set:  false"));
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("bills.json").exists());
}

#[test]
fn invalid_month_is_rejected() {
    let dir = TempDir::new().unwrap();

    billbank(&dir)
        .args(["bill", "list", "--month", "2025-13"])
        .assert()
        .failure();
}
