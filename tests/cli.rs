use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cashledger(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cashledger").unwrap();
    cmd.env("CASH_LEDGER_DATA_DIR", dir.path())
        .env_remove("CASH_LEDGER_USER")
        .env_remove("RUST_LOG");
    cmd
}

fn save_count(dir: &TempDir, note: &str) -> String {
    let output = cashledger(dir)
        .args(["--user", "asha", "count", "--open", "10=3", "--note", note])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Saved "))
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_string()
}

#[test]
fn count_saves_and_history_shows_it() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args([
            "--user", "asha", "count", "--bundle", "100=1", "--open", "100=5", "--bundle",
            "500=-1", "--note", "evening till",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grand Total: -₹39,500"))
        .stdout(predicate::str::contains("Saved rec-"));

    cashledger(&dir)
        .args(["--user", "asha", "history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1 of 1"))
        .stdout(predicate::str::contains("Note:  evening till"))
        .stdout(predicate::str::contains("Total: -₹39,500"));

    cashledger(&dir)
        .args(["--user", "ravi", "history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations found."));
}

#[test]
fn invalid_count_is_rejected_and_nothing_saved() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args(["--user", "asha", "count", "--open", "20=1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid open count for ₹20: \"1.5\". Only numbers allowed.",
        ));

    cashledger(&dir)
        .args(["--user", "asha", "history", "dates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations found."));
}

#[test]
fn empty_count_is_refused() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args(["--user", "asha", "count", "--bundle", "500=-", "--open", "100=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one denomination"));
}

#[test]
fn count_without_user_is_unauthorized() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args(["count", "--open", "10=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unauthorized"));
}

#[test]
fn dry_run_does_not_save() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args(["--user", "asha", "count", "--open", "10=3", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grand Total: ₹30"));

    cashledger(&dir)
        .args(["--user", "asha", "history", "dates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations found."));
}

#[test]
fn delete_unknown_record_fails() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args(["--user", "asha", "history", "delete", "rec-deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("records.json"))
        .stdout(predicate::str::contains("2000, 500, 200"));
}

#[test]
fn delete_requires_force() {
    let dir = TempDir::new().unwrap();
    let id = save_count(&dir, "keep me");

    cashledger(&dir)
        .args(["--user", "asha", "history", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("Deleted").not());

    cashledger(&dir)
        .args(["--user", "asha", "history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1 of 1"))
        .stdout(predicate::str::contains("keep me"));

    cashledger(&dir)
        .args(["--user", "asha", "history", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {}", id)))
        .stdout(predicate::str::contains("No calculations found."));

    cashledger(&dir)
        .args(["--user", "asha", "history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations found."));
}

#[test]
fn delete_shows_next_record() {
    let dir = TempDir::new().unwrap();
    save_count(&dir, "first");
    let second = save_count(&dir, "second");

    cashledger(&dir)
        .args(["--user", "asha", "history", "delete", &second, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1 of 1"))
        .stdout(predicate::str::contains("Note:  first"));
}

#[test]
fn history_steps_older_and_newer() {
    let dir = TempDir::new().unwrap();
    save_count(&dir, "only");

    cashledger(&dir)
        .args(["--user", "asha", "history", "show", "--older"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1 of 1"));

    cashledger(&dir)
        .args(["--user", "asha", "history", "show", "--older", "--newer"])
        .assert()
        .failure();
}

#[test]
fn zero_grand_total_is_not_saved() {
    let dir = TempDir::new().unwrap();

    cashledger(&dir)
        .args(["--user", "asha", "count", "--bundle", "100=1", "--open", "200=-50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Grand total is zero"));

    cashledger(&dir)
        .args(["--user", "asha", "history", "dates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations found."));
}
