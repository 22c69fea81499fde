use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn sprout_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sprout").expect("Failed to find sprout binary");
    cmd.arg("--no-color");
    cmd
}

/// Runs `sprout` against `db_path` with a fixed today.
fn sprout_at(db_path: &str, today: &str) -> Command {
    let mut cmd = sprout_cmd();
    cmd.args(["--database-file", db_path, "--today", today]);
    cmd
}

fn login(db_path: &str, name: &str) {
    sprout_at(db_path, "2024-06-01")
        .args(["login", name])
        .assert()
        .success();
}

#[test]
fn test_cli_status_requires_login() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sprout_cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_cli_login_and_whoami() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    sprout_at(db_arg, "2024-06-01")
        .args(["login", "Asha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as **Asha** (farmer)"));

    sprout_cmd()
        .args(["--database-file", db_arg, "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Asha**"));

    sprout_cmd()
        .args(["--database-file", db_arg, "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    sprout_cmd()
        .args(["--database-file", db_arg, "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_cli_no_active_journey() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active journey"));
}

#[test]
fn test_cli_journey_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "start", "rice", "--sown", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started a Rice journey."))
        .stdout(predicate::str::contains(
            "## Current task: Nursery & Transplanting",
        ));

    sprout_at(db_arg, "2024-07-16")
        .assert()
        .success()
        .stdout(predicate::str::contains("day **45**"))
        .stdout(predicate::str::contains("38%"))
        .stdout(predicate::str::contains("## Current task: Tillering"))
        .stdout(predicate::str::contains(
            "Next: **Panicle Initiation & Flowering** in 20 day(s)",
        ));
}

#[test]
fn test_cli_start_conflict_needs_force() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "start", "Rice"])
        .assert()
        .success();

    sprout_at(db_arg, "2024-06-02")
        .args(["journey", "start", "Wheat"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A Rice journey is already active. Run again with `--force`",
        ));

    sprout_at(db_arg, "2024-06-02")
        .args(["journey", "start", "Wheat", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started a Wheat journey."));
}

#[test]
fn test_cli_start_unknown_crop() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "start", "Quinoa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Quinoa"));
}

#[test]
fn test_cli_toggle_task_marks_timeline() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "start", "Rice"])
        .assert()
        .success();

    sprout_at(db_arg, "2024-06-05")
        .args(["journey", "toggle", "Nursery & Transplanting"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "**Nursery & Transplanting** (Week 1-4) *(marked done)*",
        ));
}

#[test]
fn test_cli_complete_before_harvest_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "start", "Rice"])
        .assert()
        .success();

    sprout_at(db_arg, "2024-07-16")
        .args(["journey", "complete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to complete journey"));

    sprout_at(db_arg, "2024-09-29")
        .args(["journey", "complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived the Rice journey after 120 days"));

    sprout_at(db_arg, "2024-09-29")
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Rice (completed)"))
        .stdout(predicate::str::contains("- **Duration**: 120 days"));
}

#[test]
fn test_cli_daily_routine() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_at(db_arg, "2024-06-01")
        .args(["journey", "start", "Rice"])
        .assert()
        .success();

    sprout_at(db_arg, "2024-06-03")
        .args(["daily", "toggle", "Check nursery water film"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked done"));

    sprout_at(db_arg, "2024-06-03")
        .args(["daily", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] Check nursery water film"));

    // A new day starts with an empty checklist
    sprout_at(db_arg, "2024-06-04")
        .args(["daily", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] Check nursery water film"));
}

#[test]
fn test_cli_crop_library() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    login(db_arg, "asha");

    sprout_cmd()
        .args(["--database-file", db_arg, "crop", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Rice**: 4 phase(s), 120 days"))
        .stdout(predicate::str::contains("**Wheat**"))
        .stdout(predicate::str::contains("**Cotton**"));

    sprout_cmd()
        .args(["--database-file", db_arg, "crop", "show", "rice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Rice"))
        .stdout(predicate::str::contains("### Tillering"));
}

#[test]
fn test_cli_crop_import_requires_admin() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let crop_file = temp_dir.path().join("millet.json");
    std::fs::write(
        &crop_file,
        r#"{
            "name": "Millet",
            "routine": [
                {"title": "Sowing", "start_day": 0, "end_day": 29},
                {"title": "Harvest", "start_day": 30, "end_day": 89}
            ]
        }"#,
    )
    .expect("Failed to write crop file");
    let crop_arg = crop_file.to_str().unwrap();

    login(db_arg, "asha");
    sprout_cmd()
        .args(["--database-file", db_arg, "crop", "import", crop_arg])
        .assert()
        .failure();

    sprout_cmd()
        .args(["--database-file", db_arg, "login", "root", "--admin"])
        .assert()
        .success();
    sprout_cmd()
        .args(["--database-file", db_arg, "crop", "import", crop_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 crop(s)"));

    sprout_cmd()
        .args(["--database-file", db_arg, "crop", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Millet**: 2 phase(s), 90 days"));
}

#[test]
fn test_cli_user_management() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg, "ravi");
    sprout_cmd()
        .args(["--database-file", db_arg, "user", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires an admin account"));

    // Existing accounts keep their role.
    sprout_cmd()
        .args(["--database-file", db_arg, "login", "ravi", "--admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as **ravi** (farmer)"));

    sprout_cmd()
        .args(["--database-file", db_arg, "login", "root", "--admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as **root** (admin)"));
    sprout_cmd()
        .args(["--database-file", db_arg, "user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **ravi** (#1): farmer, active"))
        .stdout(predicate::str::contains("- **root** (#2): admin, active"));

    sprout_cmd()
        .args(["--database-file", db_arg, "user", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ravi is now blocked"));
    sprout_cmd()
        .args(["--database-file", db_arg, "login", "ravi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account 'ravi' is blocked"));

    sprout_cmd()
        .args(["--database-file", db_arg, "user", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ravi is now active"));
    sprout_cmd()
        .args(["--database-file", db_arg, "user", "role", "1", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ravi is now admin"));
    sprout_cmd()
        .args(["--database-file", db_arg, "user", "toggle", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot change their own account"));
}

#[test]
fn test_cli_recommend() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sprout_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "recommend",
            "--soil",
            "Black",
            "--season",
            "Summer",
            "--climate",
            "Hot",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cotton"))
        .stdout(predicate::str::contains("Soybean"));
}

#[test]
fn test_cli_recommend_fallback() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sprout_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "recommend",
            "--soil",
            "Sandy",
            "--season",
            "Summer",
            "--climate",
            "Hot",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Local crops based on local expertise"));
}

#[test]
fn test_cli_guide() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sprout_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "guide", "Wheat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Wheat guidance"))
        .stdout(predicate::str::contains("Brown rust, Aphids"));
}
