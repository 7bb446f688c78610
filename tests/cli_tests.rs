use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::TestEnv;

#[test]
fn init_creates_database() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));
    assert!(std::path::Path::new(&env.db).exists());
}

#[test]
fn epoch_set_and_navigate_days() {
    let env = TestEnv::new().init();

    env.cmd()
        .args(["epoch", "--set", "DATE.2024-05-02"])
        .assert()
        .success()
        .stdout(contains("May 2nd, 2024").and(contains("DATE.2024-05-02")));

    env.cmd()
        .args(["epoch", "--next"])
        .assert()
        .success()
        .stdout(contains("May 3rd, 2024"));

    env.cmd()
        .args(["epoch", "--prev"])
        .assert()
        .success()
        .stdout(contains("DATE.2024-05-02"));
}

#[test]
fn week_token_is_normalized() {
    let env = TestEnv::new().init();

    env.cmd()
        .args(["epoch", "--set", "WEEK.2024-05-01"])
        .assert()
        .success()
        .stdout(
            contains("WEEK.2024-04-29").and(contains("April 29th, 2024 \u{2013} May 5th, 2024")),
        );

    env.cmd()
        .args(["epoch", "--next"])
        .assert()
        .success()
        .stdout(contains("WEEK.2024-05-06"));
}

#[test]
fn sunday_weeks_from_config() {
    let env = TestEnv::new().init();
    env.write_config("week_start: sunday\n");

    env.cmd()
        .args(["epoch", "--set", "WEEK.2024-05-01"])
        .assert()
        .success()
        .stdout(
            contains("WEEK.2024-04-28").and(contains("April 28th, 2024 \u{2013} May 4th, 2024")),
        );

    env.cmd()
        .args(["epoch", "--next"])
        .assert()
        .success()
        .stdout(contains("WEEK.2024-05-05").and(contains("May 5th, 2024 \u{2013} May 11th, 2024")));

    env.cmd()
        .args(["epoch", "--prev"])
        .assert()
        .success()
        .stdout(contains("WEEK.2024-04-28"));
}

#[test]
fn kind_switch_and_date_pick() {
    let env = TestEnv::new().init();

    env.cmd()
        .args(["epoch", "--set", "DATE.2024-05-02"])
        .assert()
        .success();

    env.cmd()
        .args(["epoch", "--kind", "WEEK"])
        .assert()
        .success()
        .stdout(contains("WEEK.2024-04-29"));

    env.cmd()
        .args(["epoch", "--date", "2024-06-12"])
        .assert()
        .success()
        .stdout(contains("WEEK.2024-06-10"));

    env.cmd()
        .args(["epoch", "--kind", "ALL"])
        .assert()
        .success()
        .stdout(contains("All Time").and(contains("(ALL)")));

    env.cmd()
        .args(["epoch", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(contains("The active epoch is ALL").and(contains("(ALL)")));
}

#[test]
fn malformed_epoch_falls_back_to_today() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["epoch", "--set", "MONTH.2024-05-01"])
        .assert()
        .success()
        .stdout(contains("Unrecognized epoch").and(contains("(DATE.")));
}

#[test]
fn empty_title_is_rejected_before_any_request() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["add", ""])
        .assert()
        .failure()
        .stderr(contains("Title is required").and(contains("Network").not()));
}

#[test]
fn dated_schedule_requires_a_date() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["epoch", "--kind", "ALL"])
        .assert()
        .success();

    env.cmd()
        .args(["add", "write report", "--schedule", "WEEK"])
        .assert()
        .failure()
        .stderr(contains("When schedule type is not \"ALL\", a date is required"));
}

#[test]
fn non_numeric_cost_is_rejected() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["add", "gym", "--cost", "lots"])
        .assert()
        .failure()
        .stderr(contains("Cost must be a number, got 'lots'"));
}

#[test]
fn list_reports_network_errors() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["list", "--epoch", "ALL"])
        .assert()
        .failure()
        .stderr(contains("Network error"));
}

#[test]
fn plan_reports_network_errors() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["plan", "--epoch", "DATE.2024-05-02"])
        .assert()
        .failure()
        .stderr(contains("Network error"));
}

#[test]
fn move_needs_a_known_task_and_column() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["move", "abcd", "--to", "WEEK"])
        .assert()
        .failure()
        .stderr(contains("No task found for id 'abcd'"));

    env.cmd()
        .args(["move", "abcd", "--to", "LATER"])
        .assert()
        .failure()
        .stderr(contains("unknown epoch kind"));
}

#[test]
fn unknown_view_type_is_a_usage_error() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["list", "--view", "LATER"])
        .assert()
        .failure()
        .stderr(contains("unknown view type"));
}

#[test]
fn unknown_task_id() {
    let env = TestEnv::new().init();
    env.cmd()
        .args(["done", "abcd"])
        .assert()
        .failure()
        .stderr(contains("No task found for id 'abcd'"));
}

#[test]
fn logout_without_session() {
    let env = TestEnv::new().init();
    env.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Not logged in."));
}

#[test]
fn login_against_unreachable_server_fails() {
    let env = TestEnv::new().init();
    env.write_config("auth_url: http://127.0.0.1:9/auth/login\nrequest_timeout_secs: 2\n");

    env.cmd()
        .args(["login", "me"])
        .assert()
        .failure()
        .stderr(contains("Network error"));
}

#[test]
fn config_print_and_check() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("endpoint:").and(contains("week_start: monday")));

    env.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("No configuration file"));
}

#[test]
fn init_writes_config_that_checks_clean() {
    let env = TestEnv::new();
    env.cmd().arg("init").assert().success();

    env.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete."));
}

#[test]
fn cache_db_and_log_maintenance() {
    let env = TestEnv::new().init();

    env.cmd()
        .args(["cache", "--info"])
        .assert()
        .success()
        .stdout(contains("Cached lists:"));

    env.cmd()
        .args(["cache", "--clear"])
        .assert()
        .success()
        .stdout(contains("Cache already empty."));

    env.cmd()
        .args(["db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("query_cache")));

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("init")));
}
