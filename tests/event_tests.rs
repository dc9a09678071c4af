use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{eva, init_db, init_db_with_events, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");

    eva()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    eva()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total events:"))
        .stdout(contains("defaults"));
}

#[test]
fn test_add_and_list_day() {
    let db_path = setup_test_db("add_and_list_day");
    init_db(&db_path);

    eva()
        .args([
            "--db", &db_path, "add", "2024-05-06", "10:00", "--name", "Dentist", "--desc", "Check-up",
            "--remind",
        ])
        .assert()
        .success()
        .stdout(contains("Event #1 'Dentist' added"))
        .stdout(contains("reminder on"));

    eva()
        .args(["--db", &db_path, "list", "--day", "2024-05-06"])
        .assert()
        .success()
        .stdout(contains("Dentist"))
        .stdout(contains("10:00"))
        .stdout(contains("Check-up"));

    eva()
        .args(["--db", &db_path, "list", "--day", "2024-05-07"])
        .assert()
        .success()
        .stdout(contains("No events on 2024-05-07"));
}

#[test]
fn test_add_requires_description() {
    let db_path = setup_test_db("add_requires_description");
    init_db(&db_path);

    eva()
        .args(["--db", &db_path, "add", "2024-05-06", "10:00", "--name", "Dentist"])
        .assert()
        .failure()
        .stderr(contains("required field(s): description"));
}

#[test]
fn test_add_rejects_bad_date_and_time() {
    let db_path = setup_test_db("add_rejects_bad_input");
    init_db(&db_path);

    eva()
        .args(["--db", &db_path, "add", "2024-13-01", "10:00", "--name", "x", "--desc", "y"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    eva()
        .args(["--db", &db_path, "add", "2024-01-01", "7pm", "--name", "x", "--desc", "y"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_edit_event() {
    let db_path = setup_test_db("edit_event");
    init_db_with_events(&db_path);

    eva()
        .args(["--db", &db_path, "edit", "2", "--time", "13:15", "--remind", "--name", "Team lunch"])
        .assert()
        .success()
        .stdout(contains("Event #2 updated: 'Team lunch' on 2024-01-15 13:15"));

    eva()
        .args(["--db", &db_path, "list", "--id", "2"])
        .assert()
        .success()
        .stdout(contains("Team lunch"))
        .stdout(contains("2024-01-15 13:15"))
        .stdout(contains("on"));
}

#[test]
fn test_edit_unknown_event_fails() {
    let db_path = setup_test_db("edit_unknown_event");
    init_db(&db_path);

    eva()
        .args(["--db", &db_path, "edit", "99", "--name", "x"])
        .assert()
        .failure()
        .stderr(contains("No event found with id 99"));
}

#[test]
fn test_del_asks_confirmation_unless_forced() {
    let db_path = setup_test_db("del_confirmation");
    init_db_with_events(&db_path);

    // no answer on stdin: nothing is deleted
    eva()
        .args(["--db", &db_path, "del", "1"])
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    eva()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Event #1 has been deleted"));

    eva()
        .args(["--db", &db_path, "del", "2", "--force"])
        .assert()
        .success();

    eva()
        .args(["--db", &db_path, "list", "--day", "2024-01-01"])
        .assert()
        .success()
        .stdout(contains("Standup").not());

    eva()
        .args(["--db", &db_path, "del", "2", "--force"])
        .assert()
        .failure()
        .stderr(contains("No event found with id 2"));
}

#[test]
fn test_calendar_marks_event_days() {
    let db_path = setup_test_db("calendar_marks");
    init_db_with_events(&db_path);

    eva()
        .args(["--db", &db_path, "calendar", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(contains("January 2024"))
        .stdout(contains("1*"))
        .stdout(contains("15*"))
        .stdout(contains("2 day(s) with events"));

    eva()
        .args(["--db", &db_path, "calendar", "--month", "2024-13"])
        .assert()
        .failure();
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records_operations");
    init_db_with_events(&db_path);

    eva()
        .args(["--db", &db_path, "del", "3", "--force"])
        .assert()
        .success();

    eva()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("'Standup' on 2024-01-01 08:30"))
        .stdout(contains("'Concert' deleted"));
}
