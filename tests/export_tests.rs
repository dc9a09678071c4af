use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{eva, init_db, init_db_with_events, setup_test_db, temp_out};

#[test]
fn test_export_csv_all() {
    let db_path = setup_test_db("export_csv_all");
    init_db_with_events(&db_path);
    let out = temp_out("export_csv_all", "csv");

    eva()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("CSV export completed: 3 event(s)"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("id,date,time,name,description,remind_me"));
    assert_eq!(lines.next(), Some("1,2024-01-01,08:30,Standup,created by test,true"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_json_with_range() {
    let db_path = setup_test_db("export_json_range");
    init_db_with_events(&db_path);
    let out = temp_out("export_json_range", "json");

    eva()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2024-02", "--force",
        ])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("valid json");
    let rows = parsed.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Concert");
    assert_eq!(rows[0]["remind_me"], true);
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty_range");
    init_db_with_events(&db_path);
    let out = temp_out("export_empty_range", "csv");

    eva()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2023", "--force"])
        .assert()
        .success()
        .stdout(contains("No events found"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_rejects_relative_path_and_bad_range() {
    let db_path = setup_test_db("export_rejects");
    init_db(&db_path);

    eva()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));

    let out = temp_out("export_rejects", "csv");
    eva()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2024-01:2024"])
        .assert()
        .failure()
        .stderr(contains("same format"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_db");
    init_db_with_events(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    eva()
        .args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let base = temp_out("backup_zip", "sqlite");
    let zipped = temp_out("backup_zip", "zip");
    eva()
        .args(["--db", &db_path, "backup", "--file", &base, "--compress"])
        .assert()
        .success();
    assert!(Path::new(&zipped).exists());
    assert!(!Path::new(&base).exists());
}
