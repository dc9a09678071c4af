#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn eva() -> Command {
    cargo_bin_cmd!("eventalert")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_eventalert.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    eva()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_event(db_path: &str, date: &str, time: &str, name: &str, remind: bool) {
    let mut cmd = eva();
    cmd.args(["--db", db_path, "add", date, time, "--name", name, "--desc", "created by test"]);
    if remind {
        cmd.arg("--remind");
    }
    cmd.assert().success();
}

/// Initialize DB and add a small dataset useful for many tests:
/// #1 2024-01-01 08:30 (remind), #2 2024-01-15 12:00, #3 2024-02-03 18:00 (remind)
pub fn init_db_with_events(db_path: &str) {
    init_db(db_path);
    add_event(db_path, "2024-01-01", "08:30", "Standup", true);
    add_event(db_path, "2024-01-15", "12:00", "Lunch", false);
    add_event(db_path, "2024-02-03", "18:00", "Concert", true);
}
