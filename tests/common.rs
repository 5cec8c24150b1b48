#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sbd() -> Command {
    cargo_bin_cmd!("shiftboard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftboard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB schema for a test
pub fn init_db(db_path: &str) {
    sbd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Start a two-member group on "Pack" at 09:00; it gets group id 1 and
/// session ids 2 and 3 on a fresh board.
pub fn start_pack_group(db_path: &str, date: &str) {
    sbd()
        .args([
            "--db", db_path, "--date", date, "--at", "09:00", "start", "--task", "Pack", "A", "B",
        ])
        .assert()
        .success();
}
