//! Concurrency tests for the mindful binary.
//!
//! These tests verify that multiple processes can safely append to and read
//! from the same entry store (file locking).

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mindful"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_concurrent_journal_logging() {
    let temp_dir = setup_test_dir();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (1..=8)
        .map(|mood| {
            let dir = dir.clone();
            thread::spawn(move || {
                cli(&dir)
                    .args(["journal", "--mood", &mood.to_string()])
                    .args(["--stress", "4", "--sleep", "7"])
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    let content = std::fs::read_to_string(dir.join("data/journal.jsonl")).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).expect("every line is a whole record"))
        .collect();
    assert_eq!(records.len(), 8);

    let mut moods: Vec<i64> = records.iter().map(|r| r["mood"].as_i64().unwrap()).collect();
    moods.sort();
    assert_eq!(moods, (1..=8).collect::<Vec<i64>>());
}

#[test]
fn test_readers_alongside_writers() {
    let temp_dir = setup_test_dir();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    let writer_dir = dir.clone();
    let writer = thread::spawn(move || {
        for _ in 0..5 {
            cli(&writer_dir)
                .args(["meditate", "--minutes", "10", "--quality", "3"])
                .assert()
                .success();
        }
    });

    for _ in 0..5 {
        cli(&dir)
            .args(["streak", "--kind", "meditation"])
            .assert()
            .success();
    }

    writer.join().expect("writer thread panicked");

    cli(&dir)
        .args(["streak", "--kind", "meditation"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Current streak: 1 day(s)"));
}
