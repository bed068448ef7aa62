use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn todos(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("todos").unwrap();
    cmd.env_remove("TODOS_DB_PATH")
        .env_remove("TODOS_LOG_DIR")
        .env_remove("TODOS_LOG_LEVEL")
        .arg("--db")
        .arg(db);
    cmd
}

fn add(db: &Path, title: &str) -> String {
    let output = todos(db).args(["add", title]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added ")
        .expect("add should print the short id")
        .to_string()
}

#[test]
fn list_on_fresh_database_shows_empty_message() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nested").join("todos.sqlite3");

    todos(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No todos yet."));
    assert!(db.exists());
}

#[test]
fn buy_milk_walk_dog_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.sqlite3");

    let milk = add(&db, "Buy milk");
    let dog = add(&db, "Walk dog");

    todos(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Walk dog.*Buy milk").unwrap());

    todos(&db)
        .args(["toggle", &milk])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Completed "));

    todos(&db)
        .args(["delete", &dog])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Deleted "));

    todos(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[x] {milk}  Buy milk")))
        .stdout(predicate::str::contains("Walk dog").not())
        .stdout(predicate::str::contains("Total: 1  Completed: 1  Remaining: 0"));
}

#[test]
fn edit_trims_and_ignores_blank_titles() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.sqlite3");
    let id = add(&db, "draft");

    todos(&db)
        .args(["edit", &id, "  final  "])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Updated "));

    todos(&db)
        .args(["edit", &id, "   "])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Unchanged "));

    todos(&db)
        .arg("stats")
        .assert()
        .success()
        .stdout("Total: 1  Completed: 0  Remaining: 1\n");

    todos(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[ ] {id}  final")));
}

#[test]
fn blank_add_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.sqlite3");

    todos(&db)
        .args(["add", "   "])
        .assert()
        .success()
        .stdout("Nothing to add: title is empty\n");

    todos(&db)
        .arg("stats")
        .assert()
        .success()
        .stdout("Total: 0  Completed: 0  Remaining: 0\n");
}

#[test]
fn unknown_id_fails_without_touching_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.sqlite3");
    add(&db, "keep");

    todos(&db)
        .args(["delete", "zzzzzzzz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no todo matches id `zzzzzzzz`"));

    todos(&db)
        .arg("stats")
        .assert()
        .success()
        .stdout("Total: 1  Completed: 0  Remaining: 1\n");
}

#[test]
fn unreadable_database_falls_back_to_an_unsaved_list() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.sqlite3");
    let garbage = vec![b'x'; 4096];
    std::fs::write(&db, &garbage).unwrap();

    todos(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No todos yet."))
        .stderr(predicate::str::contains("warning: cannot open"))
        .stderr(predicate::str::contains("will not be saved"));

    todos(&db)
        .args(["add", "kept in memory"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Added "));

    assert_eq!(std::fs::read(&db).unwrap(), garbage);
}

#[test]
fn log_dir_receives_log_files() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.sqlite3");
    let logs = dir.path().join("logs");

    todos(&db)
        .arg("--log-dir")
        .arg(&logs)
        .args(["--log-level", "info", "add", "logged"])
        .assert()
        .success();

    let entries = std::fs::read_dir(&logs).unwrap().count();
    assert!(entries > 0, "expected log files in {}", logs.display());
}
