use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn csvstore() -> Command {
    Command::cargo_bin("csvstore").unwrap()
}

#[test]
fn test_convert_comma_to_semicolon() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prices.csv");
    fs::write(&input, "item,price\ntea,2.50\nbread,3\n").unwrap();
    let output = dir.path().join("prices_eu");

    csvstore()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--from", "comma", "--to", "semicolon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prices_eu.csv"));

    assert_eq!(
        fs::read_to_string(dir.path().join("prices_eu.csv")).unwrap(),
        "item;price\ntea;2,50\nbread;3\n"
    );
}

#[test]
fn test_convert_splits_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("log.csv");
    fs::write(&input, "n\n1\n2\n3\n").unwrap();

    csvstore()
        .arg("convert")
        .arg(&input)
        .arg(dir.path().join("split.csv"))
        .args(["--max-bytes", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("split3.csv"));

    assert_eq!(fs::read_to_string(dir.path().join("split.csv")).unwrap(), "n\n1\n");
    assert_eq!(fs::read_to_string(dir.path().join("split2.csv")).unwrap(), "2\n");
    assert_eq!(fs::read_to_string(dir.path().join("split3.csv")).unwrap(), "3\n");
}

#[test]
fn test_show_renders_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("people.csv");
    fs::write(&input, "name;age\nada;36\n").unwrap();

    csvstore()
        .arg("show")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("│ ada  │ 36  │"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    csvstore()
        .arg("show")
        .arg(dir.path().join("absent.csv"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load"));
}
