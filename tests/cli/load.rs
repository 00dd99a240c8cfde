//! Tests for `sem load`.

use crate::support::*;

#[test]
fn test_load_prints_sorted_plain_lines() {
    let t = Test::new();
    t.write(".cache.env", "B='two words'\nA='1'\n");

    let output = t.load(&[]);
    assert_success(&output);
    assert_stdout_lines(&output, &["A=1", "B=two words"]);
}

#[test]
fn test_load_with_export() {
    let t = Test::new();
    t.write(".cache.env", "A='1'\nQUOTE=it's\n");

    let output = t.load(&["--with-export"]);
    assert_success(&output);
    assert_stdout_lines(&output, &["export A='1'", r"export QUOTE='it'\''s'"]);
}

#[test]
fn test_load_only_unset() {
    let t = Test::new();
    t.write(".cache.env", "SEM_TEST_ALREADY_SET='x'\nFRESH='y'\n");

    let output = t
        .cmd()
        .env("SEM_TEST_ALREADY_SET", "from-env")
        .args(["load", "--only-unset"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_lines(&output, &["FRESH=y"]);
}

#[test]
fn test_load_custom_input() {
    let t = Test::new();
    t.write(".cache.config_app.env", "X='1'\n");

    let output = t.load(&["-i", "config/app.env"]);
    assert_success(&output);
    assert_stdout_lines(&output, &["X=1"]);
}

#[test]
fn test_load_input_from_env() {
    let t = Test::new();
    t.write(".cache.app.env", "Y='2'\n");

    let output = t
        .cmd()
        .env("SEM_INPUT", "app.env")
        .arg("load")
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_lines(&output, &["Y=2"]);
}

#[test]
fn test_load_empty_cache() {
    let t = Test::new();
    t.write(".cache.env", "");

    let output = t.load(&[]);
    assert_success(&output);
    assert!(stdout(&output).is_empty());
}
