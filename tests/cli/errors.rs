//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("update"));
    assert!(out.contains("load"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sem "));
}

#[test]
fn test_invalid_shell_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "cmd.exe"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "_sem");
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "#compdef sem");
}

#[test]
fn test_load_without_cache_suggests_update() {
    let t = Test::new();

    t.cmd()
        .arg("load")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("cache file not found: .cache.env")
                .and(predicate::str::contains("run: sem update")),
        );
}

#[test]
fn test_update_missing_input() {
    let t = Test::new();

    let output = t.update(&["-i", "missing.env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "input file not found: missing.env");
    assert!(!t.exists(".cache.missing.env"));
}

#[test]
fn test_update_refuses_unignored_cache_file() {
    let t = git_or_skip!();
    t.write(".gitignore", "");
    t.write(".env", "A=1\n");

    let output = t.update(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "cache file '.cache.env' is not ignored by git");
    assert_stderr_contains(&output, ".gitignore");
    assert!(!t.exists(".cache.env"));
}

#[test]
fn test_update_warns_outside_git() {
    let t = Test::new();
    t.write(".env", "A=1\n");

    let output = t.update(&[]);
    assert_success(&output);
    assert_stderr_contains(&output, "not inside a git repository");
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();
    t.write(".env", "A=1\n");

    let output = t.cmd().args(["--verbose", "update"]).output().unwrap();
    assert_success(&output);
}
