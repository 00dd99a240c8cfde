//! Tests for `sem update`.
//!
//! Secret lookups are served from the JSON fixture read by the
//! `test-backend` feature.

#![cfg(feature = "test-backend")]

use crate::support::*;

fn sample() -> Test {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", SAMPLE_ENV);
    t
}

#[test]
fn test_update_writes_cache_file() {
    let t = sample();

    let output = t.update(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "updated 6 environment variables in .cache.env");
    assert_eq!(t.read(".cache.env"), SAMPLE_CACHE);
}

#[test]
#[cfg(unix)]
fn test_update_cache_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = sample();
    assert_success(&t.update(&[]));

    let meta = std::fs::metadata(t.dir.path().join(".cache.env")).unwrap();
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
}

#[test]
fn test_update_inside_ignoring_git_repo() {
    let t = git_or_skip!();
    t.secrets(SECRETS);
    t.write(".env", SAMPLE_ENV);

    let output = t.update(&[]);
    assert_success(&output);
    assert!(!stderr(&output).contains("not inside a git repository"));
    assert_eq!(t.read(".cache.env"), SAMPLE_CACHE);
}

#[test]
fn test_update_no_quotes() {
    let t = sample();

    assert_success(&t.update(&["--no-quotes"]));
    let cache = t.read(".cache.env");
    assert!(cache.contains("DB_PASSWORD=s3cr3t\n"));
    assert!(cache.contains("CFG_b_1=20\n"));
    assert!(!cache.contains('\''));
}

#[test]
fn test_update_no_expand_json() {
    let t = sample();

    assert_success(&t.update(&["--no-expand-json"]));
    let cache = t.read(".cache.env");
    assert!(cache.contains("CFG='{\"a\":1,\"b\":[10,20]}'\n"));
    assert!(cache.contains("DB_PASSWORD='s3cr3t'\n"));
    assert!(!cache.contains("CFG_a"));
}

#[test]
fn test_update_bare_address_expands_without_prefix() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "sem://aws:secretsmanager/dev/db/creds\n");

    assert_success(&t.update(&[]));
    assert_eq!(t.read(".cache.env"), "password='s3cr3t'\nusername='admin'\n");
}

#[test]
fn test_update_bare_address_with_key() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "sem://aws:secretsmanager/dev/db/creds?key=username\n");

    assert_success(&t.update(&[]));
    assert_eq!(t.read(".cache.env"), "username='admin'\n");
}

#[test]
fn test_update_custom_input_path() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write("config/app.env", "KEY=sem://googlecloud:secretmanager/p/api-key\n");

    let output = t.update(&["-i", "config/app.env"]);
    assert_success(&output);
    assert_eq!(t.read(".cache.config_app.env"), "KEY='gcp-api-key'\n");
}

#[test]
fn test_update_then_load_with_export() {
    let t = sample();
    assert_success(&t.update(&[]));

    let output = t.load(&["-e"]);
    assert_success(&output);
    assert_stdout_lines(
        &output,
        &[
            "export API_KEY='gcp-api-key'",
            "export APP_ENV='production'",
            "export CFG_a='1'",
            "export CFG_b_0='10'",
            "export CFG_b_1='20'",
            "export DB_PASSWORD='s3cr3t'",
        ],
    );
}

#[test]
fn test_update_missing_secret_fails_without_writing() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "A=1\nB=sem://aws:secretsmanager/dev/missing\n");

    let output = t.update(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to retrieve secret for line 2");
    assert_stderr_contains(&output, "check your cloud credentials");
    assert!(!t.exists(".cache.env"));
}

#[test]
fn test_update_missing_key_fails() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "X=sem://aws:secretsmanager/dev/db/creds?key=nope\n");

    let output = t.update(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "key 'nope' does not exist");
    assert!(!t.exists(".cache.env"));
}

#[test]
fn test_update_key_on_non_json_secret_fails() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "X=sem://aws:secretsmanager/dev/plain?key=a\n");

    let output = t.update(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "secret is not JSON");
}

#[test]
fn test_update_keeps_unknown_platform_literal() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "X=sem://azure:keyvault/acct/name\n");

    assert_success(&t.update(&[]));
    assert_eq!(t.read(".cache.env"), "X='sem://azure:keyvault/acct/name'\n");
}

#[test]
fn test_update_keeps_malformed_address_literal() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "X=sem://aws:secretsmanager/only-account\n");

    assert_success(&t.update(&[]));
    assert_eq!(
        t.read(".cache.env"),
        "X='sem://aws:secretsmanager/only-account'\n"
    );
}

#[test]
fn test_update_overwrites_previous_cache() {
    let t = sample();
    t.write(".cache.env", "STALE='1'\n");

    assert_success(&t.update(&[]));
    assert_eq!(t.read(".cache.env"), SAMPLE_CACHE);
}

#[test]
fn test_update_endpoint_url_flag_accepted() {
    let t = sample();

    let output = t.update(&["--endpoint-url", "http://localhost:4566"]);
    assert_success(&output);
    assert_eq!(t.read(".cache.env"), SAMPLE_CACHE);
}

#[test]
fn test_update_multiline_value_survives_load() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "CERT=sem://aws:secretsmanager/dev/pem\n");

    assert_success(&t.update(&[]));
    assert_eq!(t.read(".cache.env"), "CERT_key='line1\\nline2'\n");

    let output = t.load(&["-e"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "export CERT_key='line1\nline2'\n");
}

#[test]
fn test_update_unsafe_key_is_never_exported() {
    let t = Test::new();
    t.secrets(SECRETS);
    t.write(".env", "sem://aws:secretsmanager/dev/mixed\n");

    let output = t.update(&[]);
    assert_success(&output);
    assert_stderr_contains(&output, "is not a valid shell variable name");

    let output = t.load(&["-e"]);
    assert_success(&output);
    assert_stdout_lines(&output, &["export ok='1'"]);
    assert!(!stdout(&output).contains("touch"));
}
