//! Integration tests for the `nmctl` CLI binary.
//!
//! Argument parsing, help output, shell completions and error exit codes,
//! plus check-mode runs against a wiremock Netmaker API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `nmctl` binary with env isolation.
///
/// Clears all `NMCTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn nmctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("nmctl");
    cmd.env("HOME", "/tmp/nmctl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/nmctl-cli-test-nonexistent")
        .env_remove("NMCTL_PROFILE")
        .env_remove("NMCTL_BASE_URL")
        .env_remove("NMCTL_MASTER_KEY")
        .env_remove("NMCTL_USERNAME")
        .env_remove("NMCTL_PASSWORD")
        .env_remove("NMCTL_INSECURE")
        .env_remove("NMCTL_TIMEOUT")
        .env_remove("NMCTL_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = nmctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    nmctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Netmaker")
            .and(predicate::str::contains("network"))
            .and(predicate::str::contains("extclient"))
            .and(predicate::str::contains("apply")),
    );
}

#[test]
fn test_version_flag() {
    nmctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nmctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    nmctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    nmctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_extclient_requires_network_flag() {
    let output = nmctl_cmd().args(["extclient", "dev1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--network"));
}

#[test]
fn test_invalid_state_is_rejected() {
    nmctl_cmd()
        .args(["network", "net1", "--state", "gone"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_base_url() {
    nmctl_cmd()
        .args(["network", "net1", "--master-key", "k"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url is required"));
}

#[test]
fn test_missing_credentials() {
    nmctl_cmd()
        .args(["network", "net1", "--base-url", "http://127.0.0.1:9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("master_key, password"));
}

#[test]
fn test_unknown_profile() {
    nmctl_cmd()
        .args(["--profile", "nope", "network", "net1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_config_path() {
    nmctl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Against a mock server ───────────────────────────────────────────

async fn run_nmctl(args: Vec<String>) -> std::process::Output {
    tokio::task::spawn_blocking(move || nmctl_cmd().args(args).output().unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_check_mode_create_sends_no_mutation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/networks/net1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_nmctl(vec![
        "--check".into(),
        "--output".into(),
        "json".into(),
        "--base-url".into(),
        server.uri(),
        "--master-key".into(),
        "mk".into(),
        "network".into(),
        "net1".into(),
        "--addressrange".into(),
        "10.0.0.0/24".into(),
    ])
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed,
        json!({
            "changed": true,
            "resource": null,
            "msg": "Network 'net1' would be created (check mode)"
        })
    );
}

#[tokio::test]
async fn test_missing_gateway_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extclients/iot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/nodes/iot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let output = run_nmctl(vec![
        "--base-url".into(),
        server.uri(),
        "--master-key".into(),
        "mk".into(),
        "extclient".into(),
        "dev1".into(),
        "--network".into(),
        "iot".into(),
    ])
    .await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("No nodes found in network 'iot'"));
}

#[tokio::test]
async fn test_apply_file_in_sync() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/networks/net1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "netid": "net1", "defaultmtu": 1420 })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("net1.yaml");
    std::fs::write(
        &file,
        format!(
            "resource_type: network\nname: net1\nbase_url: {}\nmaster_key: mk\ndefaultmtu: 1420\n",
            server.uri()
        ),
    )
    .unwrap();

    let output = run_nmctl(vec![
        "--output".into(),
        "plain".into(),
        "apply".into(),
        file.display().to_string(),
    ])
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Network 'net1' already exists with desired configuration"
    );
}
