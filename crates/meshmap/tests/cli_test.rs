//! Integration tests for the `meshmap` CLI binary.
//!
//! Argument parsing, help output, shell completions and error handling run
//! without a backend; the data commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const NO_HOME: &str = "/tmp/meshmap-cli-test-nonexistent";

/// Build a [`Command`] for the `meshmap` binary with env isolation.
///
/// Clears all `MESHMAP_*` env vars and points config directories at `home`
/// so tests never touch the user's real configuration.
fn meshmap_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("meshmap");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("MESHMAP_PROFILE")
        .env_remove("MESHMAP_BASE_URL")
        .env_remove("MESHMAP_MAIN_URL")
        .env_remove("MESHMAP_OUTPUT")
        .env_remove("MESHMAP_INSECURE")
        .env_remove("MESHMAP_TIMEOUT");
    cmd
}

fn meshmap_cmd() -> assert_cmd::Command {
    meshmap_cmd_in(Path::new(NO_HOME))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn devices_body() -> serde_json::Value {
    json!({
        "!a1b2c3d4": {
            "device_id": "!a1b2c3d4",
            "long_name": "Harbor Relay",
            "latitude": 55.75,
            "longitude": 37.62,
            "last_updated": 1_699_999_400_000_i64
        },
        "!0000beef": {
            "hex_id": "!0000beef",
            "rawData": { "latitude_i": 598_000_000, "longitude_i": 303_000_000, "time": 1_699_930_000 }
        },
        "legacy-1": {
            "user": { "data": { "id": "!cafe0001", "shortName": "CAF" }, "serverTime": 1_699_800_000 }
        }
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = meshmap_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    meshmap_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Meshtastic")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("track"))
            .and(predicate::str::contains("metrics")),
    );
}

#[test]
fn test_version_flag() {
    meshmap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("meshmap"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    meshmap_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    meshmap_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = meshmap_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_without_backend() {
    meshmap_cmd()
        .arg("devices")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn test_invalid_output_format() {
    let output = meshmap_cmd()
        .args(["--output", "invalid", "devices"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_base_url() {
    meshmap_cmd()
        .args(["--base-url", "not a url", "devices"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_bad_bounds_rejected() {
    meshmap_cmd()
        .args(["devices", "--bounds", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("south,west,north,east"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` falls back to the default config when no file exists
    meshmap_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();

    meshmap_cmd_in(home.path())
        .args(["config", "init", "--base-url", "https://map.example.org/api", "--name", "home"])
        .assert()
        .success();

    meshmap_cmd_in(home.path())
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://map.example.org/api")
                .and(predicate::str::contains("\"default_profile\": \"home\"")),
        );

    // Same name again without --force is a conflict
    meshmap_cmd_in(home.path())
        .args(["config", "init", "--base-url", "https://other.example.org", "--name", "home"])
        .assert()
        .code(6);
}

#[test]
fn test_config_path() {
    meshmap_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_lists_normalized_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(&server)
        .await;

    let mut cmd = meshmap_cmd();
    cmd.args(["--base-url", &server.uri(), "--output", "plain", "devices"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "!0000beef\n!a1b2c3d4\n!cafe0001"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_json_carries_canonical_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(&server)
        .await;

    let mut cmd = meshmap_cmd();
    cmd.args(["--base-url", &server.uri(), "--output", "json", "devices", "--bounds", "59,29,60,31"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let devices = devices.as_array().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["node_id"], "!0000beef");
    assert_eq!(devices[0]["schema"], "raw_position");
    assert_eq!(devices[0]["coordinates"]["latitude"], 59.8);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_down_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut cmd = meshmap_cmd();
    cmd.args(["--base-url", &server.uri(), "--output", "json", "devices"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to fetch"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_device_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut cmd = meshmap_cmd();
    cmd.args(["--base-url", &server.uri(), "device", "!ffffffff"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_metrics_table_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/device-metrics:!a1b2c3d4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "batteryLevel": 91, "voltage": "N/A" })),
        )
        .mount(&server)
        .await;

    let mut cmd = meshmap_cmd();
    cmd.args(["--base-url", &server.uri(), "metrics", "!a1b2c3d4"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("batteryLevel: 91"), "{stdout}");
    assert!(stdout.contains("voltage: N/A"), "{stdout}");
}
