//! Integration tests for the `casaos` CLI binary.
//!
//! Argument parsing, help, completions and error exit codes run without a
//! device; the listing tests point the binary at a wiremock device.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const APP_GRID_PATH: &str = "/v2/app_management/web/appgrid";

/// Build a [`Command`] for the `casaos` binary with env isolation.
///
/// Clears all `CASAOS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn casaos_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("casaos");
    cmd.env("HOME", "/tmp/casaos-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/casaos-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("CASAOS_HOST")
        .env_remove("CASAOS_USERNAME")
        .env_remove("CASAOS_PASSWORD")
        .env_remove("CASAOS_PROFILE")
        .env_remove("CASAOS_OUTPUT")
        .env_remove("CASAOS_INSECURE")
        .env_remove("CASAOS_TIMEOUT")
        .env_remove("CASAOS_CONFIG_DEFAULT_PROFILE");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn app(id: &str, uncontrolled: bool, titles: serde_json::Value) -> serde_json::Value {
    json!({
        "store_app_id": id,
        "app_type": "v2app",
        "author_type": "official",
        "hostname": "casaos.local",
        "icon": "",
        "image": format!("linuxserver/{id}"),
        "index": "/",
        "is_uncontrolled": uncontrolled,
        "port": "8096",
        "scheme": "http",
        "status": "running",
        "title": titles
    })
}

async fn device(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(APP_GRID_PATH))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn jellyfin_and_sonarr() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "ok",
        "data": [
            app("jellyfin", true, json!([{ "custom": "", "en_us": "Jellyfin" }])),
            app("sonarr", false, json!([])),
        ]
    }))
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(args: Vec<String>, env: Vec<(&'static str, String)>) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        let mut cmd = casaos_cmd();
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.args(args).output().unwrap()
    })
    .await
    .unwrap()
}

fn list_args(host: &str, extra: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = ["--host", host, "--username", "admin", "--password", "secret"]
        .iter()
        .map(ToString::to_string)
        .collect();
    args.extend(extra.iter().map(ToString::to_string));
    args
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = casaos_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    casaos_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("CasaOS")
            .and(predicate::str::contains("apps"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    casaos_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("casaos"));
}

#[test]
fn test_completions_zsh() {
    casaos_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    casaos_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_missing_credentials_exit_2() {
    let output = casaos_cmd().args(["apps", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    for field in ["host", "username", "password"] {
        assert!(text.contains(field), "Expected '{field}' in output:\n{text}");
    }
    assert!(text.contains("CASAOS_PASSWORD"), "{text}");
}

#[test]
fn test_unknown_profile_exit_2() {
    let output = casaos_cmd()
        .args(["--profile", "nope", "apps"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nope"));
}

#[test]
fn test_invalid_host_exit_2() {
    let output = casaos_cmd()
        .args(list_args("ftp://casaos.local", &["apps"]))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_output_format() {
    let output = casaos_cmd()
        .args(["--output", "xml", "apps"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("xml"));
}

// ── Against a mock device ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json() {
    let server = device(jellyfin_and_sonarr()).await;
    let output = run(list_args(&server.uri(), &["-o", "json", "apps", "list"]), Vec::new()).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["store_app_id"], "jellyfin");
    assert_eq!(value[0]["is_uncontrolled"], true);
    assert_eq!(value[0]["title"][0]["en_us"], "Jellyfin");
    assert_eq!(value[1]["store_app_id"], "sonarr");
    assert_eq!(value[1]["title"], json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_plain_with_env_credentials() {
    let server = device(jellyfin_and_sonarr()).await;
    let env = vec![
        ("CASAOS_HOST", server.uri()),
        ("CASAOS_USERNAME", "admin".to_owned()),
        ("CASAOS_PASSWORD", "secret".to_owned()),
    ];
    let output = run(
        vec!["--output".into(), "plain".into(), "apps".into()],
        env,
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "jellyfin\nsonarr\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_table() {
    let server = device(jellyfin_and_sonarr()).await;
    let output = run(list_args(&server.uri(), &["apps", "list"]), Vec::new()).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Jellyfin"), "{stdout}");
    assert!(stdout.contains("sonarr"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_unknown_app_exit_4() {
    let server = device(jellyfin_and_sonarr()).await;
    let output = run(list_args(&server.uri(), &["apps", "get", "radarr"]), Vec::new()).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("radarr"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wrong_password_exit_3() {
    let server = device(jellyfin_and_sonarr()).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut args = list_args(&server.uri(), &["apps"]);
    args[5] = "wrong".into();
    let output = run(args, Vec::new()).await;

    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("401"), "{text}");
    assert!(!text.contains("wrong"), "password leaked:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_payload_exit_1() {
    let server = device(ResponseTemplate::new(200).set_body_string("[{\"store_app_id\":")).await;
    let output = run(list_args(&server.uri(), &["apps"]), Vec::new()).await;
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_device_exit_7() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let output = run(list_args(&uri, &["apps"]), Vec::new()).await;
    assert_eq!(output.status.code(), Some(7));
}
