//! Integration tests for the `octo` CLI binary.
//!
//! These tests cover argument parsing, help output, shell completions,
//! config handling, and error exit codes. Requests only ever go to a local
//! wiremock server or a closed localhost port.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const ENV_KEYS: &[&str] = &[
    "OCTOPUS_CONFIG",
    "OCTOPUS_OUTPUT",
    "OCTOPUS_API_KEY",
    "OCTOPUS_ELECTRICITY_SERIAL",
    "OCTOPUS_ELECTRICITY_MPAN",
    "OCTOPUS_ELECTRICITY_PRODUCT_CODE",
    "OCTOPUS_ELECTRICITY_REGION",
    "OCTOPUS_GAS_SERIAL",
    "OCTOPUS_GAS_MPRN",
    "OCTOPUS_GAS_PRODUCT_CODE",
    "OCTOPUS_GAS_REGION",
    "OCTOPUS_BASE_URL",
    "OCTOPUS_TIMEOUT",
    "RUST_LOG",
];

/// Build a [`Command`] for the `octo` binary with env isolation.
///
/// Clears every `OCTOPUS_*` variable and points the config file into
/// `dir`, so tests never touch the user's real configuration.
fn octo_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("octo");
    cmd.env("HOME", dir).env("XDG_CONFIG_HOME", dir);
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.arg("--config").arg(dir.join("config.toml"));
    cmd
}

/// Every identity flag, enough to build a client without a config file.
const ACCOUNT: &[&str] = &[
    "--api-key",
    "sk_test_123",
    "--electricity-serial",
    "abc1234",
    "--electricity-mpan",
    "1234567890",
    "--electricity-product-code",
    "21JBLAH",
    "--electricity-region",
    "Z",
    "--gas-serial",
    "cba4321",
    "--gas-mprn",
    "0987654321",
];

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("octo");
    cmd.env("HOME", dir.path());
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("Octopus Energy")
            .and(predicate::str::contains("meter"))
            .and(predicate::str::contains("tariff"))
            .and(predicate::str::contains("consumption"))
            .and(predicate::str::contains("--api-key")),
    );
}

#[test]
fn test_base_url_is_hidden_from_help() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url").not());
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_unknown_resource_type_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["meter", "water"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_charge_type_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["tariff", "electricity", "peak-rates"])
        .assert()
        .code(2);
}

#[test]
fn test_consumption_requires_a_period() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["consumption", "electricity"])
        .assert()
        .code(2);
}

#[test]
fn test_consumption_date_conflicts_with_range() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args([
            "consumption",
            "gas",
            "--date",
            "2024-01-01",
            "--from",
            "2024-01-01T00:00:00Z",
            "--to",
            "2024-01-02T00:00:00Z",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_zero_page_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["tariff", "gas", "standing-charges", "--page-size", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_reversed_period_is_rejected_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", "http://127.0.0.1:1"])
        .args([
            "tariff",
            "electricity",
            "standard-unit-rates",
            "--from",
            "2024-02-01T00:00:00Z",
            "--to",
            "2024-01-01T00:00:00Z",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid value for --from"), "{text}");
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_api_key_exits_with_auth_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(["meter", "electricity"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No API key configured"), "{text}");
}

#[test]
fn test_missing_meter_setting_names_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(["--api-key", "sk_test_123", "meter", "electricity"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("OCTOPUS_ELECTRICITY_SERIAL"), "{text}");
}

#[test]
fn test_settings_come_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .env("OCTOPUS_API_KEY", "sk_env")
        .env("OCTOPUS_ELECTRICITY_SERIAL", "abc1234")
        .args(["meter", "electricity"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("OCTOPUS_ELECTRICITY_MPAN"), "{text}");
}

#[test]
fn test_connection_refused_exits_with_connection_code() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", "http://127.0.0.1:1", "meter", "gas"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not reach"));
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn test_config_path_prints_override() {
    let dir = tempfile::tempdir().unwrap();
    octo_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");

    octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["config", "init"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("electricity_mpan = \"1234567890\""), "{written}");
    assert!(written.contains("api_key = \"sk_test_123\""), "{written}");

    octo_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    octo_cmd(dir.path())
        .args(["--gas-region", "H", "config", "init", "--force"])
        .assert()
        .success();

    let rewritten = std::fs::read_to_string(&file).unwrap();
    assert!(rewritten.contains("gas_region = \"H\""), "{rewritten}");
    assert!(rewritten.contains("gas_mprn = \"0987654321\""), "{rewritten}");
}

#[test]
fn test_config_show_masks_api_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "api_key = \"sk_secret\"\ngas_mprn = \"0987654321\"\n",
    )
    .unwrap();

    octo_cmd(dir.path())
        .args(["-o", "json-compact", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("********")
                .and(predicate::str::contains("sk_secret").not())
                .and(predicate::str::contains("\"gas_mprn\":\"0987654321\"")),
        );
}

// ── Against a mock API ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_meter_prints_response_verbatim() {
    let server = MockServer::start().await;
    let body = json!({ "gsp": "_C", "mpan": "1234567890", "profile_class": 1 });
    Mock::given(method("GET"))
        .and(path("/electricity-meter-points/1234567890"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", &server.uri(), "-o", "json-compact"])
        .args(["meter", "electricity"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, body);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_consumption_all_follows_next_links() {
    let server = MockServer::start().await;
    let consumption = "/gas-meter-points/0987654321/meters/cba4321/consumption";
    let next = format!("{}{consumption}?page=2", server.uri());

    Mock::given(method("GET"))
        .and(path(consumption))
        .and(query_param("period_from", "2024-01-01T00:00:00Z"))
        .and(query_param("period_to", "2024-01-01T23:30:00Z"))
        .and(query_param("group_by", "hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": next,
            "previous": null,
            "results": [{ "consumption": 1.5, "interval_start": "2024-01-01T00:00:00Z" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(consumption))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [{ "consumption": 2.5, "interval_start": "2024-01-01T01:00:00Z" }]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", &server.uri(), "-o", "json-compact"])
        .args([
            "consumption",
            "gas",
            "--date",
            "2024-01-01",
            "--group-by",
            "hourly",
            "--all",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!([
            { "consumption": 1.5, "interval_start": "2024-01-01T00:00:00Z" },
            { "consumption": 2.5, "interval_start": "2024-01-01T01:00:00Z" }
        ])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_numeric_meter_numbers_from_environment() {
    let server = MockServer::start().await;
    let body = json!({ "mprn": "0987654321" });
    Mock::given(method("GET"))
        .and(path("/gas-meter-points/0987654321"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .env("OCTOPUS_API_KEY", "sk_env")
        .env("OCTOPUS_ELECTRICITY_SERIAL", "19012345")
        .env("OCTOPUS_ELECTRICITY_MPAN", "1200012345678")
        .env("OCTOPUS_GAS_SERIAL", "0012345678")
        .env("OCTOPUS_GAS_MPRN", "0987654321")
        .env("OCTOPUS_BASE_URL", server.uri())
        .args(["-o", "json-compact", "meter", "gas"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, body);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_all_fails_when_a_later_page_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex("/electricity-tariffs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "next": format!("{}/p2", server.uri()),
            "previous": null,
            "results": [{ "value_inc_vat": 14.5 }, { "value_inc_vat": 16.0 }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p2"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid API key." })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", &server.uri()])
        .args(["tariff", "electricity", "standard-unit-rates", "--all"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "{}", combined_output(&output));
    let text = combined_output(&output);
    assert!(text.contains("Invalid API key"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_next_refuses_a_link_to_another_host() {
    let server = MockServer::start().await;
    let elsewhere = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
        .expect(0)
        .mount(&elsewhere)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let link = format!("{}/industry/grid-supply-points?page=2", elsewhere.uri());
    let output = octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", &server.uri(), "next", &link])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Refusing to send the API key"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_json_response_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = octo_cmd(dir.path())
        .args(ACCOUNT)
        .args(["--base-url", &server.uri(), "gsp", "--postcode", "SW1A 1AA"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("Bad Gateway"), "{text}");
}
