//! End-to-end tests against a running service instance.

use std::fs;

use serde_json::{json, Value};

mod common;
use common::TestServer;

#[tokio::test]
async fn test_apply_writes_both_slots() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/apply_config"))
        .json(&json!({
            "zshrc_content": "export FOO=bar",
            "zsh_config": "{\"theme\":\"dark\"}",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    assert_eq!(
        fs::read_to_string(server.home().join(".zshrc")).unwrap(),
        "export FOO=bar"
    );
    assert_eq!(
        fs::read_to_string(server.home().join(".zsh_cfg/zsh_config.json")).unwrap(),
        "{\"theme\":\"dark\"}"
    );
}

#[tokio::test]
async fn test_apply_with_empty_shell_init_touches_only_config() {
    let server = TestServer::spawn().await;
    let zshrc = server.home().join(".zshrc");
    fs::write(&zshrc, "# untouched").unwrap();

    let client = reqwest::Client::new();
    let res = client
        .post(server.url("/api/apply_config"))
        .json(&json!({ "zshrc_content": "", "zsh_config": "{\"a\":1}" }))
        .send()
        .await
        .unwrap();

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(fs::read_to_string(&zshrc).unwrap(), "# untouched");
    assert_eq!(
        fs::read_to_string(server.home().join(".zsh_cfg/zsh_config.json")).unwrap(),
        "{\"a\":1}"
    );
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let payload = "{\"aliases\":{\"ll\":\"ls -la\"}}\n\ttrailing\u{1b}[0m";
    let res = client
        .post(server.url("/api/save_config"))
        .json(&json!({ "config": payload }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    let res = client
        .get(server.url("/api/load_config"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["config"], payload);
}

#[tokio::test]
async fn test_repeated_save_keeps_previous_version_as_backup() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for payload in ["first", "second"] {
        let res = client
            .post(server.url("/api/save_config"))
            .json(&json!({ "config": payload }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    let slot = server.home().join(".zsh_cfg/zsh_config.json");
    assert_eq!(fs::read_to_string(&slot).unwrap(), "second");
    assert_eq!(
        fs::read_to_string(slot.with_file_name("zsh_config.json.backup")).unwrap(),
        "first"
    );
}

#[tokio::test]
async fn test_load_without_saved_config_reports_failure_in_envelope() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/load_config"))
        .send()
        .await
        .unwrap();

    // Domain failures ride inside a 200 envelope.
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("no saved configuration"));
    assert!(body.get("config").is_none());
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/save_config"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/save_config"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .request(reqwest::Method::OPTIONS, server.url("/api/apply_config"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_status_reports_version() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/status")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "operational");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/status")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}
