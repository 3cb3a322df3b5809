//! End-to-end runs of the binary against a mocked text-generation service.

use std::process::{Command, Output};

use assert_cmd::cargo::CommandCargoExt;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_TEXT: &str = "This paper discusses resistance mechanisms...";

fn completion(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

/// Run the binary in an empty directory so no `.env` is picked up.
async fn run_binary(server: &MockServer, args: &[&str], api_key: Option<&str>) -> Output {
    let workdir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("gene-summary").unwrap();
    cmd.current_dir(workdir.path())
        .args(args)
        .env("OPENAI_BASE_URL", format!("{}/v1", server.uri()))
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY");
    if let Some(key) = api_key {
        cmd.env("OPENAI_API_KEY", key);
    }
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();
    drop(workdir);
    output
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_run_prints_only_the_service_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(SERVICE_TEXT)))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_binary(&server, &["PF3D7_1133400", "27128092"], Some("sk-test")).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), SERVICE_TEXT);
    assert!(output.stderr.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["temperature"], 0.0);
    let payload = body["messages"].to_string();
    assert!(payload.contains("PF3D7_1133400"));
    assert!(payload.contains("27128092"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_credential_fails_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(SERVICE_TEXT)))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_binary(&server, &[], None).await;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OPENAI_API_KEY"), "{stderr}");
    assert_eq!(stderr.trim_end().lines().count(), 1, "{stderr}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn service_rejection_is_reported_on_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_binary(&server, &[], Some("sk-test")).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("401"), "{stderr}");
    assert!(stderr.contains("Incorrect API key provided"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_completion_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let output = run_binary(&server, &[], Some("sk-test")).await;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no content"));
}

#[tokio::test(flavor = "multi_thread")]
async fn null_content_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_binary(&server, &[], Some("sk-test")).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("text-generation service returned no content"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn undecodable_completion_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_binary(&server, &[], Some("sk-test")).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed completion response"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_service_is_reported() {
    let workdir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("gene-summary").unwrap();
    // Nothing listens on the discard port locally.
    cmd.current_dir(workdir.path())
        .env("OPENAI_BASE_URL", "http://127.0.0.1:9/v1")
        .env("OPENAI_API_KEY", "sk-test")
        .env_remove("RUST_LOG");
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("text-generation request failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn each_invocation_calls_the_service_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(SERVICE_TEXT)))
        .expect(2)
        .mount(&server)
        .await;

    for _ in 0..2 {
        let output = run_binary(&server, &["PF3D7_1133400", "27128092"], Some("sk-test")).await;
        assert!(output.status.success());
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
