use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DRONE_ENV: &[(&str, &str)] = &[
    ("DRONE_REPO_NAME", "octo"),
    ("DRONE_REPO_LINK", "https://git.example.com/acme/octo"),
    ("DRONE_BUILD_STATUS", "failure"),
    ("DRONE_BUILD_NUMBER", "42"),
    ("DRONE_BUILD_LINK", "https://drone.example.com/acme/octo/42"),
    ("DRONE_FAILED_STEPS", "test"),
    ("DRONE_REPO_BRANCH", "main"),
    ("DRONE_COMMIT_AUTHOR", "alice"),
    ("DRONE_COMMIT_AUTHOR_NAME", "alice"),
    ("DRONE_COMMIT_SHA", "abcdef1234567890"),
    ("DRONE_COMMIT_LINK", "https://git.example.com/acme/octo/commit/abcdef1"),
    ("DRONE_COMMIT_MESSAGE", "fix flaky test"),
];

fn plugin() -> Command {
    let mut cmd = Command::cargo_bin("drone-feishu").unwrap();
    cmd.env_clear().envs(DRONE_ENV.iter().copied());
    cmd
}

#[test]
fn missing_webhook_exits_with_config_code() {
    plugin()
        .env("PLUGIN_SECRET", "s3cr3t")
        .assert()
        .failure()
        .code(predicate::eq(78))
        .stdout(predicate::str::contains(
            "missing required configuration: PLUGIN_WEBHOOK",
        ));
}

#[test]
fn missing_secret_is_reported() {
    plugin()
        .env("PLUGIN_WEBHOOK", "http://127.0.0.1:1/hook")
        .assert()
        .code(predicate::eq(78))
        .stdout(predicate::str::contains("PLUGIN_SECRET"));
}

#[test]
fn soft_fail_exits_zero() {
    plugin()
        .env("PLUGIN_SOFT_FAIL", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("PLUGIN_WEBHOOK"));
}

#[test]
fn unreachable_webhook_exits_with_transport_code() {
    plugin()
        .env("PLUGIN_WEBHOOK", "http://127.0.0.1:1/hook")
        .env("PLUGIN_SECRET", "s3cr3t")
        .env("PLUGIN_TIMEOUT", "2")
        .assert()
        .code(predicate::eq(69));
}

#[test]
fn preview_prints_signed_body() {
    let output = plugin()
        .arg("preview")
        .env("PLUGIN_WEBHOOK", "http://127.0.0.1:1/hook")
        .env("PLUGIN_SECRET", "s3cr3t")
        .env("PLUGIN_FOOTER", "link")
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["msg_type"], "interactive");
    assert_eq!(body["card"]["header"]["template"], "red");
    assert_eq!(body["card"]["header"]["title"]["content"], "❌ octo 构建失败 #42");

    let markdown = body["card"]["elements"][0]["content"].as_str().unwrap();
    assert!(markdown.contains("[#abcdef12](https://git.example.com/acme/octo/commit/abcdef1)"));
    assert!(markdown.contains("**👤 提交：** alice\n"));
    assert!(markdown.ends_with("\n---\nfix flaky test"));

    let elements = body["card"]["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[1]["tag"], "note");
}

#[test]
fn version_json() {
    Command::cargo_bin("drone-feishu")
        .unwrap()
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_card_to_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/bot/v2/hook/token"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"code":0,"msg":"success"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/open-apis/bot/v2/hook/token", server.uri());
    tokio::task::spawn_blocking(move || {
        plugin()
            .env("PLUGIN_WEBHOOK", url)
            .env("PLUGIN_SECRET", "s3cr3t")
            .env("PLUGIN_STRICT", "true")
            .assert()
            .success();
    })
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["msg_type"], "interactive");
    assert_eq!(body["sign"].as_str().unwrap().len(), 44);
    assert_eq!(body["card"]["elements"][1]["actions"][0]["type"], "primary");
}

#[tokio::test(flavor = "multi_thread")]
async fn strict_mode_exits_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"code":19021,"msg":"sign match fail or timestamp is not within one hour from current time"}"#,
        ))
        .mount(&server)
        .await;

    let url = server.uri();
    tokio::task::spawn_blocking(move || {
        plugin()
            .env("PLUGIN_WEBHOOK", url)
            .env("PLUGIN_SECRET", "s3cr3t")
            .env("PLUGIN_STRICT", "true")
            .assert()
            .code(predicate::eq(76))
            .stdout(predicate::str::contains("19021"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn debug_flag_logs_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"code":0,"msg":"reply-marker"}"#),
        )
        .expect(2)
        .mount(&server)
        .await;

    let url = server.uri();
    let (on, off) = tokio::task::spawn_blocking(move || {
        let run = |debug: &str| {
            plugin()
                .env("PLUGIN_WEBHOOK", &url)
                .env("PLUGIN_SECRET", "s3cr3t")
                .env("PLUGIN_DEBUG", debug)
                .env("DRONE_COMMIT_MESSAGE", "request-marker")
                .output()
                .unwrap()
        };
        (run("true"), run("false"))
    })
    .await
    .unwrap();

    assert!(on.status.success());
    let stderr = String::from_utf8_lossy(&on.stderr);
    assert!(stderr.contains("request body"), "{stderr}");
    assert!(stderr.contains("request-marker"), "{stderr}");
    assert!(stderr.contains(r#""msg_type":"interactive""#), "{stderr}");
    assert!(stderr.contains("response body"), "{stderr}");
    assert!(stderr.contains("reply-marker"), "{stderr}");

    assert!(off.status.success());
    let stderr = String::from_utf8_lossy(&off.stderr);
    assert!(!stderr.contains("request-marker"), "{stderr}");
    assert!(!stderr.contains("reply-marker"), "{stderr}");
}

#[test]
fn verbose_alone_does_not_log_bodies() {
    let output = plugin()
        .arg("-vv")
        .env("PLUGIN_WEBHOOK", "http://127.0.0.1:1/hook")
        .env("PLUGIN_SECRET", "s3cr3t")
        .env("PLUGIN_TIMEOUT", "2")
        .env("DRONE_COMMIT_MESSAGE", "request-marker")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(69));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("request-marker"));
}
