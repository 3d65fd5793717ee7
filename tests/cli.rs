use assert_cmd::Command;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn report_cmd(url: Option<&str>) -> Command {
    let mut cmd = Command::cargo_bin("authors-report").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_clear()
        .env("RUST_LOG", "off");
    if let Some(url) = url {
        cmd.env("GRAPHQL_URL", url);
    }
    cmd
}

async fn run(url: Option<String>) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || report_cmd(url.as_deref()).assert())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_report_and_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "authors": [
                { "id": "1", "name": "Ada", "posts": [{ "title": "T1", "content": "C1" }] }
            ] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    run(Some(server.uri()))
        .await
        .success()
        .stdout("Ada\nT1\nC1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_report_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "authors": [] } })),
        )
        .mount(&server)
        .await;

    run(Some(server.uri())).await.success().stdout("");
}

#[tokio::test(flavor = "multi_thread")]
async fn refused_connection_fails_without_output() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    run(Some(format!("http://{addr}/graphql")))
        .await
        .failure()
        .code(3)
        .stdout("");
}

#[tokio::test(flavor = "multi_thread")]
async fn graphql_errors_fail_without_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "boom" }]
        })))
        .mount(&server)
        .await;

    run(Some(server.uri())).await.failure().code(4).stdout("");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn unrelated_non_unicode_var_is_ignored() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "authors": [{ "id": "1", "name": "Ada", "posts": [] }] }
        })))
        .mount(&server)
        .await;

    let url = server.uri();
    tokio::task::spawn_blocking(move || {
        report_cmd(Some(&url))
            .env("UNRELATED_BYTES", OsString::from_vec(vec![b'f', 0xff, b'o']))
            .assert()
    })
    .await
    .unwrap()
    .success()
    .stdout("Ada\n");
}

#[cfg(unix)]
#[test]
fn non_unicode_url_is_a_config_error() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    report_cmd(None)
        .env("GRAPHQL_URL", OsString::from_vec(vec![b'h', 0xff]))
        .assert()
        .failure()
        .code(2)
        .stdout("");
}

#[test]
fn missing_url_is_a_config_error() {
    report_cmd(None).assert().failure().code(2).stdout("");
}
