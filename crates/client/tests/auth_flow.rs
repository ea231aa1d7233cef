//! End-to-end coverage of the authentication flows against a mock server.

use faraday_client::{ClientConfig, FaradayClient, FaradayError, LoginOutcome};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;

#[tokio::test]
async fn login_reports_authenticated_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .and(body_json(json!({"email": "admin", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = support::authenticated_client(&server);
    let outcome = client.login("admin", "hunter2").await.expect("login");
    assert_eq!(outcome, LoginOutcome::Authenticated);
}

#[tokio::test]
async fn login_reports_second_factor_required_on_202() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = support::authenticated_client(&server);
    let outcome = client.login("admin", "hunter2").await.expect("login");
    assert_eq!(outcome, LoginOutcome::SecondFactorRequired);
}

#[tokio::test]
async fn login_reports_rejected_on_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = support::authenticated_client(&server);
    let outcome = client.login("admin", "wrong").await.expect("login");
    assert_eq!(outcome, LoginOutcome::Rejected);
}

#[tokio::test]
async fn login_reraises_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = support::authenticated_client(&server);
    let err = client.login("admin", "hunter2").await.expect_err("404");
    assert!(matches!(err, FaradayError::NotFound(_)));
}

#[tokio::test]
async fn login_reraises_connection_failures() {
    let base = support::unreachable_base_url();
    let client = FaradayClient::new(ClientConfig::new(Some(base.as_str()), false, None))
        .expect("client");

    let err = client.login("admin", "hunter2").await.expect_err("refused");
    assert!(matches!(err, FaradayError::Connection(_)));
}

#[tokio::test]
async fn get_token_runs_the_full_sequence_and_stores_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/_api/v3/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("tok-123")))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = support::anonymous_client(&server);
    let token = client.get_token("admin", "hunter2", None).await.expect("token");
    assert_eq!(token, "tok-123");
    assert_eq!(client.token(), Some("tok-123"));
}

#[tokio::test]
async fn get_token_submits_the_second_factor_when_given() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_api/confirmation"))
        .and(body_json(json!({"secret": "000111"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/_api/v3/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("tok-2fa")))
        .mount(&server)
        .await;

    let mut client = support::anonymous_client(&server);
    let token = client.get_token("admin", "hunter2", Some("000111")).await.expect("token");
    assert_eq!(token, "tok-2fa");
}

#[tokio::test]
async fn get_token_classifies_a_rejected_second_factor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_api/confirmation"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut client = support::anonymous_client(&server);
    let err = client.get_token("admin", "hunter2", Some("999999")).await.expect_err("2fa");
    assert!(matches!(err, FaradayError::InvalidSecondFactor(_)));
}

#[tokio::test]
async fn get_token_classifies_a_rejected_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut client = support::anonymous_client(&server);
    let err = client.get_token("admin", "wrong", None).await.expect_err("login");
    assert!(matches!(err, FaradayError::InvalidCredentials(_)));
}

#[tokio::test]
async fn get_token_reraises_not_found_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/login"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut client = support::anonymous_client(&server);
    let err = client.get_token("admin", "hunter2", None).await.expect_err("404");
    assert!(matches!(err, FaradayError::NotFound(_)));
}

#[tokio::test]
async fn get_token_is_idempotent_once_a_token_is_held() {
    let server = MockServer::start().await;

    let mut client = support::authenticated_client(&server);
    let token = client.get_token("admin", "hunter2", None).await.expect("token");
    assert_eq!(token, support::TEST_TOKEN);

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty(), "no network call expected, saw {}", requests.len());
}

#[tokio::test]
async fn is_token_valid_reflects_the_server_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = support::authenticated_client(&server);
    assert!(client.is_token_valid().await.expect("valid"));
}

#[tokio::test]
async fn is_token_valid_is_false_on_auth_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_api/session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = support::authenticated_client(&server);
    assert!(!client.is_token_valid().await.expect("invalid"));
}

#[tokio::test]
async fn is_token_valid_surfaces_connection_failures_as_errors() {
    let base = support::unreachable_base_url();
    let client = FaradayClient::new(ClientConfig::new(
        Some(base.as_str()),
        false,
        Some(support::TEST_TOKEN),
    ))
    .expect("client");

    let err = client.is_token_valid().await.expect_err("refused");
    assert!(matches!(err, FaradayError::Connection(_)));
}
