mod common;

use std::time::{Duration, Instant};

use ddb_client::client::{ErrorKind, RequestOptions};
use ddb_client::TransportError;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn slow_meal() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(common::envelope(json!({"id": "m_1"})))
        .set_delay(Duration::from_secs(5))
}

#[tokio::test]
async fn test_cancellation_mid_flight_returns_promptly() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/meals/m_1"))
        .respond_with(slow_meal())
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let token = CancellationToken::new();
    let opts = RequestOptions::new().with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = client.get_meal("m_1", &opts).await.unwrap_err();
    canceller.await.expect("canceller panicked");

    assert!(err.is_cancelled(), "expected cancellation, got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_cancelled_token_never_dispatches() {
    let client = common::offline_client();
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .get_meal("m_1", &RequestOptions::new().with_cancellation(token))
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_caller_errors_take_precedence_over_cancellation() {
    let client = common::offline_client();
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .get_meal("", &RequestOptions::new().with_cancellation(token))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIdProvided);
}

#[tokio::test]
async fn test_deadline_exceeded() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/meals/m_1"))
        .respond_with(slow_meal())
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let opts = RequestOptions::new().with_timeout(Duration::from_millis(100));

    let err = client.get_meal("m_1", &opts).await.unwrap_err();
    match err {
        ddb_client::ClientError::Transport(TransportError::DeadlineExceeded(limit)) => {
            assert_eq!(limit, Duration::from_millis(100))
        }
        other => panic!("expected a deadline error, got {other:?}"),
    }
}
