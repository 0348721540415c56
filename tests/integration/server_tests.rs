//! HTTP API tests, driven through the router without binding a socket

use crate::support::{mount_acme, relevance_json, test_fetcher, StubCompletion};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use company_brief::config::Config;
use company_brief::server::{router, serve_with_shutdown, AppState};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

fn app(completion: StubCompletion) -> axum::Router {
    let config = Config::default();
    router(AppState::new(&config, test_fetcher(), Arc::new(completion)))
}

fn analyze(company: &str, url: &str) -> Request<Body> {
    let body = serde_json::json!({ "company_name": company, "url": url }).to_string();
    Request::builder()
        .method("POST")
        .uri("/api/analyze/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_root_banner() {
    let response = app(StubCompletion::new("{}", &[]))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json["detail"],
        "Welcome to the Root of the Company Brief Service!"
    );
}

#[tokio::test]
async fn test_analyze_streams_summary() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_acme(&mock_server).await;

    let completion = StubCompletion::new(
        relevance_json("about page", &format!("{}/about", base_url)),
        &["## Acme", "\n", "Widgets for everyone."],
    );

    let response = app(completion)
        .oneshot(analyze("Acme", &format!("{}/", base_url)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"## Acme\nWidgets for everyone.");
}

#[tokio::test]
async fn test_analyze_unreachable_site_returns_error_json() {
    let response = app(StubCompletion::new(r#"{"links":[]}"#, &["unused"]))
        .oneshot(analyze("Ghost Corp", "http://127.0.0.1:1/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate summary: "));
}

#[tokio::test]
async fn test_analyze_completion_failure_returns_error_json() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_acme(&mock_server).await;

    let response = app(StubCompletion::failing_summary(r#"{"links":[]}"#))
        .oneshot(analyze("Acme", &format!("{}/", base_url)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn test_analyze_rejects_relative_url() {
    let response = app(StubCompletion::new("{}", &[]))
        .oneshot(analyze("Acme", "/not/absolute"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_server_stops_on_shutdown_signal() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(
        &Config::default(),
        test_fetcher(),
        Arc::new(StubCompletion::new("{}", &[])),
    );

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve_with_shutdown(listener, state, async move {
        let _ = stop_rx.await;
    }));

    let banner: serde_json::Value = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        banner["detail"],
        "Welcome to the Root of the Company Brief Service!"
    );

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
        .await
        .expect("Server should stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}
