//! Platform adapter tests against a throwaway upstream served on localhost.
//!
//! Run with: cargo test --test platform_client_test

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, to_bytes};
use axum::extract::{Path, RawQuery};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use uuid::Uuid;

use sensor_registry::common::AppState;
use sensor_registry::config::{Config, Deployment};
use sensor_registry::platform::{
    PlatformClient, PlatformError, PlatformOutcome, PlatformQueryParameters, PlatformReading,
};
use sensor_registry::routes::build_router;
use sensor_registry::store::InMemorySensorStore;

fn config(endpoint: &str, timeout_seconds: u64) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        platform_endpoint: endpoint.to_string(),
        platform_timeout_seconds: timeout_seconds,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        deployment: Deployment::Local,
    }
}

fn client(timeout_seconds: u64) -> PlatformClient {
    PlatformClient::new(&config("", timeout_seconds)).expect("platform client")
}

fn sample_reading() -> PlatformReading {
    PlatformReading {
        stream_id: Uuid::new_v4(),
        timestamp: Utc.with_ymd_and_hms(2024, 10, 18, 16, 0, 0).unwrap(),
        stored_at: Utc.with_ymd_and_hms(2024, 10, 18, 16, 0, 5).unwrap(),
        value: 1.0,
    }
}

/// Fake platform. Returns its base URL and the raw query of the last `/data` call.
async fn spawn_upstream(reading: PlatformReading) -> (String, Arc<Mutex<Option<String>>>) {
    let last_query = Arc::new(Mutex::new(None));
    let recorded = last_query.clone();

    let app = Router::new()
        .route(
            "/data",
            get(move |RawQuery(query): RawQuery| {
                let recorded = recorded.clone();
                let reading = reading.clone();
                async move {
                    *recorded.lock().unwrap() = query;
                    Json(reading)
                }
            }),
        )
        .route(
            "/status/{code}",
            get(|Path(code): Path<u16>| async move {
                StatusCode::from_u16(code).unwrap_or(StatusCode::IM_A_TEAPOT)
            }),
        )
        .route(
            "/malformed",
            get(|| async { Json(json!({ "unexpected": true })) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                StatusCode::OK
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}"), last_query)
}

/// Address that refuses connections
async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/data")
}

#[tokio::test]
async fn success_returns_status_and_payload() {
    let expected = sample_reading();
    let (base, _) = spawn_upstream(expected.clone()).await;

    let outcome = client(5)
        .fetch_platform_data(
            &format!("{base}/data"),
            &PlatformQueryParameters::default(),
            &CancellationToken::new(),
        )
        .await
        .expect("not cancelled");

    assert_eq!(outcome.status(), StatusCode::OK);
    let reading = outcome.reading().expect("payload");
    assert_eq!(reading.stream_id, expected.stream_id);
    assert_eq!(reading.timestamp, expected.timestamp);
    assert_eq!(reading.stored_at, expected.stored_at);
    assert_eq!(reading.value, expected.value);
}

#[tokio::test]
async fn upstream_statuses_pass_through_without_payload() {
    let (base, _) = spawn_upstream(sample_reading()).await;
    let client = client(5);

    for status in [
        StatusCode::NO_CONTENT,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::UNAUTHORIZED,
        StatusCode::BAD_REQUEST,
    ] {
        let outcome = client
            .fetch_platform_data(
                &format!("{base}/status/{}", status.as_u16()),
                &PlatformQueryParameters::default(),
                &CancellationToken::new(),
            )
            .await
            .expect("not cancelled");

        assert_eq!(outcome, PlatformOutcome::Upstream(status));
        assert!(outcome.reading().is_none());
    }
}

#[tokio::test]
async fn connection_failure_is_an_internal_failure() {
    let endpoint = closed_endpoint().await;

    let outcome = client(5)
        .fetch_platform_data(
            &endpoint,
            &PlatformQueryParameters::default(),
            &CancellationToken::new(),
        )
        .await
        .expect("not cancelled");

    assert_eq!(outcome, PlatformOutcome::Failed);
    assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn malformed_payload_is_an_internal_failure() {
    let (base, _) = spawn_upstream(sample_reading()).await;

    let outcome = client(5)
        .fetch_platform_data(
            &format!("{base}/malformed"),
            &PlatformQueryParameters::default(),
            &CancellationToken::new(),
        )
        .await
        .expect("not cancelled");

    assert_eq!(outcome, PlatformOutcome::Failed);
}

#[tokio::test]
async fn timeout_is_an_internal_failure() {
    let (base, _) = spawn_upstream(sample_reading()).await;

    let outcome = client(1)
        .fetch_platform_data(
            &format!("{base}/slow"),
            &PlatformQueryParameters::default(),
            &CancellationToken::new(),
        )
        .await
        .expect("not cancelled");

    assert_eq!(outcome, PlatformOutcome::Failed);
}

#[tokio::test]
async fn cancellation_aborts_the_call() {
    let (base, _) = spawn_upstream(sample_reading()).await;
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let result = client(60)
        .fetch_platform_data(
            &format!("{base}/slow"),
            &PlatformQueryParameters::default(),
            &cancel,
        )
        .await;

    assert!(matches!(result, Err(PlatformError::Cancelled)));
}

#[tokio::test]
async fn only_set_parameters_are_forwarded() {
    let (base, last_query) = spawn_upstream(sample_reading()).await;
    let stream_id = Uuid::new_v4();
    let params = PlatformQueryParameters {
        stream_id: Some(stream_id),
        from: Some(Utc.with_ymd_and_hms(2024, 10, 18, 0, 0, 0).unwrap()),
        to: None,
        limit: None,
    };

    client(5)
        .fetch_platform_data(&format!("{base}/data"), &params, &CancellationToken::new())
        .await
        .expect("not cancelled");

    let query = last_query.lock().unwrap().clone();
    assert_eq!(
        query.as_deref(),
        Some(format!("streamId={stream_id}&from=2024-10-18T00%3A00%3A00Z").as_str())
    );
}

fn proxy_app(endpoint: &str) -> (Router, CancellationToken) {
    let config = config(endpoint, 5);
    let client = PlatformClient::new(&config).expect("platform client");
    let shutdown = CancellationToken::new();
    let state = AppState::new(
        Arc::new(InMemorySensorStore::new()),
        config,
        client,
        shutdown.clone(),
    );
    (build_router(state), shutdown)
}

async fn proxy_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, bytes.to_vec())
}

#[tokio::test]
async fn proxy_route_returns_reading() {
    let expected = sample_reading();
    let (base, last_query) = spawn_upstream(expected.clone()).await;
    let (app, _) = proxy_app(&format!("{base}/data"));

    let (status, bytes) = proxy_get(app, "/api/platform/data?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    let reading: PlatformReading = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(reading, expected);
    assert_eq!(last_query.lock().unwrap().as_deref(), Some("limit=5"));
}

#[tokio::test]
async fn proxy_route_passes_upstream_status_with_empty_body() {
    let (base, _) = spawn_upstream(sample_reading()).await;
    let (app, _) = proxy_app(&format!("{base}/status/401"));

    let (status, bytes) = proxy_get(app, "/api/platform/data").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn proxy_route_hides_failure_details() {
    let (app, _) = proxy_app(&closed_endpoint().await);

    let (status, bytes) = proxy_get(app, "/api/platform/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["error"], "An internal server error occurred.");
}

#[tokio::test]
async fn proxy_route_reports_cancellation_on_shutdown() {
    let (base, _) = spawn_upstream(sample_reading()).await;
    let (app, shutdown) = proxy_app(&format!("{base}/slow"));
    shutdown.cancel();

    let (status, _) = proxy_get(app, "/api/platform/data").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
