//! `SatelliteClient` against a local axum stub of the telemetry endpoint.

use std::net::SocketAddr;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use moonlease_telemetry::{SatelliteClient, TelemetryError, TelemetrySource};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, path: &str) -> SatelliteClient {
    SatelliteClient::new(format!("http://{addr}{path}"), Duration::from_secs(2)).unwrap()
}

fn stub() -> Router {
    Router::new()
        .route(
            "/api/satellite/data",
            get(|| async {
                Json(json!({
                    "last_updated": "2022-07-27T04:49:37.681136Z",
                    "altitude": "213.001",
                    "source": "calc"
                }))
            }),
        )
        .route("/empty", get(|| async { Json(json!({})) }))
        .route(
            "/broken",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        )
        .route("/not-json", get(|| async { "hello" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetches_and_normalizes_reading() {
    let addr = serve(stub()).await;
    let client = client_for(addr, "/api/satellite/data");

    let reading = client.fetch_reading().await.unwrap().expect("reading");

    assert_eq!(reading.altitude, 213.001);
    assert_eq!(reading.timestamp.to_string(), "2022-07-27 04:49:37.681136");
}

#[tokio::test]
async fn empty_object_is_no_data() {
    let addr = serve(stub()).await;
    let client = client_for(addr, "/empty");

    assert!(client.fetch_reading().await.unwrap().is_none());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let addr = serve(stub()).await;
    let client = client_for(addr, "/broken");

    let err = client.fetch_reading().await.unwrap_err();
    assert_matches!(
        err,
        TelemetryError::Status { status: 502, ref body } if body == "upstream down"
    );
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let addr = serve(stub()).await;
    let client = client_for(addr, "/not-json");

    assert_matches!(
        client.fetch_reading().await,
        Err(TelemetryError::Parse(_))
    );
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let addr = serve(stub()).await;
    let client =
        SatelliteClient::new(format!("http://{addr}/slow"), Duration::from_millis(200)).unwrap();

    assert_matches!(
        client.fetch_reading().await,
        Err(TelemetryError::Request(_))
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_request_error() {
    // Bind then drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, "/api/satellite/data");
    assert_matches!(
        client.fetch_reading().await,
        Err(TelemetryError::Request(_))
    );
}
