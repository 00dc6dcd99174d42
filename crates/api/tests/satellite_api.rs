//! Integration tests for the stats and health endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, get, seed, test_monitor, StubSource};
use moonlease_core::types::utc_now;
use moonlease_db::store::{MemoryReadingStore, ReadingStore};

fn long_ago() -> moonlease_core::types::Timestamp {
    NaiveDate::from_ymd_opt(2022, 7, 27)
        .unwrap()
        .and_hms_micro_opt(4, 49, 37, 681_136)
        .unwrap()
}

// ---------------------------------------------------------------------------
// GET /stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_aggregates_recent_readings() {
    let store = Arc::new(MemoryReadingStore::new());
    seed(&store, &[10, 40, 90], &[170.0, 200.0, 230.0]).await;
    let app = common::build_test_app(test_monitor(store, StubSource::answering(long_ago(), 213.0)));

    let response = get(app, "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["minimum"], 170.0);
    assert_eq!(data["maximum"], 230.0);
    assert_eq!(data["average"], 200.0);
    assert_eq!(data["count"], 3);
    assert_eq!(data["altitudes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn stats_bootstraps_empty_store_from_upstream() {
    let store = Arc::new(MemoryReadingStore::new());
    let source = StubSource::answering(long_ago(), 213.001);
    let app = common::build_test_app(test_monitor(Arc::clone(&store), Arc::clone(&source)));

    let json = body_json(get(app, "/stats").await).await;

    assert_eq!(json["data"]["minimum"], 213.001);
    assert_eq!(json["data"]["maximum"], 213.001);
    assert_eq!(json["data"]["average"], 213.001);
    assert_eq!(json["data"]["count"], 0);
    assert_eq!(json["data"]["altitudes"].as_array().unwrap().len(), 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn stats_with_upstream_down_and_no_history_is_empty_but_ok() {
    let store = Arc::new(MemoryReadingStore::new());
    let app = common::build_test_app(test_monitor(store, StubSource::down()));

    let response = get(app, "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["minimum"].is_null());
    assert!(json["data"]["maximum"].is_null());
    assert!(json["data"]["average"].is_null());
    assert_eq!(json["data"]["count"], 0);
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_ok_message() {
    let store = Arc::new(MemoryReadingStore::new());
    seed(&store, &[5, 30], &[200.0, 180.0]).await;
    let app = common::build_test_app(test_monitor(store, StubSource::answering(long_ago(), 213.0)));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], "Altitude is A-OK");
}

#[tokio::test]
async fn health_critical_message() {
    let store = Arc::new(MemoryReadingStore::new());
    seed(&store, &[5, 30], &[150.0, 140.0]).await;
    let app = common::build_test_app(test_monitor(store, StubSource::answering(long_ago(), 213.0)));

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["data"], "WARNING: RAPID ORBITAL DECAY IMMINENT");
}

#[tokio::test]
async fn health_warning_message_after_recent_dip() {
    let store = Arc::new(MemoryReadingStore::new());
    seed(&store, &[10, 90], &[200.0, 150.0]).await;
    let app = common::build_test_app(test_monitor(store, StubSource::answering(long_ago(), 213.0)));

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["data"], "Sustained Low Earth Orbit Resumed");
}

#[tokio::test]
async fn health_missing_message_when_no_recent_data() {
    let store = Arc::new(MemoryReadingStore::new());
    let source = StubSource::answering(long_ago(), 213.0);
    let app = common::build_test_app(test_monitor(Arc::clone(&store), Arc::clone(&source)));

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["data"], "WARNING: No altitude information available");
    // The gate still pulled one reading into history.
    assert_eq!(source.calls(), 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn health_uses_fresh_upstream_reading() {
    let store = Arc::new(MemoryReadingStore::new());
    let app = common::build_test_app(test_monitor(store, StubSource::answering(utc_now(), 120.0)));

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["data"], "WARNING: RAPID ORBITAL DECAY IMMINENT");
}

#[tokio::test]
async fn repeated_requests_within_staleness_hit_upstream_once() {
    let store = Arc::new(MemoryReadingStore::new());
    let source = StubSource::answering(utc_now(), 200.0);
    let monitor = test_monitor(store, Arc::clone(&source));

    for uri in ["/health", "/stats", "/health", "/stats"] {
        let app = common::build_test_app(Arc::clone(&monitor));
        assert_eq!(get(app, uri).await.status(), StatusCode::OK);
    }

    assert_eq!(source.calls(), 1);
}
