#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use moonlease_api::config::ServerConfig;
use moonlease_api::router::build_app_router;
use moonlease_api::state::AppState;
use moonlease_core::types::{utc_now, Timestamp};
use moonlease_db::models::reading::NewReading;
use moonlease_db::store::{MemoryReadingStore, ReadingStore};
use moonlease_monitor::{MonitorSettings, SatelliteMonitor};
use moonlease_telemetry::{TelemetryError, TelemetryReading, TelemetrySource};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Telemetry source that answers with a fixed reading, or fails when `None`.
pub struct StubSource {
    reading: Mutex<Option<TelemetryReading>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn answering(timestamp: Timestamp, altitude: f64) -> Arc<Self> {
        Arc::new(Self {
            reading: Mutex::new(Some(TelemetryReading {
                timestamp,
                altitude,
            })),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn down() -> Arc<Self> {
        Arc::new(Self {
            reading: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetrySource for StubSource {
    async fn fetch_reading(&self) -> Result<Option<TelemetryReading>, TelemetryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match *self.reading.lock().unwrap() {
            Some(r) => Ok(Some(r)),
            None => Err(TelemetryError::Status {
                status: 503,
                body: "unavailable".into(),
            }),
        }
    }
}

pub fn test_monitor(
    store: Arc<MemoryReadingStore>,
    source: Arc<StubSource>,
) -> Arc<SatelliteMonitor> {
    Arc::new(SatelliteMonitor::new(
        store,
        source,
        MonitorSettings::default(),
    ))
}

/// Build the full application router over the given monitor.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) is exercised too.
pub fn build_test_app(monitor: Arc<SatelliteMonitor>) -> Router {
    let config = test_config();
    let state = AppState {
        monitor,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert readings `secs` seconds old with the given altitudes.
pub async fn seed(store: &MemoryReadingStore, secs: &[i64], alts: &[f64]) {
    let now = utc_now();
    for (s, a) in secs.iter().zip(alts) {
        store
            .insert(NewReading::new(now - chrono::Duration::seconds(*s), *a))
            .await
            .unwrap();
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
