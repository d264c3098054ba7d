//! Test utilities for renault-client
//!
//! Provides a mock identity + telematics backend (a single axum router
//! serving both endpoint families) with per-endpoint call counters and
//! response overrides, plus a [`TestServer`] that serves it on an
//! ephemeral port with a ready-made client pointed at it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{Credentials, RenaultClient, Result};

/// Shared state of the mock backend
///
/// Every handler bumps its counter before answering, so tests can assert
/// exact network-call counts (token caching, capability gating, fallback
/// behavior). Responses default to happy-path bodies and can be replaced
/// per endpoint with `set_response`.
#[derive(Default)]
pub struct MockBackend {
    pub login_calls: AtomicUsize,
    pub jwt_calls: AtomicUsize,
    pub account_info_calls: AtomicUsize,
    pub person_calls: AtomicUsize,
    pub vehicles_calls: AtomicUsize,
    pub battery_calls: AtomicUsize,
    pub charging_settings_calls: AtomicUsize,
    pub charge_mode_calls: AtomicUsize,
    pub hvac_calls: AtomicUsize,
    pub location_calls: AtomicUsize,
    pub cockpit_calls: AtomicUsize,
    pub charge_mode_action_calls: AtomicUsize,
    pub hvac_action_calls: AtomicUsize,
    pub pause_resume_calls: AtomicUsize,
    /// Content type of the most recent action POST
    pub last_action_content_type: Mutex<Option<String>>,
    overrides: Mutex<HashMap<String, (u16, Value)>>,
}

impl MockBackend {
    /// Replace the response for one endpoint
    ///
    /// Endpoint keys: `login`, `jwt`, `account-info`, `person`,
    /// `vehicles`, `battery-status`, `charging-settings`, `charge-mode`,
    /// `hvac-status`, `location`, `cockpit`, `actions/charge-mode`,
    /// `actions/hvac-start`, `charge/pause-resume`.
    pub fn set_response(&self, endpoint: &str, status: u16, body: Value) {
        self.overrides
            .lock()
            .insert(endpoint.to_string(), (status, body));
    }

    /// Total identity-provider calls (login + JWT issuance)
    pub fn identity_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst) + self.jwt_calls.load(Ordering::SeqCst)
    }

    /// Total vehicle-data calls against the telematics backend
    pub fn data_calls(&self) -> usize {
        self.battery_calls.load(Ordering::SeqCst)
            + self.charging_settings_calls.load(Ordering::SeqCst)
            + self.charge_mode_calls.load(Ordering::SeqCst)
            + self.hvac_calls.load(Ordering::SeqCst)
            + self.location_calls.load(Ordering::SeqCst)
            + self.cockpit_calls.load(Ordering::SeqCst)
    }

    fn respond(&self, key: &str, default_body: Value) -> (StatusCode, Json<Value>) {
        if let Some((status, body)) = self.overrides.lock().get(key) {
            let code =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, Json(body.clone()))
        } else {
            (StatusCode::OK, Json(default_body))
        }
    }
}

/// Default VIN served by the mock vehicle list
pub const MOCK_VIN: &str = "VF1AG000164767503";
/// Default account id served by the mock person record
pub const MOCK_ACCOUNT_ID: &str = "account-1";

/// Build the mock backend router
pub fn router(state: Arc<MockBackend>) -> Router {
    Router::new()
        // Identity provider
        .route("/accounts.login", post(login))
        .route("/accounts.getJWT", post(get_jwt))
        .route("/accounts.getAccountInfo", get(account_info))
        // Telematics backend
        .route("/commerce/v1/persons/{person_id}", get(person))
        .route("/commerce/v1/accounts/{account_id}/vehicles", get(vehicles))
        .route(
            "/commerce/v1/accounts/{account_id}/kamereon/kca/car-adapter/v2/cars/{vin}/battery-status",
            get(battery_status),
        )
        .route(
            "/commerce/v1/accounts/{account_id}/kamereon/kca/car-adapter/v1/cars/{vin}/{resource}",
            get(car_data_v1),
        )
        .route(
            "/commerce/v1/accounts/{account_id}/kamereon/kca/car-adapter/v1/cars/{vin}/actions/{action}",
            post(car_action),
        )
        .route(
            "/commerce/v1/accounts/{account_id}/kamereon/kcm/v1/vehicles/{vin}/charge/pause-resume",
            post(pause_resume),
        )
        .with_state(state)
}

async fn login(State(state): State<Arc<MockBackend>>) -> (StatusCode, Json<Value>) {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "login",
        json!({
            "statusCode": 200,
            "sessionInfo": { "cookieValue": "mock-session-token" }
        }),
    )
}

async fn get_jwt(State(state): State<Arc<MockBackend>>) -> (StatusCode, Json<Value>) {
    state.jwt_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "jwt",
        json!({
            "statusCode": 200,
            "id_token": "mock-jwt-token"
        }),
    )
}

async fn account_info(State(state): State<Arc<MockBackend>>) -> (StatusCode, Json<Value>) {
    state.account_info_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "account-info",
        json!({
            "statusCode": 200,
            "data": { "personId": "person-1" }
        }),
    )
}

async fn person(
    State(state): State<Arc<MockBackend>>,
    Path(_person_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.person_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "person",
        json!({
            "accounts": [
                { "accountId": MOCK_ACCOUNT_ID, "accountType": "MYRENAULT", "accountStatus": "ACTIVE" }
            ],
            "country": "SE"
        }),
    )
}

async fn vehicles(
    State(state): State<Arc<MockBackend>>,
    Path(_account_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.vehicles_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "vehicles",
        json!({
            "vehicleLinks": [
                {
                    "vin": MOCK_VIN,
                    "vehicleDetails": {
                        "brand": { "label": "RENAULT" },
                        "model": { "code": "X102VE", "label": "ZOE" }
                    }
                }
            ]
        }),
    )
}

async fn battery_status(
    State(state): State<Arc<MockBackend>>,
    Path((_account_id, vin)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.battery_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "battery-status",
        json!({
            "data": {
                "type": "Car",
                "id": vin,
                "attributes": {
                    "timestamp": "2026-02-06T12:00:00Z",
                    "batteryLevel": 75,
                    "batteryAutonomy": 250,
                    "batteryAvailableEnergy": 45,
                    "plugStatus": 0,
                    "chargingStatus": 0.0
                }
            }
        }),
    )
}

async fn car_data_v1(
    State(state): State<Arc<MockBackend>>,
    Path((_account_id, vin, resource)): Path<(String, String, String)>,
) -> (StatusCode, Json<Value>) {
    match resource.as_str() {
        "charging-settings" => {
            state.charging_settings_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "charging-settings",
                json!({
                    "data": {
                        "type": "Car",
                        "id": vin,
                        "attributes": { "mode": "always", "schedules": [] }
                    }
                }),
            )
        }
        "charge-mode" => {
            state.charge_mode_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "charge-mode",
                json!({
                    "data": {
                        "type": "Car",
                        "id": vin,
                        "attributes": { "chargeMode": "always_charging" }
                    }
                }),
            )
        }
        "hvac-status" => {
            state.hvac_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "hvac-status",
                json!({
                    "data": {
                        "type": "Car",
                        "id": vin,
                        "attributes": { "hvacStatus": "off", "externalTemperature": 8.0 }
                    }
                }),
            )
        }
        "location" => {
            state.location_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "location",
                json!({
                    "data": {
                        "type": "Car",
                        "id": vin,
                        "attributes": {
                            "gpsLatitude": 59.334,
                            "gpsLongitude": 18.063,
                            "lastUpdateTime": "2026-02-06T12:00:00Z"
                        }
                    }
                }),
            )
        }
        "cockpit" => {
            state.cockpit_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "cockpit",
                json!({
                    "data": {
                        "type": "Car",
                        "id": vin,
                        "attributes": { "totalMileage": 12345.6 }
                    }
                }),
            )
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

async fn car_action(
    State(state): State<Arc<MockBackend>>,
    Path((_account_id, _vin, action)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    *state.last_action_content_type.lock() = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    match action.as_str() {
        "charge-mode" => {
            state.charge_mode_action_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "actions/charge-mode",
                json!({ "data": { "type": "ChargeMode", "id": "action-1" } }),
            )
        }
        "hvac-start" => {
            state.hvac_action_calls.fetch_add(1, Ordering::SeqCst);
            state.respond(
                "actions/hvac-start",
                json!({ "data": { "type": "HvacStart", "id": "action-1" } }),
            )
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

async fn pause_resume(
    State(state): State<Arc<MockBackend>>,
    Path((_account_id, _vin)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state.pause_resume_calls.fetch_add(1, Ordering::SeqCst);
    state.respond(
        "charge/pause-resume",
        json!({ "data": { "type": "ChargePauseResume", "id": "action-1" } }),
    )
}

/// A test server that automatically shuts down when dropped
///
/// Serves the mock backend on an ephemeral port and holds a client whose
/// identity and telematics base URLs both point at it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: RenaultClient,
    pub backend: Arc<MockBackend>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start a server with a fresh mock backend
    pub async fn start() -> Result<Self> {
        Self::start_with(Arc::new(MockBackend::default())).await
    }

    /// Start a server around a pre-configured mock backend
    pub async fn start_with(backend: Arc<MockBackend>) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let app = router(backend.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give the server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let base_url = format!("http://{}", addr);
        let client = RenaultClient::with_endpoints(
            Credentials::new("test@example.com", "testpassword"),
            "sv-SE",
            &base_url,
            &base_url,
        )?;

        Ok(Self {
            addr,
            client,
            backend,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let backend = MockBackend::default();
        assert_eq!(backend.identity_calls(), 0);
        assert_eq!(backend.data_calls(), 0);
    }

    #[test]
    fn overrides_replace_default_responses() {
        let backend = MockBackend::default();
        backend.set_response("battery-status", 502, json!({ "type": "TECHNICAL" }));
        let (status, Json(body)) = backend.respond("battery-status", json!({}));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["type"], "TECHNICAL");
    }
}
