//! Integration tests for renault-client
//!
//! These tests spin up a mock identity/telematics backend and drive the
//! client against it, asserting both results and exact network-call counts
//! (token caching, capability gating, endpoint fallback).

use std::sync::atomic::Ordering;
use std::time::Duration;

use renault_client::testing::{TestServer, MOCK_ACCOUNT_ID, MOCK_VIN};
use renault_client::{ChargeAction, OperationResult, RenaultClientError};
use serde_json::json;

/// A server whose client already has the account and a vehicle selected,
/// skipping account resolution
async fn server_with_vehicle(model_code: &str) -> TestServer {
    let mut server = TestServer::start().await.unwrap();
    server.client.set_account_id(MOCK_ACCOUNT_ID);
    server.client.set_vehicle(MOCK_VIN, model_code);
    server
}

// =============================================================================
// Account and vehicle discovery
// =============================================================================

#[tokio::test]
async fn resolve_account_discovers_the_account_id() {
    let mut server = TestServer::start().await.unwrap();

    let account = server.client.resolve_account().await.unwrap();
    assert_eq!(account.account_id, MOCK_ACCOUNT_ID);
    assert_eq!(account.country.as_deref(), Some("SE"));
    assert_eq!(server.client.account_id(), Some(MOCK_ACCOUNT_ID));

    // JWT handshake plus the fresh session the account-info endpoint needs
    assert_eq!(server.backend.login_calls.load(Ordering::SeqCst), 2);
    assert_eq!(server.backend.jwt_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.account_info_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.person_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn resolve_account_fails_without_a_compatible_account() {
    let mut server = TestServer::start().await.unwrap();
    server.backend.set_response(
        "person",
        200,
        json!({
            "accounts": [
                { "accountId": "fleet-1", "accountType": "SFDC", "accountStatus": "ACTIVE" }
            ]
        }),
    );

    let err = server.client.resolve_account().await.unwrap_err();
    assert!(matches!(err, RenaultClientError::Auth(_)));
    assert!(server.client.account_id().is_none());
}

#[tokio::test]
async fn login_rejection_surfaces_as_auth_error() {
    let mut server = TestServer::start().await.unwrap();
    // Transport-level 200 with a failure status in the body
    server.backend.set_response(
        "login",
        200,
        json!({ "statusCode": 403, "statusReason": "invalid loginID or password" }),
    );

    let err = server.client.resolve_account().await.unwrap_err();
    match err {
        RenaultClientError::Auth(reason) => {
            assert!(reason.contains("invalid loginID or password"))
        }
        other => panic!("expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_vehicles_resolves_the_account_first() {
    let mut server = TestServer::start().await.unwrap();

    let vehicles = server.client.list_vehicles().await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].vin, MOCK_VIN);
    assert_eq!(vehicles[0].model_code, "X102VE");
    assert_eq!(vehicles[0].brand, "RENAULT");
    assert_eq!(vehicles[0].model, "ZOE");

    assert_eq!(server.backend.person_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.vehicles_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn list_vehicles_skips_resolution_when_account_is_known() {
    let mut server = TestServer::start().await.unwrap();
    server.client.set_account_id(MOCK_ACCOUNT_ID);

    let vehicles = server.client.list_vehicles().await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(server.backend.person_calls.load(Ordering::SeqCst), 0);
    assert_eq!(server.backend.account_info_calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Token caching
// =============================================================================

#[tokio::test]
async fn back_to_back_operations_share_one_handshake() {
    let server = server_with_vehicle("X102VE").await;

    assert!(server.client.battery_status().await.unwrap().is_ok());
    assert!(server.client.cockpit().await.unwrap().is_ok());

    assert_eq!(server.backend.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.jwt_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.battery_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.backend.cockpit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_token_forces_a_fresh_handshake() {
    let mut server = server_with_vehicle("X102VE").await;
    // Zero validity makes every cached token stale on arrival
    server.client.set_token_validity(Duration::ZERO);

    assert!(server.client.battery_status().await.unwrap().is_ok());
    assert!(server.client.battery_status().await.unwrap().is_ok());

    assert_eq!(server.backend.login_calls.load(Ordering::SeqCst), 2);
    assert_eq!(server.backend.jwt_calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Capability gating
// =============================================================================

#[tokio::test]
async fn gated_operation_makes_no_network_calls() {
    // Hybrid model: EV endpoints are gated off locally
    let server = server_with_vehicle("XJA1VP").await;

    let result = server.client.battery_status().await.unwrap();
    assert!(result.is_not_supported());
    assert_eq!(server.backend.identity_calls(), 0);
    assert_eq!(server.backend.data_calls(), 0);
}

#[tokio::test]
async fn hvac_start_is_gated_per_model() {
    // Zoe Phase 2 has no HVAC endpoints
    let server = server_with_vehicle("X102VE").await;

    let result = server.client.start_hvac(21.0).await.unwrap();
    assert!(result.is_not_supported());
    assert_eq!(server.backend.hvac_action_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn operation_without_a_vehicle_is_a_precondition_error() {
    let server = TestServer::start().await.unwrap();

    let err = server.client.battery_status().await.unwrap_err();
    assert!(matches!(err, RenaultClientError::MissingPrecondition(_)));
    assert_eq!(server.backend.identity_calls(), 0);
}

// =============================================================================
// Battery status
// =============================================================================

#[tokio::test]
async fn battery_status_returns_the_payload() {
    let server = server_with_vehicle("X102VE").await;

    let battery = server.client.battery_status().await.unwrap().ok().unwrap();
    assert_eq!(battery.battery_level, 75.0);
    assert_eq!(battery.battery_autonomy, Some(250.0));
    assert_eq!(battery.plug_status, Some(0));
}

#[tokio::test]
async fn first_generation_charging_power_is_normalized_to_kilowatts() {
    let server = server_with_vehicle("X101VE").await;
    server.backend.set_response(
        "battery-status",
        200,
        json!({
            "data": {
                "type": "Car",
                "id": MOCK_VIN,
                "attributes": {
                    "batteryLevel": 60,
                    "chargingStatus": 1.0,
                    "chargingInstantaneousPower": 7000
                }
            }
        }),
    );

    let battery = server.client.battery_status().await.unwrap().ok().unwrap();
    assert_eq!(battery.charging_instantaneous_power, Some(7.0));
}

#[tokio::test]
async fn later_generations_report_kilowatts_untouched() {
    let server = server_with_vehicle("XCB1VE").await;
    server.backend.set_response(
        "battery-status",
        200,
        json!({
            "data": {
                "type": "Car",
                "id": MOCK_VIN,
                "attributes": {
                    "batteryLevel": 60,
                    "chargingStatus": 1.0,
                    "chargingInstantaneousPower": 7.4
                }
            }
        }),
    );

    let battery = server.client.battery_status().await.unwrap().ok().unwrap();
    assert_eq!(battery.charging_instantaneous_power, Some(7.4));
}

// =============================================================================
// Charge mode and endpoint fallback
// =============================================================================

#[tokio::test]
async fn charge_mode_prefers_the_settings_endpoint() {
    let server = server_with_vehicle("X102VE").await;

    let mode = server.client.charge_mode().await.unwrap().ok().unwrap();
    assert_eq!(mode.charge_mode, "always");
    assert_eq!(
        server.backend.charging_settings_calls.load(Ordering::SeqCst),
        1
    );
    assert_eq!(server.backend.charge_mode_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scheduled_settings_normalize_to_scheduled() {
    let server = server_with_vehicle("X102VE").await;
    server.backend.set_response(
        "charging-settings",
        200,
        json!({
            "data": {
                "type": "Car",
                "id": MOCK_VIN,
                "attributes": { "mode": "scheduled", "schedules": [{ "id": 1 }] }
            }
        }),
    );

    let mode = server.client.charge_mode().await.unwrap().ok().unwrap();
    assert_eq!(mode.charge_mode, "scheduled");
}

#[tokio::test]
async fn missing_settings_endpoint_falls_back_to_legacy_charge_mode() {
    let server = server_with_vehicle("X102VE").await;
    server
        .backend
        .set_response("charging-settings", 404, json!({ "message": "not found" }));

    let mode = server.client.charge_mode().await.unwrap().ok().unwrap();
    // Legacy values pass through verbatim
    assert_eq!(mode.charge_mode, "always_charging");
    assert_eq!(
        server.backend.charging_settings_calls.load(Ordering::SeqCst),
        1
    );
    assert_eq!(server.backend.charge_mode_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_failures_are_not_masked_by_the_fallback() {
    let server = server_with_vehicle("X102VE").await;
    server.backend.set_response(
        "charging-settings",
        502,
        json!({ "type": "TECHNICAL", "message": "upstream unavailable" }),
    );

    let result = server.client.charge_mode().await.unwrap();
    assert!(result.is_error());
    assert_eq!(server.backend.charge_mode_calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Failure classification
// =============================================================================

#[tokio::test]
async fn functional_400_classifies_as_not_supported() {
    let server = server_with_vehicle("XCB1VE").await;
    server.backend.set_response(
        "hvac-status",
        400,
        json!({ "type": "FUNCTIONAL", "message": "feature not available" }),
    );

    let result = server.client.hvac_status().await.unwrap();
    assert_eq!(
        result,
        OperationResult::NotSupported("feature not supported for this vehicle".into())
    );
}

#[tokio::test]
async fn forbidden_classifies_as_not_supported() {
    let server = server_with_vehicle("XCB1VE").await;
    server.backend.set_response(
        "location",
        403,
        json!({ "type": "TECHNICAL", "message": "denied" }),
    );

    let result = server.client.location().await.unwrap();
    assert_eq!(
        result,
        OperationResult::NotSupported("operation not supported for this vehicle".into())
    );
}

#[tokio::test]
async fn server_errors_classify_as_error_with_the_message() {
    let server = server_with_vehicle("XCB1VE").await;
    server.backend.set_response(
        "cockpit",
        500,
        json!({ "type": "TECHNICAL", "message": "internal failure" }),
    );

    let result = server.client.cockpit().await.unwrap();
    assert!(result.is_error());
    assert!(result.reason().unwrap().contains("internal failure"));
}

// =============================================================================
// Remaining data operations
// =============================================================================

#[tokio::test]
async fn hvac_status_returns_the_payload() {
    let server = server_with_vehicle("XCB1VE").await;

    let hvac = server.client.hvac_status().await.unwrap().ok().unwrap();
    assert_eq!(hvac.hvac_status, "off");
    assert_eq!(hvac.external_temperature, Some(8.0));
}

#[tokio::test]
async fn location_returns_coordinates() {
    let server = server_with_vehicle("XCB1VE").await;

    let location = server.client.location().await.unwrap().ok().unwrap();
    assert_eq!(location.gps_latitude, 59.334);
    assert_eq!(location.gps_longitude, 18.063);
}

#[tokio::test]
async fn cockpit_returns_the_odometer() {
    let server = server_with_vehicle("XCB1VE").await;

    let cockpit = server.client.cockpit().await.unwrap().ok().unwrap();
    assert_eq!(cockpit.total_mileage, 12345.6);
}

// =============================================================================
// Remote actions
// =============================================================================

#[tokio::test]
async fn set_charge_mode_posts_the_action() {
    let server = server_with_vehicle("X102VE").await;

    let result = server
        .client
        .set_charge_mode(ChargeAction::ScheduleMode)
        .await
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(
        server.backend.charge_mode_action_calls.load(Ordering::SeqCst),
        1
    );
    assert_eq!(
        server.backend.last_action_content_type.lock().as_deref(),
        Some("application/vnd.api+json")
    );
}

#[tokio::test]
async fn set_charge_mode_is_gated_per_model() {
    // Dacia Spring has no charge-mode endpoint
    let server = server_with_vehicle("XBG1VE").await;

    let result = server
        .client
        .set_charge_mode(ChargeAction::AlwaysCharging)
        .await
        .unwrap();
    assert!(result.is_not_supported());
    assert_eq!(
        server.backend.charge_mode_action_calls.load(Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn start_and_cancel_hvac_post_actions() {
    let server = server_with_vehicle("XCB1VE").await;

    assert!(server.client.start_hvac(21.0).await.unwrap().is_ok());
    assert!(server.client.cancel_hvac().await.unwrap().is_ok());
    assert_eq!(server.backend.hvac_action_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pause_and_resume_charging_use_the_kcm_endpoint() {
    let server = server_with_vehicle("X102VE").await;

    assert!(server.client.pause_charging().await.unwrap().is_ok());
    assert!(server.client.resume_charging().await.unwrap().is_ok());
    assert_eq!(server.backend.pause_resume_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rejected_action_classifies_instead_of_erroring() {
    let server = server_with_vehicle("XCB1VE").await;
    server.backend.set_response(
        "actions/hvac-start",
        403,
        json!({ "type": "TECHNICAL", "message": "denied" }),
    );

    let result = server.client.start_hvac(19.5).await.unwrap();
    assert!(result.is_not_supported());
}
