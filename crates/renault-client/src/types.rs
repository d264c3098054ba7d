//! Request and response types for the identity and telematics backends

use serde::{Deserialize, Serialize};

use crate::error::RenaultClientError;

// =============================================================================
// Credentials & account types
// =============================================================================

/// Login credentials for the identity provider
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Result of account resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub account_id: String,
    pub country: Option<String>,
}

/// Flattened vehicle record from the account's vehicle links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleInfo {
    pub vin: String,
    pub model_code: String,
    pub brand: String,
    pub model: String,
}

// =============================================================================
// Operation results
// =============================================================================

/// Three-state outcome of every vehicle data/action operation
///
/// `NotSupported` covers both capability-gate rejections (no network call
/// was made) and backend-confirmed feature gaps; `Error` covers transport
/// and server failures the caller may want to retry. Neither is surfaced
/// as a Rust error, so shells can branch without error-handling
/// boilerplate for conditions that are common per model.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T> {
    Ok(T),
    NotSupported(String),
    Error(String),
}

impl<T> OperationResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Extract the payload, discarding the reason on the other arms
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(data) => Some(data),
            _ => None,
        }
    }

    /// Human-readable reason for the `NotSupported` and `Error` arms
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::NotSupported(reason) | Self::Error(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self {
            Self::Ok(data) => OperationResult::Ok(f(data)),
            Self::NotSupported(reason) => OperationResult::NotSupported(reason),
            Self::Error(reason) => OperationResult::Error(reason),
        }
    }

    /// Classify a request failure into a result value
    ///
    /// The backend conflates permanent per-model feature gaps with
    /// ordinary client errors: a 400 whose body type is `FUNCTIONAL` and
    /// any 403 mean "this vehicle cannot do this", everything else is a
    /// genuine failure carried through with its message.
    pub fn from_failure(err: RenaultClientError) -> Self {
        match &err {
            RenaultClientError::Server {
                status: 400,
                kind: Some(kind),
                ..
            } if kind == "FUNCTIONAL" => {
                Self::NotSupported("feature not supported for this vehicle".into())
            }
            RenaultClientError::Server { status: 403, .. } => {
                Self::NotSupported("operation not supported for this vehicle".into())
            }
            _ => Self::Error(err.to_string()),
        }
    }
}

/// Charge-mode action accepted by the telematics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeAction {
    AlwaysCharging,
    ScheduleMode,
}

impl ChargeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlwaysCharging => "always_charging",
            Self::ScheduleMode => "schedule_mode",
        }
    }
}

// =============================================================================
// Identity provider (Gigya) wire types
// =============================================================================

/// Common shape of identity provider responses
///
/// The interesting status code lives in the body, not in the transport
/// status; which payload field is present depends on the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GigyaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    #[serde(rename = "statusReason", default)]
    pub status_reason: Option<String>,
    #[serde(rename = "sessionInfo", default)]
    pub session_info: Option<GigyaSessionInfo>,
    #[serde(rename = "id_token", default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub data: Option<GigyaData>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GigyaSessionInfo {
    #[serde(rename = "cookieValue")]
    pub cookie_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GigyaData {
    #[serde(rename = "personId", default)]
    pub person_id: Option<String>,
}

// =============================================================================
// Telematics backend (Kamereon) wire types
// =============================================================================

/// Person record attached to an identity, listing account links
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PersonResponse {
    #[serde(default)]
    pub accounts: Vec<AccountLink>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountLink {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "accountType")]
    pub account_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VehiclesResponse {
    #[serde(rename = "vehicleLinks", default)]
    pub vehicle_links: Vec<VehicleLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VehicleLink {
    pub vin: String,
    #[serde(rename = "vehicleDetails")]
    pub vehicle_details: VehicleDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VehicleDetails {
    pub brand: LabelRecord,
    pub model: CodedLabelRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LabelRecord {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CodedLabelRecord {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: String,
}

impl VehicleLink {
    pub fn flatten(self) -> VehicleInfo {
        VehicleInfo {
            vin: self.vin,
            model_code: self.vehicle_details.model.code,
            brand: self.vehicle_details.brand.label,
            model: self.vehicle_details.model.label,
        }
    }
}

/// JSON:API-style envelope wrapping every car-adapter payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KamereonResponse<A> {
    pub data: KamereonData<A>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KamereonData<A> {
    #[serde(default)]
    pub id: Option<String>,
    pub attributes: A,
}

impl<A> KamereonResponse<A> {
    pub fn into_attributes(self) -> A {
        self.data.attributes
    }
}

/// Error body returned by the telematics backend on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KamereonErrorBody {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<KamereonErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KamereonErrorDetail {
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
}

// =============================================================================
// Normalized vehicle data payloads
// =============================================================================

/// Battery state of an electric vehicle
///
/// `charging_instantaneous_power` is always kilowatts by the time it
/// leaves the client, regardless of model generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStatus {
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Percentage 0-100
    pub battery_level: f64,
    /// Celsius
    #[serde(default)]
    pub battery_temperature: Option<f64>,
    /// Remaining range, km
    #[serde(default)]
    pub battery_autonomy: Option<f64>,
    /// kWh, often reported as 0
    #[serde(default)]
    pub battery_capacity: Option<f64>,
    /// kWh
    #[serde(default)]
    pub battery_available_energy: Option<f64>,
    /// 0 = unplugged, 1 = plugged
    #[serde(default)]
    pub plug_status: Option<i64>,
    /// -1 = error, 0 = not charging, 1 = charging
    #[serde(default)]
    pub charging_status: Option<f64>,
    /// Minutes
    #[serde(default)]
    pub charging_remaining_time: Option<f64>,
    /// kW after normalization
    #[serde(default)]
    pub charging_instantaneous_power: Option<f64>,
}

/// Normalized charge mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeMode {
    pub charge_mode: String,
}

/// Attributes of the settings-style charging endpoint; only the schedule
/// mode flag is interpreted, the rest is endpoint-internal detail
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChargingSettings {
    #[serde(default)]
    pub mode: Option<String>,
}

/// Cabin pre-conditioning state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HvacStatus {
    /// "on", "off", or "pending"
    pub hvac_status: String,
    /// Celsius
    #[serde(default)]
    pub external_temperature: Option<f64>,
    /// Minimum battery percentage required to run HVAC
    #[serde(default)]
    pub soc_threshold: Option<f64>,
    #[serde(default)]
    pub last_update_time: Option<String>,
}

/// Last known GPS position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub gps_latitude: f64,
    pub gps_longitude: f64,
    #[serde(default)]
    pub gps_direction: Option<f64>,
    #[serde(default)]
    pub last_update_time: Option<String>,
}

/// Odometer and fuel readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cockpit {
    /// km
    pub total_mileage: f64,
    /// km, hybrid models only
    #[serde(default)]
    pub fuel_autonomy: Option<f64>,
    /// Liters, hybrid models only
    #[serde(default)]
    pub fuel_quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_status_decodes_from_wire_shape() {
        let body = serde_json::json!({
            "data": {
                "type": "Car",
                "id": "VF1AG000164767503",
                "attributes": {
                    "timestamp": "2026-02-06T12:00:00Z",
                    "batteryLevel": 75,
                    "batteryAutonomy": 250,
                    "batteryAvailableEnergy": 45,
                    "plugStatus": 0,
                    "chargingStatus": 0.0
                }
            }
        });

        let decoded: KamereonResponse<BatteryStatus> = serde_json::from_value(body).unwrap();
        let attrs = decoded.into_attributes();
        assert_eq!(attrs.battery_level, 75.0);
        assert_eq!(attrs.battery_autonomy, Some(250.0));
        assert_eq!(attrs.charging_instantaneous_power, None);
    }

    #[test]
    fn functional_400_classifies_as_not_supported() {
        let err = RenaultClientError::server_error(400, Some("FUNCTIONAL".into()), "nope");
        let result = OperationResult::<()>::from_failure(err);
        assert!(result.is_not_supported());
        assert_eq!(result.reason(), Some("feature not supported for this vehicle"));
    }

    #[test]
    fn plain_400_classifies_as_error() {
        let err = RenaultClientError::server_error(400, None, "bad request");
        assert!(OperationResult::<()>::from_failure(err).is_error());
    }

    #[test]
    fn forbidden_classifies_as_not_supported() {
        let err = RenaultClientError::server_error(403, Some("TECHNICAL".into()), "denied");
        let result = OperationResult::<()>::from_failure(err);
        assert_eq!(
            result.reason(),
            Some("operation not supported for this vehicle")
        );
    }

    #[test]
    fn server_errors_keep_their_message() {
        let err = RenaultClientError::server_error(502, None, "something went wrong");
        let result = OperationResult::<()>::from_failure(err);
        assert!(result.is_error());
        assert!(result.reason().unwrap().contains("something went wrong"));
    }

    #[test]
    fn vehicle_link_flattens_nested_details() {
        let body = serde_json::json!({
            "vin": "VF1AG000164767503",
            "vehicleDetails": {
                "brand": { "label": "RENAULT" },
                "model": { "code": "X102VE", "label": "ZOE" }
            }
        });

        let link: VehicleLink = serde_json::from_value(body).unwrap();
        let info = link.flatten();
        assert_eq!(info.vin, "VF1AG000164767503");
        assert_eq!(info.model_code, "X102VE");
        assert_eq!(info.brand, "RENAULT");
        assert_eq!(info.model, "ZOE");
    }

    #[test]
    fn charge_action_wire_strings() {
        assert_eq!(ChargeAction::AlwaysCharging.as_str(), "always_charging");
        assert_eq!(ChargeAction::ScheduleMode.as_str(), "schedule_mode");
    }
}
