//! Telematics HTTP client implementation
//!
//! One client instance owns one set of credentials, one resolved account,
//! and one active vehicle. Changing credentials means constructing a new
//! instance, which also discards the cached token.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{
    self, capabilities_for_model, configuration_for_locale, LocaleConfig, ModelCapabilities,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT,
};
use crate::error::{RenaultClientError, Result};
use crate::types::*;

/// Fixed reasons for capability-gate rejections
const GATE_BATTERY: &str = "battery status not supported for this vehicle model";
const GATE_COCKPIT: &str = "cockpit data not supported for this vehicle model";
const GATE_HVAC: &str = "HVAC not supported for this vehicle model";
const GATE_CHARGE_MODE: &str = "charge mode not supported for this vehicle model";
const GATE_LOCATION: &str = "location not supported for this vehicle model";

/// JWT plus the instant after which it must not be handed out anymore
#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Fold a request outcome into the three-state operation result
///
/// Configuration, precondition, and authentication failures keep
/// propagating; everything else becomes a result value the caller can
/// branch on.
fn settle<T>(outcome: Result<T>) -> Result<OperationResult<T>> {
    match outcome {
        Ok(data) => Ok(OperationResult::Ok(data)),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => Ok(OperationResult::from_failure(err)),
    }
}

/// Client for the two-tier identity/telematics backend
///
/// Handles the login/JWT handshake with token caching, per-model
/// capability gating, and the normalization and failure classification of
/// every vehicle data/action call.
#[derive(Debug)]
pub struct RenaultClient {
    http: Client,
    config: &'static LocaleConfig,
    gigya_url: Url,
    kamereon_url: Url,
    credentials: Credentials,
    account_id: Option<String>,
    vin: Option<String>,
    capabilities: Option<ModelCapabilities>,
    token: Mutex<Option<CachedToken>>,
    token_validity: Duration,
}

impl RenaultClient {
    /// Create a new client for the given locale
    ///
    /// Fails before any I/O when the locale has no endpoint configuration.
    pub fn new(credentials: Credentials, locale: &str) -> Result<Self> {
        Self::with_config(credentials, locale, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        credentials: Credentials,
        locale: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let config = configuration_for_locale(locale)?;
        Self::build(credentials, config, config.gigya_url, config.kamereon_url, timeout, connect_timeout)
    }

    /// Create a client whose identity and telematics calls go to explicit
    /// base URLs instead of the registry's
    ///
    /// Used by [`crate::testing`] to point a client at a local mock
    /// backend; the locale still determines API keys and country code.
    pub fn with_endpoints(
        credentials: Credentials,
        locale: &str,
        gigya_url: &str,
        kamereon_url: &str,
    ) -> Result<Self> {
        let config = configuration_for_locale(locale)?;
        Self::build(credentials, config, gigya_url, kamereon_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    fn build(
        credentials: Credentials,
        config: &'static LocaleConfig,
        gigya_url: &str,
        kamereon_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let lifetime = Duration::from_secs(config::JWT_LIFETIME_SECS);
        let buffer = Duration::from_secs(config::TOKEN_CACHE_BUFFER_SECS);

        Ok(Self {
            http,
            config,
            gigya_url: Url::parse(gigya_url)?,
            kamereon_url: Url::parse(kamereon_url)?,
            credentials,
            account_id: None,
            vin: None,
            capabilities: None,
            token: Mutex::new(None),
            token_validity: lifetime.saturating_sub(buffer),
        })
    }

    /// Endpoint configuration this client was built with
    pub fn locale_config(&self) -> &'static LocaleConfig {
        self.config
    }

    /// Country code requests are scoped by
    pub fn country_code(&self) -> &'static str {
        self.config.country_code
    }

    /// Resolved account id, if account resolution has run
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Active VIN, if a vehicle has been set
    pub fn vin(&self) -> Option<&str> {
        self.vin.as_deref()
    }

    /// Capability record of the active vehicle
    pub fn capabilities(&self) -> Option<ModelCapabilities> {
        self.capabilities
    }

    /// Set the account id directly, skipping account resolution
    ///
    /// Shells that persisted the id from a previous pairing use this to
    /// avoid the extra identity round-trips on startup.
    pub fn set_account_id(&mut self, account_id: impl Into<String>) {
        self.account_id = Some(account_id.into());
    }

    /// Shrink (or widen) the token cache window
    ///
    /// A zero validity makes every cached token immediately stale, forcing
    /// a handshake per call; tests use this to exercise expiry.
    pub fn set_token_validity(&mut self, validity: Duration) {
        self.token_validity = validity;
    }

    /// Select the active vehicle and load its capability record
    ///
    /// Pure and infallible: unknown model codes resolve to the permissive
    /// default. Replaces the previous record entirely.
    pub fn set_vehicle(&mut self, vin: impl Into<String>, model_code: &str) {
        let capabilities = capabilities_for_model(model_code);
        let vin = vin.into();
        debug!(%vin, model_code, ?capabilities, "vehicle set");
        self.vin = Some(vin);
        self.capabilities = Some(capabilities);
    }

    // =========================================================================
    // Token management
    // =========================================================================

    /// Return a valid JWT, running the two-step handshake only when the
    /// cached token has passed its expiry instant
    ///
    /// The cache lock is never held across a network call, so concurrent
    /// operations racing past an expired token may each run a redundant
    /// handshake; the handshake is idempotent and the last writer wins.
    async fn id_token(&self) -> Result<String> {
        if let Some(cached) = self.token.lock().as_ref() {
            if Instant::now() < cached.expires_at {
                debug!("using cached id token");
                return Ok(cached.token.clone());
            }
        }

        debug!("fetching new id token");
        let session = self.gigya_login().await?;
        let token = self.gigya_jwt(&session).await?;

        *self.token.lock() = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + self.token_validity,
        });

        Ok(token)
    }

    /// Exchange credentials for an opaque session token
    async fn gigya_login(&self) -> Result<String> {
        let url = self.gigya_url.join(config::GIGYA_LOGIN)?;

        let response = self
            .http
            .post(url)
            .query(&[
                ("ApiKey", self.config.gigya_api_key),
                ("loginID", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?;

        let body: GigyaResponse = response
            .json()
            .await
            .map_err(|e| RenaultClientError::Parse(e.to_string()))?;

        if body.status_code != 200 {
            return Err(RenaultClientError::Auth(format!(
                "login failed: {}",
                body.status_reason.as_deref().unwrap_or("unknown error")
            )));
        }

        body.session_info
            .map(|s| s.cookie_value)
            .ok_or_else(|| RenaultClientError::Parse("missing sessionInfo.cookieValue".into()))
    }

    /// Exchange a session token for a signed, time-limited JWT
    async fn gigya_jwt(&self, session_token: &str) -> Result<String> {
        let url = self.gigya_url.join(config::GIGYA_GET_JWT)?;
        let expiration = config::JWT_LIFETIME_SECS.to_string();

        let response = self
            .http
            .post(url)
            .query(&[
                ("ApiKey", self.config.gigya_api_key),
                ("login_token", session_token),
                ("fields", "data.personId,data.gigyaDataCenter"),
                ("expiration", expiration.as_str()),
            ])
            .send()
            .await?;

        let body: GigyaResponse = response
            .json()
            .await
            .map_err(|e| RenaultClientError::Parse(e.to_string()))?;

        if body.status_code != 200 {
            return Err(RenaultClientError::Auth(format!(
                "JWT generation failed: {}",
                body.status_reason.as_deref().unwrap_or("unknown error")
            )));
        }

        body.id_token
            .ok_or_else(|| RenaultClientError::Parse("missing id_token".into()))
    }

    // =========================================================================
    // Account and vehicle resolution
    // =========================================================================

    /// Discover the account id attached to these credentials
    ///
    /// The identity provider's account-info endpoint is keyed by session
    /// token rather than the JWT, so this performs a fresh login step in
    /// addition to obtaining a token for the person lookup. Fails when no
    /// MYRENAULT or MYDACIA account is attached to the person.
    #[instrument(skip(self))]
    pub async fn resolve_account(&mut self) -> Result<AccountInfo> {
        let id_token = self.id_token().await?;
        let session = self.gigya_login().await?;

        let url = self.gigya_url.join(config::GIGYA_ACCOUNT_INFO)?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("ApiKey", self.config.gigya_api_key),
                ("login_token", session.as_str()),
            ])
            .send()
            .await?;

        let body: GigyaResponse = response
            .json()
            .await
            .map_err(|e| RenaultClientError::Parse(e.to_string()))?;

        if body.status_code != 200 {
            return Err(RenaultClientError::Auth(format!(
                "failed to get account info: {}",
                body.status_reason.as_deref().unwrap_or("unknown error")
            )));
        }

        let person_id = body
            .data
            .and_then(|d| d.person_id)
            .ok_or_else(|| RenaultClientError::Parse("missing data.personId".into()))?;

        let url = self
            .kamereon_url
            .join(&format!("/commerce/v1/persons/{}", person_id))?;
        let response = self
            .http
            .get(url)
            .header("x-gigya-id_token", &id_token)
            .header("apikey", self.config.kamereon_api_key)
            .send()
            .await?;

        let person: PersonResponse = self.handle_response(response).await?;
        let country = person.country;

        let account = person
            .accounts
            .into_iter()
            .find(|a| a.account_type == "MYRENAULT" || a.account_type == "MYDACIA")
            .ok_or_else(|| {
                RenaultClientError::Auth("no MYRENAULT or MYDACIA account found".into())
            })?;

        debug!(account_id = %account.account_id, "account resolved");
        self.account_id = Some(account.account_id.clone());

        Ok(AccountInfo {
            account_id: account.account_id,
            country,
        })
    }

    /// List the vehicles attached to the account, in backend order
    ///
    /// Triggers account resolution when the account id is not yet known.
    #[instrument(skip(self))]
    pub async fn list_vehicles(&mut self) -> Result<Vec<VehicleInfo>> {
        if self.account_id.is_none() {
            self.resolve_account().await?;
        }
        let account_id = self
            .account_id
            .as_deref()
            .ok_or(RenaultClientError::MissingPrecondition("account id"))?;

        let mut url = self
            .kamereon_url
            .join(&format!("/commerce/v1/accounts/{}/vehicles", account_id))?;
        url.set_query(Some(&format!("country={}", self.config.country_code)));

        let id_token = self.id_token().await?;
        let response = self
            .http
            .get(url)
            .header("x-gigya-id_token", id_token)
            .header("apikey", self.config.kamereon_api_key)
            .send()
            .await?;

        let vehicles: VehiclesResponse = self.handle_response(response).await?;
        Ok(vehicles
            .vehicle_links
            .into_iter()
            .map(VehicleLink::flatten)
            .collect())
    }

    // =========================================================================
    // Vehicle data operations
    // =========================================================================

    /// Get battery status
    ///
    /// First-generation models report charging power in watts; the value
    /// is converted so callers always see kilowatts.
    #[instrument(skip(self))]
    pub async fn battery_status(&self) -> Result<OperationResult<BatteryStatus>> {
        let caps = self.gate()?;
        if !caps.battery_status {
            return Ok(OperationResult::NotSupported(GATE_BATTERY.into()));
        }

        let outcome = self
            .car_adapter_get::<KamereonResponse<BatteryStatus>>("battery-status", 2)
            .await;

        Ok(settle(outcome)?.map(|response| {
            let mut attrs = response.into_attributes();
            if caps.charging_power_in_watts {
                if let Some(power) = attrs.charging_instantaneous_power.as_mut() {
                    *power /= 1000.0;
                }
            }
            attrs
        }))
    }

    /// Get the charge mode
    ///
    /// The settings-style endpoint is tried first and its schedule flag
    /// normalized. Deployments where that endpoint is deprecated or absent
    /// answer 400/404, and only then is the legacy charge-mode endpoint
    /// consulted and returned verbatim. Server-side failures (5xx) are not
    /// masked by the fallback.
    #[instrument(skip(self))]
    pub async fn charge_mode(&self) -> Result<OperationResult<ChargeMode>> {
        let caps = self.gate()?;
        if !caps.charge_mode {
            return Ok(OperationResult::NotSupported(GATE_CHARGE_MODE.into()));
        }

        let outcome = match self
            .car_adapter_get::<KamereonResponse<ChargingSettings>>("charging-settings", 1)
            .await
        {
            Ok(settings) => {
                let mode = settings.into_attributes().mode;
                let charge_mode = if mode.as_deref() == Some("scheduled") {
                    "scheduled"
                } else {
                    "always"
                };
                Ok(ChargeMode {
                    charge_mode: charge_mode.into(),
                })
            }
            Err(RenaultClientError::Server { status, .. }) if status == 400 || status == 404 => {
                debug!(status, "settings endpoint unavailable, falling back to charge-mode");
                self.car_adapter_get::<KamereonResponse<ChargeMode>>("charge-mode", 1)
                    .await
                    .map(KamereonResponse::into_attributes)
            }
            Err(other) => Err(other),
        };

        settle(outcome)
    }

    /// Get HVAC status
    #[instrument(skip(self))]
    pub async fn hvac_status(&self) -> Result<OperationResult<HvacStatus>> {
        let caps = self.gate()?;
        if !caps.hvac_status {
            return Ok(OperationResult::NotSupported(GATE_HVAC.into()));
        }

        let outcome = self
            .car_adapter_get::<KamereonResponse<HvacStatus>>("hvac-status", 1)
            .await
            .map(KamereonResponse::into_attributes);
        settle(outcome)
    }

    /// Get the last known vehicle location
    #[instrument(skip(self))]
    pub async fn location(&self) -> Result<OperationResult<Location>> {
        let caps = self.gate()?;
        if !caps.location {
            return Ok(OperationResult::NotSupported(GATE_LOCATION.into()));
        }

        let outcome = self
            .car_adapter_get::<KamereonResponse<Location>>("location", 1)
            .await
            .map(KamereonResponse::into_attributes);
        settle(outcome)
    }

    /// Get cockpit data (odometer, fuel)
    #[instrument(skip(self))]
    pub async fn cockpit(&self) -> Result<OperationResult<Cockpit>> {
        let caps = self.gate()?;
        if !caps.cockpit {
            return Ok(OperationResult::NotSupported(GATE_COCKPIT.into()));
        }

        let outcome = self
            .car_adapter_get::<KamereonResponse<Cockpit>>("cockpit", 1)
            .await
            .map(KamereonResponse::into_attributes);
        settle(outcome)
    }

    // =========================================================================
    // Vehicle actions
    // =========================================================================

    /// Switch between always-charging and scheduled charging
    #[instrument(skip(self))]
    pub async fn set_charge_mode(&self, action: ChargeAction) -> Result<OperationResult<()>> {
        let caps = self.gate()?;
        if !caps.charge_mode {
            return Ok(OperationResult::NotSupported(GATE_CHARGE_MODE.into()));
        }

        let body = serde_json::json!({
            "data": {
                "type": "ChargeMode",
                "attributes": { "action": action.as_str() }
            }
        });
        settle(self.car_adapter_post("actions/charge-mode", 1, body).await)
    }

    /// Start cabin pre-conditioning at the given target temperature (°C)
    #[instrument(skip(self))]
    pub async fn start_hvac(&self, target_temperature: f64) -> Result<OperationResult<()>> {
        let caps = self.gate()?;
        if !caps.hvac_status {
            return Ok(OperationResult::NotSupported(GATE_HVAC.into()));
        }

        let body = serde_json::json!({
            "data": {
                "type": "HvacStart",
                "attributes": {
                    "action": "start",
                    "targetTemperature": target_temperature
                }
            }
        });
        settle(self.car_adapter_post("actions/hvac-start", 1, body).await)
    }

    /// Cancel cabin pre-conditioning
    ///
    /// Not every model honors the cancel action; the backend answers with
    /// a functional error on those and the result classifies accordingly.
    #[instrument(skip(self))]
    pub async fn cancel_hvac(&self) -> Result<OperationResult<()>> {
        let caps = self.gate()?;
        if !caps.hvac_status {
            return Ok(OperationResult::NotSupported(GATE_HVAC.into()));
        }

        let body = serde_json::json!({
            "data": {
                "type": "HvacStart",
                "attributes": { "action": "cancel" }
            }
        });
        settle(self.car_adapter_post("actions/hvac-start", 1, body).await)
    }

    /// Pause an ongoing charge
    #[instrument(skip(self))]
    pub async fn pause_charging(&self) -> Result<OperationResult<()>> {
        self.gate()?;
        let body = serde_json::json!({
            "data": {
                "type": "ChargePauseResume",
                "attributes": { "action": "pause" }
            }
        });
        settle(self.kcm_post("charge/pause-resume", 1, body).await)
    }

    /// Resume a paused charge
    #[instrument(skip(self))]
    pub async fn resume_charging(&self) -> Result<OperationResult<()>> {
        self.gate()?;
        let body = serde_json::json!({
            "data": {
                "type": "ChargePauseResume",
                "attributes": { "action": "resume" }
            }
        });
        settle(self.kcm_post("charge/pause-resume", 1, body).await)
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Capability record of the active vehicle, or a precondition error
    /// when `set_vehicle` has not been called
    fn gate(&self) -> Result<ModelCapabilities> {
        self.capabilities
            .ok_or(RenaultClientError::MissingPrecondition("vehicle"))
    }

    /// Account id and VIN, both required for vehicle-scoped URLs
    fn vehicle_scope(&self) -> Result<(&str, &str)> {
        let account_id = self
            .account_id
            .as_deref()
            .ok_or(RenaultClientError::MissingPrecondition("account id"))?;
        let vin = self
            .vin
            .as_deref()
            .ok_or(RenaultClientError::MissingPrecondition("VIN"))?;
        Ok((account_id, vin))
    }

    fn car_adapter_url(&self, resource: &str, version: u8) -> Result<Url> {
        let (account_id, vin) = self.vehicle_scope()?;
        let mut url = self.kamereon_url.join(&format!(
            "/commerce/v1/accounts/{}/kamereon/kca/car-adapter/v{}/cars/{}/{}",
            account_id, version, vin, resource
        ))?;
        url.set_query(Some(&format!("country={}", self.config.country_code)));
        Ok(url)
    }

    fn kcm_url(&self, resource: &str, version: u8) -> Result<Url> {
        let (account_id, vin) = self.vehicle_scope()?;
        let mut url = self.kamereon_url.join(&format!(
            "/commerce/v1/accounts/{}/kamereon/kcm/v{}/vehicles/{}/{}",
            account_id, version, vin, resource
        ))?;
        url.set_query(Some(&format!("country={}", self.config.country_code)));
        Ok(url)
    }

    /// Authenticated GET against the car-adapter scope
    async fn car_adapter_get<T: DeserializeOwned>(&self, resource: &str, version: u8) -> Result<T> {
        let url = self.car_adapter_url(resource, version)?;
        let id_token = self.id_token().await?;
        debug!(%url, "telematics GET");

        let response = self
            .http
            .get(url)
            .header("x-gigya-id_token", id_token)
            .header("apikey", self.config.kamereon_api_key)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Authenticated action POST against the car-adapter scope
    async fn car_adapter_post(
        &self,
        resource: &str,
        version: u8,
        body: serde_json::Value,
    ) -> Result<()> {
        let url = self.car_adapter_url(resource, version)?;
        self.post_action(url, body).await
    }

    /// Authenticated action POST against the KCM scope (newer endpoints,
    /// vehicle-keyed instead of car-keyed)
    async fn kcm_post(&self, resource: &str, version: u8, body: serde_json::Value) -> Result<()> {
        let url = self.kcm_url(resource, version)?;
        self.post_action(url, body).await
    }

    async fn post_action(&self, url: Url, body: serde_json::Value) -> Result<()> {
        let id_token = self.id_token().await?;
        debug!(%url, "telematics POST");

        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/vnd.api+json")
            .header("x-gigya-id_token", id_token)
            .header("apikey", self.config.kamereon_api_key)
            .body(body.to_string())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Handle a telematics response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| RenaultClientError::Parse(e.to_string()))
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract a server error from a failed response, keeping the body's
    /// `type` discriminator for the classifier
    async fn extract_error(&self, response: reqwest::Response) -> RenaultClientError {
        let status = response.status();

        let (kind, message) = match response.json::<KamereonErrorBody>().await {
            Ok(body) => {
                let message = body
                    .message
                    .or_else(|| body.errors.into_iter().find_map(|e| e.error_message))
                    .unwrap_or_else(|| format!("HTTP {}", status));
                (body.kind, message)
            }
            Err(_) => (None, format!("HTTP {}", status)),
        };

        RenaultClientError::server_error(status.as_u16(), kind, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("test@example.com", "testpassword")
    }

    #[test]
    fn construction_succeeds_for_known_locale() {
        let client = RenaultClient::new(credentials(), "sv-SE").unwrap();
        assert_eq!(client.country_code(), "SE");
        assert!(client.account_id().is_none());
        assert!(client.vin().is_none());
    }

    #[test]
    fn construction_fails_for_unknown_locale() {
        let err = RenaultClient::new(credentials(), "xx-XX").unwrap_err();
        assert!(matches!(err, RenaultClientError::UnknownLocale(_)));
        assert!(err.to_string().contains("xx-XX"));
    }

    #[test]
    fn set_vehicle_replaces_the_whole_capability_record() {
        let mut client = RenaultClient::new(credentials(), "sv-SE").unwrap();

        client.set_vehicle("VF1TEST", "X101VE");
        let caps = client.capabilities().unwrap();
        assert!(caps.charging_power_in_watts);
        assert!(!caps.cockpit);

        client.set_vehicle("VF1TEST", "X102VE");
        let caps = client.capabilities().unwrap();
        assert!(!caps.charging_power_in_watts);
        assert!(caps.cockpit);
        assert!(!caps.hvac_status);
    }

    #[test]
    fn car_adapter_url_embeds_account_vin_and_country() {
        let mut client = RenaultClient::new(credentials(), "de-DE").unwrap();
        client.set_account_id("account-1");
        client.set_vehicle("VF1AG000164767503", "X102VE");

        let url = client.car_adapter_url("battery-status", 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api-wired-prod-1-euw1.wrd-aws.com/commerce/v1/accounts/account-1/kamereon/kca/car-adapter/v2/cars/VF1AG000164767503/battery-status?country=DE"
        );
    }

    #[test]
    fn kcm_url_is_vehicle_keyed() {
        let mut client = RenaultClient::new(credentials(), "sv-SE").unwrap();
        client.set_account_id("account-1");
        client.set_vehicle("VF1TEST", "X102VE");

        let url = client.kcm_url("charge/pause-resume", 1).unwrap();
        assert!(url
            .path()
            .ends_with("/kamereon/kcm/v1/vehicles/VF1TEST/charge/pause-resume"));
    }

    #[tokio::test]
    async fn vehicle_scoped_call_without_set_vehicle_is_a_precondition_error() {
        let client = RenaultClient::new(credentials(), "sv-SE").unwrap();
        let err = client.battery_status().await.unwrap_err();
        assert!(matches!(err, RenaultClientError::MissingPrecondition(_)));
    }

    #[test]
    fn url_construction_without_account_is_a_precondition_error() {
        let mut client = RenaultClient::new(credentials(), "sv-SE").unwrap();
        client.set_vehicle("VF1TEST", "X102VE");
        let err = client.car_adapter_url("cockpit", 1).unwrap_err();
        assert!(matches!(
            err,
            RenaultClientError::MissingPrecondition("account id")
        ));
    }
}
