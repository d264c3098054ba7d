//! Renault / Dacia Telematics Client Library
//!
//! Provides a typed async client for the MyRenault / MyDacia connected-car
//! backend: credential login and JWT caching against the Gigya identity
//! provider, account and vehicle discovery, and the per-vehicle data and
//! remote-action endpoints of the Kamereon telematics API.
//!
//! # Example
//!
//! ```rust,no_run
//! use renault_client::{ChargeAction, Credentials, RenaultClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::new("driver@example.com", "secret");
//!     let mut client = RenaultClient::new(credentials, "sv-SE")?;
//!
//!     // Discover the account and its vehicles
//!     client.resolve_account().await?;
//!     let vehicles = client.list_vehicles().await?;
//!     let car = &vehicles[0];
//!     client.set_vehicle(&car.vin, &car.model_code);
//!
//!     // Read vehicle data
//!     if let Some(battery) = client.battery_status().await?.ok() {
//!         println!("battery at {}%", battery.battery_level);
//!     }
//!
//!     // Remote actions
//!     client.start_hvac(21.0).await?;
//!     client.set_charge_mode(ChargeAction::ScheduleMode).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Operation results
//!
//! Not every vehicle model answers every endpoint. Per-vehicle operations
//! return [`OperationResult`] with three arms: `Ok` with the payload,
//! `NotSupported` when the model cannot do it (gated locally or confirmed
//! by the backend), and `Error` for transport and server failures.
//! Configuration, precondition, and authentication problems still surface
//! as ordinary `Err` values.
//!
//! # Testing
//!
//! The `testing` module provides a mock backend and test server:
//!
//! ```rust,ignore
//! use renault_client::testing::TestServer;
//!
//! let mut server = TestServer::start().await?;
//! server.client.set_account_id("account-1");
//! server.client.set_vehicle("VF1TEST", "X102VE");
//! let battery = server.client.battery_status().await?;
//! ```

mod client;
mod config;
mod error;
pub mod testing;
mod types;

pub use client::RenaultClient;
pub use config::{
    capabilities_for_model, configuration_for_locale, LocaleConfig, ModelCapabilities,
    LOCALE_CONFIGURATIONS,
};
pub use error::{RenaultClientError, Result};
pub use types::{
    AccountInfo, BatteryStatus, ChargeAction, ChargeMode, Cockpit, Credentials, HvacStatus,
    Location, OperationResult, VehicleInfo,
};
