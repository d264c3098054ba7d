//! Static endpoint and capability configuration
//!
//! Endpoint sets and API keys are published per locale by the vehicle
//! manufacturer (the same values the official mobile app downloads).
//! Capability records encode which telematics features each model
//! generation actually answers for, so callers can skip requests that are
//! known to fail.

use std::time::Duration;

use crate::error::{RenaultClientError, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Requested JWT lifetime (seconds), sent with the token-issuance call
pub const JWT_LIFETIME_SECS: u64 = 900;
/// Safety margin subtracted from the JWT lifetime when caching, so a cached
/// token is never handed out moments before it expires mid-flight
pub const TOKEN_CACHE_BUFFER_SECS: u64 = 100;

/// Gigya identity endpoints
pub const GIGYA_LOGIN: &str = "/accounts.login";
pub const GIGYA_GET_JWT: &str = "/accounts.getJWT";
pub const GIGYA_ACCOUNT_INFO: &str = "/accounts.getAccountInfo";

/// Per-locale endpoint set and API keys
///
/// Looked up by exact locale string after alias normalization. A client
/// cannot be constructed without a valid entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    pub country_code: &'static str,
    pub locale: &'static str,
    pub gigya_url: &'static str,
    pub gigya_api_key: &'static str,
    pub kamereon_url: &'static str,
    pub kamereon_api_key: &'static str,
}

const KAMEREON_URL_EU: &str = "https://api-wired-prod-1-euw1.wrd-aws.com";
const KAMEREON_API_KEY_EU: &str = "YjkKtHmGfaceeuExUDKGxrLZGGvtVS0J";
const GIGYA_URL_EU: &str = "https://accounts.eu1.gigya.com";

/// All supported locales
///
/// Values extracted from the manufacturer's published Android app
/// configuration (config_<locale>.json).
pub const LOCALE_CONFIGURATIONS: &[LocaleConfig] = &[
    // Nordics
    LocaleConfig {
        country_code: "SE",
        locale: "sv-SE",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_EN5Hcnwanu9_Dqot1v1Aky1YelT5QqG4TxveO0EgKFWZYu03WkeB9FKuKKIWUXIS",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "NO",
        locale: "nb-NO",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_QrPkEJr69l7rHkdCVls0owC80BB4CGz5xw_b0gBSNdn3pL04wzMBkcwtbeKdl1g9",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "DK",
        locale: "da-DK",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_5x-2C8b1R4MJPQXkwTPdIqgBpcw653Dakw_ZaEneQRkTBdg9UW9Qg_5G-tMNrTMc",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "FI",
        locale: "fi-FI",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_xSRCLDYhk1SwSeYQLI3DmA8t-etfAfu5un51fws125ANOBZHgh8Lcc4ReWSwaqNY",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    // Western Europe
    LocaleConfig {
        country_code: "GB",
        locale: "en-GB",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_e8d4g4SE_Fo8ahyHwwP7ohLGZ79HKNN2T8NjQqoNnk6Epj6ilyYwKdHUyCw3wuxz",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "DE",
        locale: "de-DE",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_7PLksOyBRkHv126x5WhHb-5pqC1qFR8pQjxSeLB6nhAnPERTUlwnYoznHSxwX668",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "FR",
        locale: "fr-FR",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_4LKbCcMMcvjDm3X89LU4z4mNKYKdl_W0oD9w-Jvih21WqgJKtFZAnb9YdUgWT9_a",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "NL",
        locale: "nl-NL",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_ZIOtjqmP0zaHdEnPK7h1xPuBYgtcOyUxbsTY8Gw31Fzy7i7Ltjfm-hhPh23fpHT5",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "IT",
        locale: "it-IT",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_js8th3jdmCWV86fKR3SXQWvXGKbHoWFv8NAgRbH7FnIBsi_XvCpN_rtLcI07uNuq",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
    LocaleConfig {
        country_code: "ES",
        locale: "es-ES",
        gigya_url: GIGYA_URL_EU,
        gigya_api_key: "3_DyMiOwEaxLcPdBTu63Gv3hlhvLaLbW3ufvjHLeuU8U5bx3zx19t5rEKq7KMwk9f1",
        kamereon_url: KAMEREON_URL_EU,
        kamereon_api_key: KAMEREON_API_KEY_EU,
    },
];

/// Look up the endpoint configuration for a locale
///
/// Accepts both `sv-SE` and `sv_SE` spellings and resolves legacy aliases
/// (the pre-Bokmål Norwegian code `no-NO` maps to `nb-NO`).
pub fn configuration_for_locale(locale: &str) -> Result<&'static LocaleConfig> {
    let normalized = locale.replace('_', "-");

    let canonical = match normalized.as_str() {
        "no-NO" => "nb-NO",
        other => other,
    };

    LOCALE_CONFIGURATIONS
        .iter()
        .find(|c| c.locale == canonical)
        .ok_or_else(|| RenaultClientError::UnknownLocale(locale.to_string()))
}

/// Which telematics features a vehicle model answers for
///
/// `charging_power_in_watts` marks first-generation models that report
/// charging power in watts instead of kilowatts; the client divides by
/// 1000 so callers always see kilowatts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCapabilities {
    pub battery_status: bool,
    pub cockpit: bool,
    pub hvac_status: bool,
    pub charge_mode: bool,
    pub location: bool,
    pub fuel_status: bool,
    pub charging_power_in_watts: bool,
}

impl Default for ModelCapabilities {
    /// Permissive default for unknown model codes: assume everything a
    /// current battery-electric model supports, so new hardware keeps
    /// working before its record lands in the table.
    fn default() -> Self {
        Self {
            battery_status: true,
            cockpit: true,
            hvac_status: true,
            charge_mode: true,
            location: true,
            fuel_status: false,
            charging_power_in_watts: false,
        }
    }
}

/// Look up the capability record for a model code
///
/// Unknown codes fall back to the permissive default (logged at warn
/// level) rather than failing.
pub fn capabilities_for_model(model_code: &str) -> ModelCapabilities {
    match model_code {
        // Zoe Phase 1. HVAC status is answered but may always read 'off'.
        "X101VE" => ModelCapabilities {
            battery_status: true,
            cockpit: false,
            hvac_status: true,
            charge_mode: true,
            location: false,
            fuel_status: false,
            charging_power_in_watts: true,
        },
        // Zoe Phase 2. HVAC status returns 403.
        "X102VE" => ModelCapabilities {
            battery_status: true,
            cockpit: true,
            hvac_status: false,
            charge_mode: true,
            location: true,
            fuel_status: false,
            charging_power_in_watts: false,
        },
        // Megane E-Tech
        "XCB1VE" => ModelCapabilities {
            battery_status: true,
            cockpit: true,
            hvac_status: true,
            charge_mode: true,
            location: true,
            fuel_status: false,
            charging_power_in_watts: false,
        },
        // Dacia Spring. Charge mode endpoint not available.
        "XBG1VE" => ModelCapabilities {
            battery_status: true,
            cockpit: true,
            hvac_status: true,
            charge_mode: false,
            location: true,
            fuel_status: false,
            charging_power_in_watts: false,
        },
        // Kangoo E-Tech hybrid: EV endpoints error out, fuel only.
        "XJA1VP" => ModelCapabilities {
            battery_status: false,
            cockpit: false,
            hvac_status: false,
            charge_mode: false,
            location: false,
            fuel_status: true,
            charging_power_in_watts: false,
        },
        other => {
            tracing::warn!(model_code = %other, "unknown model code, using default capabilities");
            ModelCapabilities::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_resolves_to_itself() {
        for config in LOCALE_CONFIGURATIONS {
            let resolved = configuration_for_locale(config.locale).unwrap();
            assert_eq!(resolved.country_code, config.country_code);
            assert_eq!(resolved.locale, config.locale);
        }
    }

    #[test]
    fn underscore_spelling_is_accepted() {
        let config = configuration_for_locale("sv_SE").unwrap();
        assert_eq!(config.country_code, "SE");
    }

    #[test]
    fn legacy_norwegian_code_maps_to_bokmal() {
        let config = configuration_for_locale("no-NO").unwrap();
        assert_eq!(config.locale, "nb-NO");
        assert_eq!(config.country_code, "NO");
    }

    #[test]
    fn unknown_locale_is_an_error_naming_the_input() {
        let err = configuration_for_locale("xx-XX").unwrap_err();
        assert!(err.to_string().contains("xx-XX"));
    }

    #[test]
    fn zoe_phase1_reports_power_in_watts() {
        let caps = capabilities_for_model("X101VE");
        assert!(caps.charging_power_in_watts);
        assert!(!caps.location);
    }

    #[test]
    fn kangoo_hybrid_only_supports_fuel() {
        let caps = capabilities_for_model("XJA1VP");
        assert!(!caps.battery_status);
        assert!(!caps.charge_mode);
        assert!(caps.fuel_status);
    }

    #[test]
    fn unknown_model_gets_permissive_default() {
        let caps = capabilities_for_model("ZZ99ZZ");
        assert_eq!(caps, ModelCapabilities::default());
        assert!(caps.battery_status);
        assert!(!caps.fuel_status);
        assert!(!caps.charging_power_in_watts);
    }
}
