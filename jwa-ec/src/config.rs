//! Runtime configuration.
//!
//! The only setting is whether ASN.1 DER encoded signatures are accepted by
//! [`EcdsaAlgorithm::verify`](crate::ecdsa::EcdsaAlgorithm::verify) in place of
//! the JOSE `R || S` encoding. It defaults to off.
//!
//! The process-wide value is meant to be installed once at startup (for
//! example from [`Config::from_env`]) and only read afterwards. Callers which
//! prefer not to rely on process-wide state can pass a [`Config`] explicitly to
//! [`EcdsaAlgorithm::verify_with_config`](crate::ecdsa::EcdsaAlgorithm::verify_with_config).

use core::sync::atomic::{AtomicBool, Ordering};
use serde::Deserialize;

/// Environment variable consulted by [`Config::from_env`].
pub const LEGACY_DER_SIGNATURES_ENV: &str = "JWA_EC_LEGACY_DER_SIGNATURES";

static LEGACY_DER_SIGNATURES: AtomicBool = AtomicBool::new(false);

/// Verification settings.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Accept ASN.1 DER encoded signatures when verifying.
    pub legacy_der_signatures: bool,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// [`LEGACY_DER_SIGNATURES_ENV`] enables legacy DER signatures when set to
    /// `true` (case-insensitive). Any other value, or no value, leaves them
    /// disabled.
    pub fn from_env() -> Self {
        let legacy_der_signatures = std::env::var(LEGACY_DER_SIGNATURES_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Self {
            legacy_der_signatures,
        }
    }

    /// The process-wide configuration.
    pub fn current() -> Self {
        Self {
            legacy_der_signatures: LEGACY_DER_SIGNATURES.load(Ordering::Acquire),
        }
    }

    /// Make this the process-wide configuration.
    pub fn install(self) {
        if self.legacy_der_signatures {
            tracing::warn!("accepting legacy ASN.1 DER encoded ECDSA signatures");
        }
        LEGACY_DER_SIGNATURES.store(self.legacy_der_signatures, Ordering::Release);
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, Config};

    #[test]
    fn default_is_strict() {
        assert!(!Config::default().legacy_der_signatures);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" True\n"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn deserialize() {
        let config: Config = serde_json::from_str(r#"{"legacy_der_signatures":true}"#).unwrap();
        assert!(config.legacy_der_signatures);

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        assert!(serde_json::from_str::<Config>(r#"{"legacy":true}"#).is_err());
    }
}
