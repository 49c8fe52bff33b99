//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CARTWHEEL_API_URL` - Catalog API base URL (default: `http://localhost:5000/api/v1`)
//! - `CARTWHEEL_CART_PATH` - Where the cart is saved (default: `.cartwheel/cart.json`)
//! - `CARTWHEEL_RECOMMEND_LIMIT` - Products in the recommendation strip (default: 4)
//! - `CARTWHEEL_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 1000)
//! - `CARTWHEEL_SHIPPING_FEE` - Flat shipping fee (default: 100)
//! - `CARTWHEEL_TAX_RATE` - Tax as a fraction of the subtotal (default: 0.18)
//! - `CARTWHEEL_CURRENCY` - ISO 4217 display currency (default: INR)
//! - `CARTWHEEL_SESSION_TOKEN` - Signed-in session; checkout asks for sign-in without it
//! - `CARTWHEEL_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;

use cartwheel_core::pricing::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD};
use cartwheel_core::{CurrencyCode, Money, PricingPolicy};
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";
const DEFAULT_CART_PATH: &str = ".cartwheel/cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected 'pretty' or 'json', got '{s}'")),
        }
    }
}

/// CLI configuration.
#[derive(Clone)]
pub struct CliConfig {
    /// Catalog API base URL
    pub api_url: Url,
    /// Saved cart location
    pub cart_path: PathBuf,
    /// Recommendation strip size
    pub recommend_limit: usize,
    /// Shipping, tax, and currency rules
    pub pricing: PricingPolicy,
    /// Session credential; `None` means signed out
    pub session_token: Option<SecretString>,
    /// Log output format
    pub log_format: LogFormat,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("api_url", &self.api_url.as_str())
            .field("cart_path", &self.cart_path)
            .field("recommend_limit", &self.recommend_limit)
            .field("pricing", &self.pricing)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that cannot be
    /// parsed or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let api_url = env.parse_or("CARTWHEEL_API_URL", DEFAULT_API_URL, |s| {
            Url::parse(s).map_err(|e| e.to_string())
        })?;
        let cart_path = PathBuf::from(env.get_or_default("CARTWHEEL_CART_PATH", DEFAULT_CART_PATH));
        let recommend_limit = env.parse_or(
            "CARTWHEEL_RECOMMEND_LIMIT",
            &cartwheel_core::DEFAULT_RECOMMENDATION_LIMIT.to_string(),
            |s| s.parse::<usize>().map_err(|e| e.to_string()),
        )?;

        let defaults = PricingPolicy::default();
        let pricing = PricingPolicy {
            free_shipping_threshold: env.parse_or(
                "CARTWHEEL_FREE_SHIPPING_THRESHOLD",
                &FREE_SHIPPING_THRESHOLD.to_string(),
                parse_money,
            )?,
            flat_shipping_fee: env.parse_or(
                "CARTWHEEL_SHIPPING_FEE",
                &FLAT_SHIPPING_FEE.to_string(),
                parse_money,
            )?,
            tax_rate: env.parse_or(
                "CARTWHEEL_TAX_RATE",
                &defaults.tax_rate.to_string(),
                parse_rate,
            )?,
            currency: env.parse_or(
                "CARTWHEEL_CURRENCY",
                defaults.currency.code(),
                str::parse::<CurrencyCode>,
            )?,
        };

        let session_token = env
            .get_optional("CARTWHEEL_SESSION_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);
        let log_format =
            env.parse_or("CARTWHEEL_LOG_FORMAT", "pretty", str::parse::<LogFormat>)?;

        Ok(Self {
            api_url,
            cart_path,
            recommend_limit,
            pricing,
            session_token,
            log_format,
        })
    }

    /// Returns `true` if a signed-in session is configured.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session_token.is_some()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional environment variable.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get an environment variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Parse an environment variable, falling back to `default` when unset.
    fn parse_or<T>(
        &self,
        key: &str,
        default: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Result<T, ConfigError> {
        let raw = self.get_or_default(key, default);
        parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
    }
}

/// Parse a non-negative major-unit amount.
fn parse_money(s: &str) -> Result<Money, String> {
    let amount = Decimal::from_str(s).map_err(|e| e.to_string())?;
    Money::from_decimal(amount).map_err(|e| e.to_string())
}

/// Parse a rate in `0..=1`.
fn parse_rate(s: &str) -> Result<Decimal, String> {
    let rate = Decimal::from_str(s).map_err(|e| e.to_string())?;
    if rate.is_sign_negative() || rate > Decimal::ONE {
        return Err(format!("rate must be between 0 and 1, got {rate}"));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/api/v1");
        assert_eq!(config.cart_path, PathBuf::from(".cartwheel/cart.json"));
        assert_eq!(config.recommend_limit, 4);
        assert_eq!(config.pricing, PricingPolicy::default());
        assert!(!config.has_session());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_pricing_overrides() {
        let config = load(&[
            ("CARTWHEEL_FREE_SHIPPING_THRESHOLD", "49.99"),
            ("CARTWHEEL_SHIPPING_FEE", "5"),
            ("CARTWHEEL_TAX_RATE", "0.075"),
            ("CARTWHEEL_CURRENCY", "usd"),
        ])
        .unwrap();
        assert_eq!(
            config.pricing.free_shipping_threshold,
            Money::from_cents(4999)
        );
        assert_eq!(config.pricing.flat_shipping_fee, Money::from_major(5));
        assert_eq!(config.pricing.tax_rate, Decimal::new(75, 3));
        assert_eq!(config.pricing.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_invalid_tax_rate() {
        let ConfigError::InvalidEnvVar(key, _) =
            load(&[("CARTWHEEL_TAX_RATE", "1.5")]).unwrap_err();
        assert_eq!(key, "CARTWHEEL_TAX_RATE");
    }

    #[test]
    fn test_negative_fee_rejected() {
        assert!(load(&[("CARTWHEEL_SHIPPING_FEE", "-1")]).is_err());
    }

    #[test]
    fn test_invalid_url() {
        assert!(load(&[("CARTWHEEL_API_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_session_token_redacted() {
        let config = load(&[("CARTWHEEL_SESSION_TOKEN", "tok_abc123")]).unwrap();
        assert!(config.has_session());
        let debug = format!("{config:?}");
        assert!(!debug.contains("tok_abc123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_blank_session_token_is_signed_out() {
        let config = load(&[("CARTWHEEL_SESSION_TOKEN", "  ")]).unwrap();
        assert!(!config.has_session());
    }
}
