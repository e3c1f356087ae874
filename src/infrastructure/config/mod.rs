//! Configuration management
//!
//! Everything comes from the environment (a local `.env` is loaded at
//! startup). The platform token is the only mandatory credential; each
//! third-party key is optional and independently switches its command
//! between real and degraded behavior.

use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;

const DEFAULT_PREFIX: &str = "/";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_STORE_PATH: &str = "db/users.json";

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram credential, mandatory for the `run` subcommand
    pub telegram_token: Option<String>,
    pub openweather_api_key: Option<String>,
    pub coingecko_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    /// Read and reported, reserved for a future stocks command
    pub alpha_vantage_api_key: Option<String>,
    pub huggingface_model: Option<String>,
    pub command_prefix: String,
    /// Uniform bound applied to every outbound call
    pub request_timeout: Duration,
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match optional("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            telegram_token: optional("TELEGRAM_TOKEN"),
            openweather_api_key: optional("OPENWEATHER_API_KEY"),
            coingecko_api_key: optional("COINGECKO_API_KEY"),
            huggingface_api_key: optional("HUGGINGFACE_API_KEY"),
            alpha_vantage_api_key: optional("ALPHAVANTAGE_API_KEY"),
            huggingface_model: optional("HUGGINGFACE_MODEL"),
            command_prefix: optional("BOT_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            store_path: optional("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
        })
    }

    /// The platform credential; absent means the process refuses to start
    pub fn require_telegram_token(&self) -> Result<&str, ConfigError> {
        self.telegram_token
            .as_deref()
            .ok_or(ConfigError::MissingVar("TELEGRAM_TOKEN"))
    }

    /// Names of the optional credentials that are present, for startup logs
    pub fn configured_services(&self) -> Vec<&'static str> {
        let mut services = Vec::new();
        if self.openweather_api_key.is_some() {
            services.push("openweather");
        }
        if self.coingecko_api_key.is_some() {
            services.push("coingecko");
        }
        if self.huggingface_api_key.is_some() {
            services.push("huggingface");
        }
        if self.alpha_vantage_api_key.is_some() {
            services.push("alphavantage");
        }
        services
    }
}

/// Non-empty environment variable, if set
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so nothing else races on the process environment
    #[test]
    fn from_env_reads_defaults_and_overrides() {
        for var in [
            "TELEGRAM_TOKEN",
            "OPENWEATHER_API_KEY",
            "COINGECKO_API_KEY",
            "HUGGINGFACE_API_KEY",
            "ALPHAVANTAGE_API_KEY",
            "HUGGINGFACE_MODEL",
            "BOT_PREFIX",
            "REQUEST_TIMEOUT_SECS",
            "STORE_PATH",
        ] {
            std::env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert!(config.telegram_token.is_none());
        assert!(config.require_telegram_token().is_err());
        assert_eq!(config.command_prefix, "/");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.store_path, PathBuf::from("db/users.json"));
        assert!(config.configured_services().is_empty());

        std::env::set_var("TELEGRAM_TOKEN", "123:abc");
        std::env::set_var("OPENWEATHER_API_KEY", "owm-key");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "20");
        std::env::set_var("BOT_PREFIX", "!");

        let config = Config::from_env().unwrap();
        assert_eq!(config.require_telegram_token().unwrap(), "123:abc");
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.configured_services(), vec!["openweather"]);

        std::env::set_var("REQUEST_TIMEOUT_SECS", "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { var: "REQUEST_TIMEOUT_SECS", .. })
        ));

        for var in [
            "TELEGRAM_TOKEN",
            "OPENWEATHER_API_KEY",
            "REQUEST_TIMEOUT_SECS",
            "BOT_PREFIX",
        ] {
            std::env::remove_var(var);
        }
    }
}
