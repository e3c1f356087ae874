//! Typed clients for the third-party REST APIs behind the commands
//!
//! Each client makes exactly one outbound call per invocation, validates the
//! response shape at this boundary and hands the handler only the fields it
//! needs. All clients share one reqwest client with a uniform bounded
//! timeout.

pub mod crypto;
pub mod fun;
pub mod textgen;
pub mod weather;

pub use crypto::{CoinGeckoClient, CryptoApi};
pub use fun::{FunApi, HttpFunClient, Meme, Quote};
pub use textgen::{HuggingFaceClient, TextGen};
pub use weather::{OpenWeatherClient, WeatherApi, WeatherReport};

use std::time::Duration;
use thiserror::Error;

/// Failure of a single outbound call, mapped deterministically by each
/// handler to its documented fallback string
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("missing field `{0}` in response")]
    MissingField(&'static str),

    #[error("API credential not configured")]
    MissingKey,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Result type for API client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Shared HTTP client with the bot-wide request timeout
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Map a non-success response to `ApiError::Status`
pub(crate) fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(response)
}
