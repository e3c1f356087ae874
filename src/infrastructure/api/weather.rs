//! OpenWeather client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, ApiError, ApiResult};

const API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// The two fields the weather command actually uses
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    pub temp_c: f64,
}

/// Current-weather lookup by city name
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, city: &str) -> ApiResult<WeatherReport>;
}

/// OpenWeather REST client; without a key every lookup degrades to
/// `ApiError::MissingKey` instead of an outbound call
pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[derive(Deserialize)]
struct WeatherResponse {
    weather: Option<Vec<Condition>>,
    main: Option<Main>,
}

#[derive(Deserialize)]
struct Condition {
    description: Option<String>,
}

#[derive(Deserialize)]
struct Main {
    temp: Option<f64>,
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current(&self, city: &str) -> ApiResult<WeatherReport> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingKey)?;

        let response = self
            .client
            .get(API_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;
        let body: WeatherResponse = check_status(response)?.json().await?;

        let description = body
            .weather
            .and_then(|w| w.into_iter().next())
            .and_then(|c| c.description)
            .ok_or(ApiError::MissingField("weather"))?;
        let temp_c = body
            .main
            .and_then(|m| m.temp)
            .ok_or(ApiError::MissingField("main.temp"))?;

        Ok(WeatherReport {
            description,
            temp_c,
        })
    }
}
