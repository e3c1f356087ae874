//! CoinGecko client

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, ApiError, ApiResult};

const API_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Spot-price lookup by CoinGecko coin id
#[async_trait]
pub trait CryptoApi: Send + Sync {
    /// USD price for a coin id such as `bitcoin`
    async fn price_usd(&self, coin_id: &str) -> ApiResult<f64>;
}

/// CoinGecko REST client; the demo key is optional, the free tier works
/// without one
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[derive(Deserialize)]
struct CoinEntry {
    usd: Option<f64>,
}

#[async_trait]
impl CryptoApi for CoinGeckoClient {
    async fn price_usd(&self, coin_id: &str) -> ApiResult<f64> {
        let mut request = self
            .client
            .get(API_URL)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")]);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = check_status(request.send().await?)?;
        // An unknown id is a 200 with the coin simply absent from the map
        let body: HashMap<String, CoinEntry> = response.json().await?;
        body.get(coin_id)
            .and_then(|entry| entry.usd)
            .ok_or(ApiError::MissingField("usd"))
    }
}
