//! Utilities bundle: weather, crypto, time

use std::sync::Arc;

use crate::application::messaging::{Bundle, Command};
use crate::domain::entities::Reply;
use crate::infrastructure::api::{ApiError, CryptoApi, WeatherApi};

const WEATHER_USAGE: &str = "Usage: /weather city_name";
const DEFAULT_COIN: &str = "bitcoin";

pub fn bundle(weather: Arc<dyn WeatherApi>, crypto: Arc<dyn CryptoApi>) -> Bundle {
    Bundle::new("utilities")
        .command(
            Command::new("weather", "Weather info (OpenWeather)", move |inv| {
                let api = weather.clone();
                async move {
                    let city = inv.args_trimmed().to_string();
                    if city.is_empty() {
                        return Reply::text(WEATHER_USAGE);
                    }
                    match api.current(&city).await {
                        Ok(report) => Reply::text(format!(
                            "Weather in {}: {}, {}°C",
                            city, report.description, report.temp_c
                        )),
                        Err(ApiError::MissingKey) | Err(ApiError::Status(_)) => {
                            Reply::text("Weather not found or API key missing")
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, city = %city, "weather fetch failed");
                            Reply::text("Weather API error")
                        }
                    }
                }
            })
            .with_args_hint("<city>"),
        )
        .command(
            Command::new("crypto", "Crypto price (CoinGecko)", move |inv| {
                let api = crypto.clone();
                async move {
                    let coin = match inv.args_trimmed() {
                        "" => DEFAULT_COIN.to_string(),
                        arg => arg.to_lowercase(),
                    };
                    match api.price_usd(&coin).await {
                        Ok(price) => {
                            Reply::text(format!("{} price: ${}", capitalize(&coin), price))
                        }
                        Err(ApiError::MissingField(_)) => Reply::text("Coin not found"),
                        Err(e) => {
                            tracing::warn!(error = %e, coin = %coin, "price fetch failed");
                            Reply::text("CoinGecko API error")
                        }
                    }
                }
            })
            .with_args_hint("<id>"),
        )
        .command(Command::new("time", "Current server time", |_inv| async {
            let now = chrono::Local::now();
            Reply::text(format!("Server time: {}", now.format("%Y-%m-%d %H:%M:%S")))
        }))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::messaging::Router;
    use crate::domain::entities::{Invocation, User};
    use crate::infrastructure::api::{ApiResult, WeatherReport};

    #[derive(Default)]
    struct MockWeather {
        calls: AtomicUsize,
        error: Option<fn() -> ApiError>,
    }

    #[async_trait]
    impl WeatherApi for MockWeather {
        async fn current(&self, _city: &str) -> ApiResult<WeatherReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(make) => Err(make()),
                None => Ok(WeatherReport {
                    description: "clear sky".to_string(),
                    temp_c: 18.4,
                }),
            }
        }
    }

    #[derive(Default)]
    struct MockCrypto {
        calls: AtomicUsize,
        last_id: Mutex<Option<String>>,
        error: Option<fn() -> ApiError>,
    }

    #[async_trait]
    impl CryptoApi for MockCrypto {
        async fn price_usd(&self, coin_id: &str) -> ApiResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_id.lock().unwrap() = Some(coin_id.to_string());
            match self.error {
                Some(make) => Err(make()),
                None => Ok(65000.5),
            }
        }
    }

    async fn dispatch(
        weather: Arc<MockWeather>,
        crypto: Arc<MockCrypto>,
        command: &str,
        args: &str,
    ) -> Reply {
        let mut router = Router::new();
        router.register(bundle(weather, crypto)).unwrap();
        router
            .dispatch(Invocation::new("1", command, args, User::anonymous()))
            .await
            .expect("command is registered")
    }

    #[tokio::test]
    async fn weather_without_city_replies_usage_and_makes_no_call() {
        let weather = Arc::new(MockWeather::default());
        let reply = dispatch(weather.clone(), Arc::default(), "weather", "  ").await;
        assert_eq!(reply, Reply::text("Usage: /weather city_name"));
        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn weather_formats_description_and_temperature() {
        let reply = dispatch(Arc::default(), Arc::default(), "weather", "Paris").await;
        assert_eq!(reply, Reply::text("Weather in Paris: clear sky, 18.4°C"));
    }

    #[tokio::test]
    async fn weather_missing_key_and_bad_status_share_a_fallback() {
        for make in [
            (|| ApiError::MissingKey) as fn() -> ApiError,
            || ApiError::Status(404),
            || ApiError::Status(401),
        ] {
            let weather = Arc::new(MockWeather {
                calls: AtomicUsize::new(0),
                error: Some(make),
            });
            let reply = dispatch(weather, Arc::default(), "weather", "Paris").await;
            assert_eq!(reply, Reply::text("Weather not found or API key missing"));
        }
    }

    #[tokio::test]
    async fn weather_other_failures_use_generic_fallback() {
        for make in [
            (|| ApiError::Timeout) as fn() -> ApiError,
            || ApiError::Decode("truncated".to_string()),
            || ApiError::MissingField("main.temp"),
            || ApiError::Network("connection refused".to_string()),
        ] {
            let weather = Arc::new(MockWeather {
                calls: AtomicUsize::new(0),
                error: Some(make),
            });
            let reply = dispatch(weather, Arc::default(), "weather", "Paris").await;
            assert_eq!(reply, Reply::text("Weather API error"));
        }
    }

    #[tokio::test]
    async fn crypto_defaults_to_bitcoin() {
        let crypto = Arc::new(MockCrypto::default());
        let reply = dispatch(Arc::default(), crypto.clone(), "crypto", "").await;
        assert_eq!(reply, Reply::text("Bitcoin price: $65000.5"));
        assert_eq!(crypto.last_id.lock().unwrap().as_deref(), Some("bitcoin"));
    }

    #[tokio::test]
    async fn crypto_lowercases_the_requested_id() {
        let crypto = Arc::new(MockCrypto::default());
        let _ = dispatch(Arc::default(), crypto.clone(), "crypto", "Ethereum").await;
        assert_eq!(crypto.last_id.lock().unwrap().as_deref(), Some("ethereum"));
    }

    #[tokio::test]
    async fn crypto_unknown_coin_vs_transport_failure() {
        let not_found = Arc::new(MockCrypto {
            error: Some(|| ApiError::MissingField("usd")),
            ..Default::default()
        });
        let reply = dispatch(Arc::default(), not_found, "crypto", "dogecorn").await;
        assert_eq!(reply, Reply::text("Coin not found"));

        let down = Arc::new(MockCrypto {
            error: Some(|| ApiError::Status(503)),
            ..Default::default()
        });
        let reply = dispatch(Arc::default(), down, "crypto", "bitcoin").await;
        assert_eq!(reply, Reply::text("CoinGecko API error"));
    }

    #[tokio::test]
    async fn time_matches_the_documented_format() {
        let reply = dispatch(Arc::default(), Arc::default(), "time", "").await;
        let Reply::Text(text) = reply else {
            panic!("time should reply with text");
        };
        let stamp = text.strip_prefix("Server time: ").expect("prefix");
        chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
            .expect("timestamp should parse back");
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize("bitcoin"), "Bitcoin");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
    }
}
