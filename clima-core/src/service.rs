use crate::{Config, HealthStatus, WeatherError, WeatherResponse};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

pub use http::HttpWeatherService;

/// Backend that turns a city name into current weather plus agricultural insight.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Look up the current weather for `city`. Blank input fails with
    /// [`WeatherError::Validation`] before any I/O.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResponse, WeatherError>;

    /// Liveness probe; not part of the search flow.
    async fn health_check(&self) -> Result<HealthStatus, WeatherError>;
}

/// Construct the HTTP-backed service from config.
///
/// `api_url_override` (e.g. a CLI flag) wins over everything in `config`.
pub fn service_from_config(
    config: &Config,
    api_url_override: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherService>> {
    let base_url = match api_url_override {
        Some(url) => url.to_string(),
        None => config.api_url(),
    };

    let service = HttpWeatherService::with_timeout(&base_url, config.timeout())?;
    tracing::debug!(base_url = service.base_url(), "weather service configured");

    Ok(Box::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_config() {
        let cfg = Config { api_url: Some("http://from-file:8000".into()), ..Config::default() };
        let service = service_from_config(&cfg, Some("http://from-flag:9000/")).unwrap();
        assert!(format!("{service:?}").contains("http://from-flag:9000"));
    }

    #[test]
    fn timeout_from_config_builds() {
        let cfg = Config { timeout_secs: Some(5), ..Config::default() };
        assert!(service_from_config(&cfg, Some("http://localhost:8000")).is_ok());
    }
}
