use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    error::UNEXPECTED_RESPONSE,
    model::{ErrorBody, HealthStatus, WeatherResponse},
    WeatherError,
};

use super::WeatherService;

/// Talks to the Clima Cana backend over HTTP.
///
/// One GET per call; no caching and no retries.
#[derive(Debug, Clone)]
pub struct HttpWeatherService {
    base_url: String,
    http: Client,
}

impl HttpWeatherService {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), http: Client::new() }
    }

    /// Like [`HttpWeatherService::new`] with an optional request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { base_url: normalize_base_url(base_url), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, WeatherError> {
        let res = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request to weather service failed");
            WeatherError::Connection
        })?;

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => body,
            // A response arrived, so an error status still names the failure.
            Err(e) if !status.is_success() => {
                tracing::warn!(error = %e, %status, "failed to read weather service error body");
                String::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, %status, "failed to read weather service response body");
                return Err(WeatherError::Connection);
            }
        };

        if !status.is_success() {
            let err = error_from_status(status, &body);
            tracing::debug!(%status, message = %err, "weather service returned an error");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, body = %truncate_body(&body), "unreadable weather service response");
            WeatherError::Service { status: status.as_u16(), message: UNEXPECTED_RESPONSE.to_string() }
        })
    }
}

#[async_trait]
impl WeatherService for HttpWeatherService {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResponse, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::city_required());
        }

        tracing::debug!(city, "fetching weather");
        let request = self.http.get(self.url("/weather")).query(&[("city", city)]);
        self.execute(request).await
    }

    async fn health_check(&self) -> Result<HealthStatus, WeatherError> {
        tracing::debug!("checking weather service health");
        self.execute(self.http.get(self.url("/health"))).await
    }
}

/// Map a non-success response to the error shown to the user.
///
/// A non-empty `detail` in the JSON body is used verbatim; anything else
/// falls back to `HTTP <code>: <reason>`.
pub fn error_from_status(status: StatusCode, body: &str) -> WeatherError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty());

    let message = detail.unwrap_or_else(|| {
        format!("HTTP {}: {}", status.as_u16(), status.canonical_reason().unwrap_or("Unknown Status"))
    });

    WeatherError::Service { status: status.as_u16(), message }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
