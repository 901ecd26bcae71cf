//! Four-state view model driving what the front-end renders.
//!
//! A search is split into [`WeatherView::begin`] and [`WeatherView::complete`]
//! so the caller can render the loading state while the request is in flight.
//! [`WeatherView::submit`] runs both around a [`WeatherService`] call.
//!
//! Every `begin` issues a new [`Search`] ticket. Only the latest ticket may
//! complete; results of superseded searches are dropped rather than applied in
//! completion order. In-flight requests are never cancelled.

use crate::{WeatherError, WeatherResponse, WeatherService};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success(WeatherResponse),
    Error(String),
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success(_) => "success",
            Status::Error(_) => "error",
        }
    }
}

/// Ticket for one submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    city: String,
    generation: u64,
}

impl Search {
    /// The trimmed city to query.
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Default)]
pub struct WeatherView {
    status: Status,
    notice: Option<String>,
    generation: u64,
}

impl WeatherView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn response(&self) -> Option<&WeatherResponse> {
        match &self.status {
            Status::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Validation feedback from the last rejected submission.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }

    /// The search control is disabled only while a request is in flight.
    pub fn search_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Start a search. Blank input leaves the status alone, records a notice
    /// and fails with [`WeatherError::Validation`].
    pub fn begin(&mut self, city: &str) -> Result<Search, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            let err = WeatherError::city_required();
            self.notice = Some(err.message());
            return Err(err);
        }

        self.notice = None;
        self.generation += 1;
        self.status = Status::Loading;
        tracing::debug!(city, generation = self.generation, "search started");

        Ok(Search { city: city.to_string(), generation: self.generation })
    }

    /// Apply the outcome of `search`. Returns `false` when a newer search has
    /// started since, in which case nothing changes.
    pub fn complete(&mut self, search: Search, result: Result<WeatherResponse, WeatherError>) -> bool {
        if search.generation != self.generation {
            tracing::debug!(
                city = %search.city,
                generation = search.generation,
                latest = self.generation,
                "dropping result of superseded search"
            );
            return false;
        }

        self.status = match result {
            Ok(response) => {
                tracing::info!(
                    city = %search.city,
                    risk = %response.agricultural_insights.risk_level,
                    "search succeeded"
                );
                Status::Success(response)
            }
            Err(err) => {
                tracing::info!(city = %search.city, error = %err, "search failed");
                Status::Error(err.message())
            }
        };
        true
    }

    /// Run a whole search against `service`.
    pub async fn submit(&mut self, service: &dyn WeatherService, city: &str) -> &Status {
        if let Ok(search) = self.begin(city) {
            let result = service.fetch_weather(search.city()).await;
            self.complete(search, result);
        }
        &self.status
    }

    /// Dismiss an error and go back to idle without fetching. No-op outside
    /// the error state.
    pub fn retry(&mut self) -> bool {
        if matches!(self.status, Status::Error(_)) {
            self.status = Status::Idle;
            true
        } else {
            false
        }
    }
}
