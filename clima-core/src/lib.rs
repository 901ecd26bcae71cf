//! Core library for the Clima Cana weather client.
//!
//! This crate defines:
//! - The data model returned by the Clima Cana backend
//! - The HTTP transport adapter and its error normalization
//! - The four-state view model and its text rendering
//! - Configuration of the backend address
//!
//! It is used by `clima-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod service;
pub mod state;

pub use config::Config;
pub use error::WeatherError;
pub use model::{
    AgriculturalInsight, CurrentWeather, HealthStatus, Location, RiskLevel, WeatherResponse,
};
pub use render::{Frame, frame};
pub use service::{HttpWeatherService, WeatherService, service_from_config};
pub use state::{Search, Status, WeatherView};
