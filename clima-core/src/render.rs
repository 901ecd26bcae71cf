//! Text rendering of a [`WeatherView`], one layout per status.

use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt;

use crate::{
    model::{AgriculturalInsight, CurrentWeather, Location},
    state::{Status, WeatherView},
};

pub const TITLE: &str = "Clima Cana";
pub const TAGLINE: &str = "Weather essentials for a healthy sugarcane crop";
pub const EXAMPLE_CITIES: &str = "Ex: \"São Paulo\", \"Ribeirão Preto\", \"Campinas\"";
pub const LOADING_MESSAGE: &str = "Fetching weather information...";
pub const ERROR_HEADING: &str = "Something went wrong";
pub const RETRY_HINT: &str = "Search another city, or retry to go back to the start.";

/// What the screen shows for one status: the search control state plus body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub search_enabled: bool,
    pub lines: Vec<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

pub fn frame(view: &WeatherView) -> Frame {
    let mut lines = Vec::new();

    match view.status() {
        Status::Idle => {
            lines.push(TITLE.to_string());
            lines.push(TAGLINE.to_string());
            lines.push(String::new());
            if let Some(notice) = view.notice() {
                lines.push(format!("! {notice}"));
            }
            lines.push(EXAMPLE_CITIES.to_string());
            lines.push(String::new());
            lines.push("Temperature  - watch for ideal growing conditions".to_string());
            lines.push("Humidity     - keep disease and pest risk under control".to_string());
            lines.push("Precip.      - plan irrigation and harvest".to_string());
        }
        Status::Loading => {
            lines.push(LOADING_MESSAGE.to_string());
        }
        Status::Success(response) => {
            if let Some(notice) = view.notice() {
                lines.push(format!("! {notice}"));
            }
            push_location(&mut lines, &response.location);
            lines.push(String::new());
            push_current(&mut lines, &response.current);
            lines.push(String::new());
            push_insight(&mut lines, &response.agricultural_insights);
        }
        Status::Error(message) => {
            if let Some(notice) = view.notice() {
                lines.push(format!("! {notice}"));
            }
            lines.push(ERROR_HEADING.to_string());
            lines.push(message.clone());
            lines.push(RETRY_HINT.to_string());
        }
    }

    Frame { search_enabled: view.search_enabled(), lines }
}

fn push_location(lines: &mut Vec<String>, location: &Location) {
    lines.push(location.name.clone());
    lines.push(format!("{:.4}°, {:.4}°", location.latitude, location.longitude));
}

fn push_current(lines: &mut Vec<String>, current: &CurrentWeather) {
    lines.push("Current conditions".to_string());
    lines.push(format!("  Temperature:   {}°C", current.temperature));
    lines.push(format!("  Humidity:      {}%", current.humidity));
    lines.push(format!("  Precipitation: {}mm", current.precipitation));
    lines.push(format!("  Wind:          {}km/h", current.wind_speed));
    lines.push(format!("  Pressure:      {}hPa", current.pressure));
    lines.push(format!("  Cloud cover:   {}%", current.cloud_cover));
    lines.push(format!("Last updated: {}", format_timestamp(&current.last_updated)));
}

fn push_insight(lines: &mut Vec<String>, insight: &AgriculturalInsight) {
    lines.push("Sugarcane analysis".to_string());
    lines.push(format!("Risk level: {}", insight.risk_level.label()));
    lines.push("Recommendations:".to_string());
    for recommendation in &insight.recommendations {
        lines.push(format!("  • {recommendation}"));
    }
}

/// `dd/mm HH:MM` for parseable timestamps, the raw string otherwise.
///
/// Timestamps with an offset are shown in local time; naive ones as given.
pub fn format_timestamp(raw: &str) -> String {
    const OUT: &str = "%d/%m %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(OUT).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(OUT).to_string())
        .unwrap_or_else(|| raw.to_string())
}
