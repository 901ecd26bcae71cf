use thiserror::Error;

/// Message shown for blank city input.
pub const CITY_REQUIRED: &str = "city name is required";

/// Message shown when no response could be obtained from the backend.
pub const CONNECTION_FAILED: &str = "could not connect to the weather service";

/// Message used when a success response carries an unreadable body.
pub const UNEXPECTED_RESPONSE: &str = "unexpected response from the weather service";

/// Every failure a search can end in.
///
/// The view layer does not branch on the kind; it only shows
/// [`WeatherError::message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Input rejected before any I/O.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// No response was obtained.
    #[error("{}", CONNECTION_FAILED)]
    Connection,
}

impl WeatherError {
    pub fn city_required() -> Self {
        WeatherError::Validation(CITY_REQUIRED.to_string())
    }

    /// Display string for the view, regardless of kind.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_uniform_across_kinds() {
        assert_eq!(WeatherError::city_required().message(), CITY_REQUIRED);
        assert_eq!(WeatherError::Connection.message(), CONNECTION_FAILED);

        let err = WeatherError::Service { status: 404, message: "Cidade não encontrada".into() };
        assert_eq!(err.message(), "Cidade não encontrada");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn only_service_errors_carry_status() {
        assert_eq!(WeatherError::Connection.status(), None);
        assert_eq!(WeatherError::city_required().status(), None);
    }
}
