//! Error taxonomy shared by the Wavecast crates.
//!
//! Anything the user gets to see is an [`AppError`]. `user_message()` is the
//! notification text; `Display` carries the detail for the log.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("network: {0}")]
    Network(#[from] NetworkError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("weather: {0}")]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Other(_) => "Something went wrong. Please try again.",
        }
    }
}

/// Transport and payload failures talking to the weather service.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("timed out")]
    Timeout,

    #[error("HTTP {status} from {detail}")]
    Status { status: u16, detail: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::Unreachable(_) => {
                "Could not reach the weather service. Check your connection."
            }
            NetworkError::Timeout => "The weather service took too long to answer.",
            NetworkError::Status { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Try again later."
            }
            NetworkError::Status { .. } => "The weather service rejected the request.",
            NetworkError::MalformedPayload(_) => "The weather service sent data we could not read.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "A setting in config.toml is invalid.",
        }
    }
}

/// Location lookup outcomes as the user sees them.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("device location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("no place matches {0:?}")]
    LocationNotFound(String),

    #[error("analyze requested without a selected location")]
    NoLocationSelected,

    #[error("empty search query")]
    EmptyQuery,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationUnavailable(_) => {
                "Your location is unavailable. Search for a city instead."
            }
            WeatherError::LocationNotFound(_) => "Location not found",
            WeatherError::NoLocationSelected => "Select a location first",
            WeatherError::EmptyQuery => "Enter a city",
        }
    }
}

/// Classifies a `reqwest` failure.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        match self.status() {
            _ if self.is_timeout() => NetworkError::Timeout,
            _ if self.is_decode() => NetworkError::MalformedPayload(self.to_string()),
            Some(status) => NetworkError::Status {
                status: status.as_u16(),
                detail: self
                    .url()
                    .map_or_else(|| self.to_string(), |url| url.path().to_string()),
            },
            None => NetworkError::Unreachable(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_errors_convert() {
        let err: AppError = WeatherError::NoLocationSelected.into();
        assert!(matches!(err, AppError::Weather(WeatherError::NoLocationSelected)));
        assert_eq!(err.user_message(), "Select a location first");
    }

    #[test]
    fn test_fixed_notification_texts() {
        let not_found = AppError::Weather(WeatherError::LocationNotFound("Atlantis".into()));
        assert_eq!(not_found.user_message(), "Location not found");
        assert_eq!(AppError::from(WeatherError::EmptyQuery).user_message(), "Enter a city");
    }

    #[test]
    fn test_outage_and_rejection_read_differently() {
        let outage = NetworkError::Status {
            status: 503,
            detail: "/v1/forecast".into(),
        };
        let rejected = NetworkError::Status {
            status: 400,
            detail: "/v1/forecast".into(),
        };
        assert!(outage.user_message().contains("later"));
        assert_ne!(outage.user_message(), rejected.user_message());
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let err = AppError::Network(NetworkError::MalformedPayload("missing hourly".into()));
        assert_eq!(err.to_string(), "network: malformed payload: missing hourly");
        assert!(!err.user_message().contains("hourly"));
    }

    #[test]
    fn test_other_is_transparent() {
        let err = AppError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "disk full");
    }
}
