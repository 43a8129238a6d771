//! Maps weather client errors onto `wavecast_core::AppError` for user-facing messages.

use wavecast_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
use wavecast_weather::WeatherError;

pub trait WeatherErrorExt {
    fn into_app_error(self) -> AppError;
}

impl WeatherErrorExt for WeatherError {
    fn into_app_error(self) -> AppError {
        match self {
            WeatherError::LocationUnavailable(e) => AppError::Weather(
                wavecast_core::WeatherError::LocationUnavailable(e.to_string()),
            ),
            WeatherError::GeocodeNotFound(query) => {
                AppError::Weather(wavecast_core::WeatherError::LocationNotFound(query))
            }
            WeatherError::Network(e) => AppError::Network(e.into_network_error()),
            WeatherError::Http { status, endpoint } => AppError::Network(NetworkError::Status {
                status,
                detail: endpoint,
            }),
            WeatherError::InvalidResponse(detail) => {
                AppError::Network(NetworkError::MalformedPayload(detail))
            }
            WeatherError::InvalidEndpoint(detail) => AppError::Config(ConfigError::Invalid(detail)),
        }
    }
}
