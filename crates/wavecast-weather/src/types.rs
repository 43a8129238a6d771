use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A geocoded place returned by a name search, or the device position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    /// Suggestion row text, e.g. "Berlin, Land Berlin, Germany".
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        for part in [&self.admin1, &self.country].into_iter().flatten() {
            if !part.is_empty() && part != &self.name {
                parts.push(part);
            }
        }
        parts.join(", ")
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw device position as reported by a platform locator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
}

/// The three forecast variables the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Pressure,
    WindSpeed,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Pressure, Metric::WindSpeed];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Pressure => "Pressure",
            Self::WindSpeed => "Wind speed",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Pressure => "hPa",
            Self::WindSpeed => "m/s",
        }
    }

    /// Open-Meteo hourly variable name
    pub fn api_field(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature_2m",
            Self::Pressure => "pressure_msl",
            Self::WindSpeed => "wind_speed_10m",
        }
    }
}

/// One forecast fetch: co-indexed hourly values for every metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub latitude: f64,
    pub longitude: f64,
    /// Local hour timestamps; empty when the API omitted them
    pub time: Vec<NaiveDateTime>,
    pub temperature: Vec<f64>,
    pub pressure: Vec<f64>,
    pub wind_speed: Vec<f64>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    pub fn values(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Pressure => &self.pressure,
            Metric::WindSpeed => &self.wind_speed,
        }
    }

    /// "Mon 14:00" for hour `index`, when timestamps are known.
    pub fn hour_label(&self, index: usize) -> Option<String> {
        self.time
            .get(index)
            .map(|t| t.format("%a %H:%M").to_string())
    }
}

/// Device location errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Geocoding and forecast errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),
    #[error("No location matches \"{0}\"")]
    GeocodeNotFound(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

impl WeatherError {
    /// Classify a failure while reading a response body. Only payloads that
    /// arrived but could not be decoded are invalid; everything else is transport.
    pub(crate) fn from_body_error(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else {
            Self::Network(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> LocationCandidate {
        LocationCandidate {
            name: "Berlin".to_string(),
            admin1: Some("Land Berlin".to_string()),
            country: Some("Germany".to_string()),
            latitude: 52.52,
            longitude: 13.405,
        }
    }

    #[test]
    fn test_label_joins_present_parts() {
        assert_eq!(berlin().label(), "Berlin, Land Berlin, Germany");
    }

    #[test]
    fn test_label_skips_missing_and_duplicate_parts() {
        let mut candidate = berlin();
        candidate.admin1 = Some("Berlin".to_string());
        candidate.country = None;
        assert_eq!(candidate.label(), "Berlin");
    }

    #[test]
    fn test_metric_units() {
        assert_eq!(Metric::Temperature.unit(), "°C");
        assert_eq!(Metric::Pressure.unit(), "hPa");
        assert_eq!(Metric::WindSpeed.unit(), "m/s");
    }

    #[test]
    fn test_values_selects_metric() {
        let series = HourlySeries {
            temperature: vec![1.0],
            pressure: vec![1013.0],
            wind_speed: vec![3.5],
            ..Default::default()
        };
        assert_eq!(series.values(Metric::Pressure), &[1013.0]);
        assert_eq!(series.values(Metric::WindSpeed), &[3.5]);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_hour_label() {
        let t = NaiveDateTime::parse_from_str("2026-10-19T14:00", "%Y-%m-%dT%H:%M").unwrap();
        let series = HourlySeries {
            time: vec![t],
            temperature: vec![1.0],
            ..Default::default()
        };
        assert_eq!(series.hour_label(0).as_deref(), Some("Mon 14:00"));
        assert_eq!(series.hour_label(1), None);
    }
}
