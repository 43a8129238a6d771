//! Hourly forecast client for the Open-Meteo forecast API.

use std::future::Future;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::retry::{with_retry, HttpOptions, RetryPolicy};
use crate::types::{HourlySeries, Metric, WeatherError};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyPayload>,
}

#[derive(Debug, Deserialize)]
struct HourlyPayload {
    #[serde(default)]
    time: Vec<String>,
    temperature_2m: Option<Vec<Option<f64>>>,
    pressure_msl: Option<Vec<Option<f64>>>,
    wind_speed_10m: Option<Vec<Option<f64>>>,
}

/// Fetches hourly series for a coordinate pair.
pub trait ForecastSource: Send + Sync {
    fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<HourlySeries, WeatherError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl ForecastClient {
    pub fn new(endpoint: &str, options: &HttpOptions) -> Result<Self, WeatherError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| WeatherError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            client: options.build_client()?,
            endpoint,
            retry: options.retry.clone(),
        })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> Url {
        let hourly = Metric::ALL
            .iter()
            .map(Metric::api_field)
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("hourly", &hourly)
            .append_pair("wind_speed_unit", "ms")
            .append_pair("timezone", "auto");
        url
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, WeatherError> {
        let url = self.forecast_url(latitude, longitude);
        let response = with_retry(&self.retry, || self.client.get(url.clone()).send()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
                endpoint: self.endpoint.to_string(),
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(WeatherError::from_body_error)?;

        let series = parse_hourly(body, latitude, longitude)?;
        tracing::info!("Fetched {} forecast hours", series.len());
        Ok(series)
    }
}

impl ForecastSource for ForecastClient {
    async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, WeatherError> {
        ForecastClient::fetch_hourly(self, latitude, longitude).await
    }
}

fn parse_hourly(
    body: ForecastResponse,
    latitude: f64,
    longitude: f64,
) -> Result<HourlySeries, WeatherError> {
    let hourly = body
        .hourly
        .ok_or_else(|| WeatherError::InvalidResponse("missing `hourly` field".to_string()))?;

    let temperature = require(hourly.temperature_2m, Metric::Temperature)?;
    let pressure = require(hourly.pressure_msl, Metric::Pressure)?;
    let wind_speed = require(hourly.wind_speed_10m, Metric::WindSpeed)?;

    if pressure.len() != temperature.len() || wind_speed.len() != temperature.len() {
        return Err(WeatherError::InvalidResponse(format!(
            "hourly arrays differ in length ({}, {}, {})",
            temperature.len(),
            pressure.len(),
            wind_speed.len()
        )));
    }

    let time = hourly
        .time
        .iter()
        .map(|t| NaiveDateTime::parse_from_str(t, TIME_FORMAT))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| WeatherError::InvalidResponse(format!("bad hourly time: {}", e)))?;

    if !time.is_empty() && time.len() != temperature.len() {
        return Err(WeatherError::InvalidResponse(format!(
            "{} timestamps for {} hours",
            time.len(),
            temperature.len()
        )));
    }

    Ok(HourlySeries {
        latitude,
        longitude,
        time,
        temperature: filled(&temperature, Metric::Temperature)?,
        pressure: filled(&pressure, Metric::Pressure)?,
        wind_speed: filled(&wind_speed, Metric::WindSpeed)?,
    })
}

fn filled(values: &[Option<f64>], metric: Metric) -> Result<Vec<f64>, WeatherError> {
    let filled = forward_fill(values);
    if filled.len() != values.len() {
        return Err(WeatherError::InvalidResponse(format!(
            "no readings in `hourly.{}`",
            metric.api_field()
        )));
    }
    Ok(filled)
}

fn require(values: Option<Vec<Option<f64>>>, metric: Metric) -> Result<Vec<Option<f64>>, WeatherError> {
    values.ok_or_else(|| {
        WeatherError::InvalidResponse(format!("missing `hourly.{}`", metric.api_field()))
    })
}

/// Replace gaps with the previous reading; leading gaps take the first reading.
/// A series with no readings at all comes back empty.
fn forward_fill(values: &[Option<f64>]) -> Vec<f64> {
    let Some(first) = values.iter().flatten().next().copied() else {
        return Vec::new();
    };

    let mut last = first;
    values
        .iter()
        .map(|v| {
            if let Some(v) = v {
                last = *v;
            }
            last
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<HourlySeries, WeatherError> {
        let body: ForecastResponse = serde_json::from_value(value).unwrap();
        parse_hourly(body, 52.52, 13.405)
    }

    #[test]
    fn test_parse_complete_payload() {
        let series = parse(json!({
            "hourly": {
                "time": ["2026-10-19T00:00", "2026-10-19T01:00"],
                "temperature_2m": [10.0, 10.5],
                "pressure_msl": [1012.0, 1013.5],
                "wind_speed_10m": [3.0, 4.1]
            }
        }))
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.temperature, vec![10.0, 10.5]);
        assert_eq!(series.pressure, vec![1012.0, 1013.5]);
        assert_eq!(series.wind_speed, vec![3.0, 4.1]);
        assert_eq!(series.time.len(), 2);
        assert_eq!(series.latitude, 52.52);
    }

    #[test]
    fn test_missing_hourly_is_invalid() {
        let result = parse(json!({ "latitude": 52.52 }));
        assert!(matches!(result, Err(WeatherError::InvalidResponse(_))));
    }

    #[test]
    fn test_missing_metric_is_invalid() {
        let result = parse(json!({
            "hourly": { "temperature_2m": [1.0], "pressure_msl": [1000.0] }
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("wind_speed_10m"), "{}", err);
    }

    #[test]
    fn test_unequal_lengths_are_invalid() {
        let result = parse(json!({
            "hourly": {
                "temperature_2m": [1.0, 2.0],
                "pressure_msl": [1000.0],
                "wind_speed_10m": [1.0, 2.0]
            }
        }));
        assert!(matches!(result, Err(WeatherError::InvalidResponse(_))));
    }

    #[test]
    fn test_time_is_optional() {
        let series = parse(json!({
            "hourly": {
                "temperature_2m": [1.0],
                "pressure_msl": [1000.0],
                "wind_speed_10m": [2.0]
            }
        }))
        .unwrap();
        assert!(series.time.is_empty());
        assert_eq!(series.hour_label(0), None);
    }

    #[test]
    fn test_all_null_metric_is_invalid() {
        let result = parse(json!({
            "hourly": {
                "temperature_2m": [1.0, 2.0],
                "pressure_msl": [null, null],
                "wind_speed_10m": [1.0, 2.0]
            }
        }));
        assert!(matches!(result, Err(WeatherError::InvalidResponse(_))));
    }

    #[test]
    fn test_nulls_are_filled() {
        let series = parse(json!({
            "hourly": {
                "temperature_2m": [null, 2.0, null],
                "pressure_msl": [1000.0, null, 1002.0],
                "wind_speed_10m": [1.0, 2.0, 3.0]
            }
        }))
        .unwrap();
        assert_eq!(series.temperature, vec![2.0, 2.0, 2.0]);
        assert_eq!(series.pressure, vec![1000.0, 1000.0, 1002.0]);
    }

    #[test]
    fn test_forward_fill() {
        assert_eq!(
            forward_fill(&[None, Some(1.0), None, Some(3.0), None]),
            vec![1.0, 1.0, 1.0, 3.0, 3.0]
        );
        assert!(forward_fill(&[None, None]).is_empty());
        assert!(forward_fill(&[]).is_empty());
    }

    #[test]
    fn test_forecast_url_requests_all_metrics() {
        let client =
            ForecastClient::new("https://api.open-meteo.com/v1/forecast", &HttpOptions::default())
                .unwrap();
        let url = client.forecast_url(52.52, 13.405);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("latitude".to_string(), "52.52".to_string())));
        assert!(pairs.contains(&("longitude".to_string(), "13.405".to_string())));
        assert!(pairs.contains(&(
            "hourly".to_string(),
            "temperature_2m,pressure_msl,wind_speed_10m".to_string()
        )));
        assert!(pairs.contains(&("wind_speed_unit".to_string(), "ms".to_string())));
    }
}
