//! Forward geocoding: place name to candidate coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::location::{locate_with_timeout, DeviceLocator};
use crate::retry::{with_retry, HttpOptions, RetryPolicy};
use crate::types::{LocationCandidate, WeatherError};

/// Open-Meteo returns at most this many matches
const MAX_RESULTS: u32 = 100;
const DEFAULT_LOCATE_TIMEOUT_SECS: u64 = 10;
const DEVICE_LOCATION_NAME: &str = "Current location";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<LocationCandidate>>,
}

/// Resolves places to coordinates.
pub trait Geocoder: Send + Sync {
    /// Candidates for a free-text query, best match first.
    /// Zero matches is [`WeatherError::GeocodeNotFound`], never an empty list.
    fn search_by_name(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<LocationCandidate>, WeatherError>> + Send;

    /// The device position as a candidate. No network call.
    fn from_device_location(
        &self,
    ) -> impl Future<Output = Result<LocationCandidate, WeatherError>> + Send;
}

#[derive(Debug, Clone)]
pub struct GeocodeClient<L> {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
    locator: L,
    locate_timeout: Duration,
}

impl<L: DeviceLocator> GeocodeClient<L> {
    pub fn new(endpoint: &str, options: &HttpOptions, locator: L) -> Result<Self, WeatherError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| WeatherError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            client: options.build_client()?,
            endpoint,
            retry: options.retry.clone(),
            locator,
            locate_timeout: Duration::from_secs(DEFAULT_LOCATE_TIMEOUT_SECS),
        })
    }

    pub fn with_locate_timeout(mut self, timeout: Duration) -> Self {
        self.locate_timeout = timeout;
        self
    }

    fn search_url(&self, query: &str, limit: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("name", query)
            .append_pair("count", &limit.clamp(1, MAX_RESULTS).to_string())
            .append_pair("language", "en")
            .append_pair("format", "json");
        url
    }

    #[instrument(skip(self), level = "info")]
    pub async fn search_by_name(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<LocationCandidate>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::GeocodeNotFound(String::new()));
        }

        let url = self.search_url(query, limit);
        let response = with_retry(&self.retry, || self.client.get(url.clone()).send()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
                endpoint: self.endpoint.to_string(),
            });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(WeatherError::from_body_error)?;

        let candidates = body.results.unwrap_or_default();
        if candidates.is_empty() {
            tracing::debug!("No geocoding results for {:?}", query);
            return Err(WeatherError::GeocodeNotFound(query.to_string()));
        }

        tracing::debug!("Geocoded {:?} to {} candidates", query, candidates.len());
        Ok(candidates)
    }

    pub async fn from_device_location(&self) -> Result<LocationCandidate, WeatherError> {
        let location = locate_with_timeout(&self.locator, self.locate_timeout).await?;
        tracing::info!(
            "Got device location: {}, {}",
            location.latitude,
            location.longitude
        );

        Ok(LocationCandidate {
            name: DEVICE_LOCATION_NAME.to_string(),
            admin1: None,
            country: None,
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }
}

impl<L: DeviceLocator> Geocoder for GeocodeClient<L> {
    async fn search_by_name(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<LocationCandidate>, WeatherError> {
        GeocodeClient::search_by_name(self, query, limit).await
    }

    async fn from_device_location(&self) -> Result<LocationCandidate, WeatherError> {
        GeocodeClient::from_device_location(self).await
    }
}
