//! Device location.
//!
//! Platforms plug in through [`DeviceLocator`]. The shipped locator reports the
//! coordinates from the user's configuration.

use std::future::Future;
use std::time::Duration;

use crate::types::{Location, LocationError};

/// Source of the device position. `locate` may suspend until a fix arrives.
pub trait DeviceLocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Location, LocationError>> + Send;
}

/// Locator backed by fixed, configured coordinates.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocator {
    coordinates: Option<(f64, f64)>,
}

impl ConfiguredLocator {
    pub fn new(coordinates: Option<(f64, f64)>) -> Self {
        Self { coordinates }
    }

    pub fn is_available(&self) -> bool {
        self.coordinates.is_some()
    }
}

impl DeviceLocator for ConfiguredLocator {
    async fn locate(&self) -> Result<Location, LocationError> {
        let (latitude, longitude) = self.coordinates.ok_or(LocationError::ServiceUnavailable)?;
        Ok(Location {
            latitude,
            longitude,
            accuracy_meters: None,
        })
    }
}

/// Wait for a fix, turning a slow locator into [`LocationError::Timeout`].
pub async fn locate_with_timeout<L: DeviceLocator>(
    locator: &L,
    timeout: Duration,
) -> Result<Location, LocationError> {
    match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("No location fix within {:?}", timeout);
            Err(LocationError::Timeout)
        }
    }
}
