//! Weather data for Wavecast
//!
//! Open-Meteo geocoding and hourly forecast clients, device location, and the
//! plain-language insights shown next to the waveforms.

pub mod forecast;
pub mod geocode;
pub mod insight;
pub mod location;
pub mod retry;
pub mod types;

pub use forecast::{ForecastClient, ForecastSource};
pub use geocode::{GeocodeClient, Geocoder};
pub use insight::Insights;
pub use location::{ConfiguredLocator, DeviceLocator};
pub use retry::{HttpOptions, RetryPolicy};
pub use types::*;
