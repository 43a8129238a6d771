//! Dashboard controller: wires location search, forecast fetches and the
//! per-metric waveform panels together.

pub mod controller;
pub mod epoch;
pub mod error_mapping;
pub mod loading;
pub mod notifier;
pub mod panel;
pub mod theme;

pub use controller::{AnalysisOutcome, ControllerSettings, DashboardController, SearchOutcome};
pub use epoch::SearchEpoch;
pub use error_mapping::WeatherErrorExt;
pub use loading::{LoadingGuard, LoadingIndicator};
pub use notifier::Notifier;
pub use panel::MetricPanel;
pub use theme::{Theme, ThemeState};
