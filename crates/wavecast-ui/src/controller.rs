//! Dashboard controller.
//!
//! Owns the user-visible state (suggestions, selection, panels, insights,
//! theme, loading indicator) and wires the triggers to the geocoder and the
//! forecast source. Every trigger takes `&self` so overlapping calls can run
//! concurrently; only the latest search may publish suggestions and only the
//! latest analysis may draw the panels.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::instrument;
use wavecast_core::{AppError, Config};
use wavecast_render::Surface;
use wavecast_weather::{
    Coordinates, ForecastSource, Geocoder, HourlySeries, Insights, LocationCandidate, Metric,
    WeatherError,
};

use crate::epoch::SearchEpoch;
use crate::error_mapping::WeatherErrorExt;
use crate::loading::LoadingIndicator;
use crate::notifier::Notifier;
use crate::panel::MetricPanel;
use crate::theme::{Theme, ThemeState};

const SPINNER_INTERVAL_MS: u64 = 80;

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Suggestions requested per keystroke
    pub suggestion_count: u32,
    pub frame_interval: Duration,
    pub spinner_interval: Duration,
    pub theme: Theme,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            suggestion_count: 5,
            frame_interval: Duration::from_millis(16),
            spinner_interval: Duration::from_millis(SPINNER_INTERVAL_MS),
            theme: Theme::Light,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            suggestion_count: config.api.suggestion_count,
            frame_interval: Duration::from_millis(config.render.frame_interval_ms),
            spinner_interval: Duration::from_millis(SPINNER_INTERVAL_MS),
            theme: Theme::resolve(config.ui.theme),
        }
    }
}

/// Result of a type-to-search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Suggestions replaced with this many candidates
    Applied(usize),
    /// No place matched; suggestions cleared
    NoMatches,
    /// A newer search started while this one was in flight; response dropped
    Stale,
    /// Request failed; suggestions cleared and the failure logged
    Failed,
}

/// Result of an analysis trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Panels now show a forecast of this many hours
    Rendered { hours: usize },
    /// No coordinates to analyze; the user was told why
    NoLocation,
    /// The forecast could not be fetched; the previous forecast stays on screen
    Failed,
    /// A newer analysis started while this one was in flight; result dropped
    Superseded,
}

#[derive(Debug, Default)]
struct Suggestions {
    query: String,
    candidates: Vec<LocationCandidate>,
}

pub struct DashboardController<G, F, N, S> {
    geocoder: G,
    forecast: F,
    notifier: N,
    settings: ControllerSettings,
    epoch: SearchEpoch,
    analyses: SearchEpoch,
    // held while panels, insights and series are replaced together
    apply_lock: Mutex<()>,
    suggestions: RwLock<Suggestions>,
    selected: RwLock<Option<LocationCandidate>>,
    series: RwLock<Option<Arc<HourlySeries>>>,
    insights: RwLock<Option<Insights>>,
    panels: Vec<MetricPanel<S>>,
    loading: LoadingIndicator,
    theme: ThemeState,
}

impl<G, F, N, S> DashboardController<G, F, N, S>
where
    G: Geocoder,
    F: ForecastSource,
    N: Notifier,
    S: Surface + 'static,
{
    /// `make_surface` is called once per metric, in [`Metric::ALL`] order.
    pub fn new(
        geocoder: G,
        forecast: F,
        notifier: N,
        settings: ControllerSettings,
        mut make_surface: impl FnMut(Metric) -> S,
    ) -> Self {
        let panels = Metric::ALL
            .into_iter()
            .map(|metric| MetricPanel::new(metric, make_surface(metric)))
            .collect();

        Self {
            geocoder,
            forecast,
            notifier,
            loading: LoadingIndicator::new(settings.spinner_interval),
            theme: ThemeState::new(settings.theme),
            settings,
            epoch: SearchEpoch::new(),
            analyses: SearchEpoch::new(),
            apply_lock: Mutex::new(()),
            suggestions: RwLock::new(Suggestions::default()),
            selected: RwLock::new(None),
            series: RwLock::new(None),
            insights: RwLock::new(None),
            panels,
        }
    }

    // --- triggers ---

    /// "Use my location": resolve the device position, select it and analyze.
    #[instrument(skip(self), level = "info")]
    pub async fn geolocate(&self) -> AnalysisOutcome {
        match self.geocoder.from_device_location().await {
            Ok(candidate) => {
                let coordinates = candidate.coordinates();
                *self.selected.write() = Some(candidate);
                self.analyze_at(coordinates).await
            }
            Err(e) => {
                self.report(e.into_app_error());
                AnalysisOutcome::NoLocation
            }
        }
    }

    /// Type-to-search. Overlapping calls resolve in any order; only the most
    /// recently started one may replace the suggestions.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let epoch = self.epoch.advance();
        let result = self
            .geocoder
            .search_by_name(query, self.settings.suggestion_count)
            .await;

        let mut suggestions = self.suggestions.write();
        // checked under the lock: a newer search cannot have published yet
        if !self.epoch.is_current(epoch) {
            tracing::debug!("Dropping stale suggestions for {:?}", query);
            return SearchOutcome::Stale;
        }

        suggestions.query = query.to_string();
        match result {
            Ok(candidates) => {
                let count = candidates.len();
                suggestions.candidates = candidates;
                SearchOutcome::Applied(count)
            }
            Err(WeatherError::GeocodeNotFound(_)) => {
                suggestions.candidates.clear();
                SearchOutcome::NoMatches
            }
            Err(e) => {
                tracing::warn!("Suggestion lookup failed for {:?}: {}", query, e);
                suggestions.candidates.clear();
                SearchOutcome::Failed
            }
        }
    }

    /// Commit the suggestion at `index`. Clears the suggestion list.
    pub fn select(&self, index: usize) -> Option<LocationCandidate> {
        let candidate = {
            let mut suggestions = self.suggestions.write();
            let candidate = suggestions.candidates.get(index).cloned()?;
            suggestions.candidates.clear();
            candidate
        };
        tracing::info!("Selected {}", candidate.label());
        *self.selected.write() = Some(candidate.clone());
        Some(candidate)
    }

    /// Fetch and draw the forecast for the selected location.
    pub async fn analyze(&self) -> AnalysisOutcome {
        let coordinates = self.selected.read().as_ref().map(LocationCandidate::coordinates);
        match coordinates {
            Some(coordinates) => self.analyze_at(coordinates).await,
            None => {
                self.report(wavecast_core::WeatherError::NoLocationSelected.into());
                AnalysisOutcome::NoLocation
            }
        }
    }

    /// Resolve `query` to its best match and analyze it in one step.
    #[instrument(skip(self), level = "info")]
    pub async fn search_and_analyze(&self, query: &str) -> AnalysisOutcome {
        let query = query.trim();
        if query.is_empty() {
            self.report(wavecast_core::WeatherError::EmptyQuery.into());
            return AnalysisOutcome::NoLocation;
        }

        let candidate = match self.geocoder.search_by_name(query, 1).await {
            Ok(candidates) => candidates.into_iter().next(),
            Err(WeatherError::GeocodeNotFound(_)) => None,
            Err(e) => {
                self.report(e.into_app_error());
                return AnalysisOutcome::NoLocation;
            }
        };

        let Some(candidate) = candidate else {
            self.report(wavecast_core::WeatherError::LocationNotFound(query.to_string()).into());
            return AnalysisOutcome::NoLocation;
        };

        let coordinates = candidate.coordinates();
        *self.selected.write() = Some(candidate);
        self.analyze_at(coordinates).await
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme.toggle();
        tracing::debug!("Theme switched to {}", theme.as_str());
        theme
    }

    /// Collapse or expand a panel; returns whether it is now expanded.
    pub fn toggle_panel(&self, metric: Metric) -> bool {
        self.panel(metric).is_some_and(MetricPanel::toggle)
    }

    /// Stop every animation loop and the loading indicator.
    pub async fn shutdown(&self) {
        self.loading.reset();
        for panel in &self.panels {
            panel.stop().await;
        }
        tracing::info!("Dashboard shut down");
    }

    // --- state ---

    pub fn suggestions(&self) -> Vec<LocationCandidate> {
        self.suggestions.read().candidates.clone()
    }

    /// Query the current suggestions belong to
    pub fn suggestion_query(&self) -> String {
        self.suggestions.read().query.clone()
    }

    pub fn selected(&self) -> Option<LocationCandidate> {
        self.selected.read().clone()
    }

    pub fn series(&self) -> Option<Arc<HourlySeries>> {
        self.series.read().clone()
    }

    pub fn insights(&self) -> Option<Insights> {
        self.insights.read().clone()
    }

    pub fn panels(&self) -> &[MetricPanel<S>] {
        &self.panels
    }

    pub fn panel(&self, metric: Metric) -> Option<&MetricPanel<S>> {
        self.panels.iter().find(|p| p.metric() == metric)
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    // --- internals ---

    #[instrument(skip(self), level = "info")]
    async fn analyze_at(&self, coordinates: Coordinates) -> AnalysisOutcome {
        let analysis = self.analyses.advance();
        let result = {
            let _loading = self.loading.begin();
            self.forecast
                .fetch_hourly(coordinates.latitude, coordinates.longitude)
                .await
        };

        match result {
            Ok(series) => {
                let hours = series.len();
                if !self.apply(analysis, Arc::new(series)) {
                    tracing::debug!("Dropping superseded forecast for {:?}", coordinates);
                    return AnalysisOutcome::Superseded;
                }
                tracing::info!("Rendered {} forecast hours", hours);
                AnalysisOutcome::Rendered { hours }
            }
            Err(e) if !self.analyses.is_current(analysis) => {
                tracing::debug!("Superseded forecast fetch failed: {}", e);
                AnalysisOutcome::Superseded
            }
            Err(e) => {
                self.report(e.into_app_error());
                AnalysisOutcome::Failed
            }
        }
    }

    /// Publish `series` to every panel, the insights and the series slot.
    /// Returns false without touching anything when `analysis` is stale.
    fn apply(&self, analysis: u64, series: Arc<HourlySeries>) -> bool {
        let _apply = self.apply_lock.lock();
        if !self.analyses.is_current(analysis) {
            return false;
        }
        for panel in &self.panels {
            panel.show_series(series.clone(), self.settings.frame_interval);
        }
        *self.insights.write() = Insights::from_series(&series);
        *self.series.write() = Some(series);
        true
    }

    fn report(&self, error: AppError) {
        tracing::error!("{}", error);
        self.notifier.notify(error.user_message());
    }
}
