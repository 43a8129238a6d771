//! One collapsible metric panel: a surface, its animation loop and tooltip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use wavecast_render::{AnimationHandle, LoopState, SeriesRenderer, SeriesView, Surface, Tooltip};
use wavecast_weather::{HourlySeries, Metric};

pub struct MetricPanel<S> {
    metric: Metric,
    surface: Arc<Mutex<S>>,
    animation: Mutex<Option<AnimationHandle>>,
    view: RwLock<Option<Arc<SeriesView>>>,
    tooltip: RwLock<Option<Tooltip>>,
    expanded: AtomicBool,
}

impl<S: Surface + 'static> MetricPanel<S> {
    pub fn new(metric: Metric, surface: S) -> Self {
        Self {
            metric,
            surface: Arc::new(Mutex::new(surface)),
            animation: Mutex::new(None),
            view: RwLock::new(None),
            tooltip: RwLock::new(None),
            expanded: AtomicBool::new(true),
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn surface(&self) -> &Arc<Mutex<S>> {
        &self.surface
    }

    /// Replace the displayed series. The previous loop is stopped before the
    /// new one starts, so at most one loop draws to this surface.
    pub fn show_series(&self, series: Arc<HourlySeries>, interval: Duration) {
        let latitude = series.latitude;
        let view = Arc::new(SeriesView::new(series, self.metric));
        let renderer = SeriesRenderer::new(view.clone(), latitude);

        let mut animation = self.animation.lock();
        if let Some(previous) = animation.take() {
            previous.stop();
        }
        *self.view.write() = Some(view);
        *self.tooltip.write() = None;
        *animation = Some(AnimationHandle::spawn(
            renderer,
            self.surface.clone(),
            interval,
        ));
        tracing::debug!("{} panel showing {} hours", self.metric.label(), self.len());
    }

    pub fn view(&self) -> Option<Arc<SeriesView>> {
        self.view.read().clone()
    }

    fn len(&self) -> usize {
        self.view.read().as_ref().map_or(0, |v| v.len())
    }

    /// Pointer moved to `(x, y)` on the surface.
    pub fn pointer_move(&self, x: f64, y: f64) -> Option<Tooltip> {
        let view = self.view()?;
        let (width, height) = self.surface.lock().size();
        let tooltip = view.tooltip_at(x, y, width, height);
        *self.tooltip.write() = tooltip.clone();
        tooltip
    }

    pub fn pointer_leave(&self) {
        *self.tooltip.write() = None;
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        self.tooltip.read().clone()
    }

    /// Collapse or expand; returns the new state.
    pub fn toggle(&self) -> bool {
        !self.expanded.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.load(Ordering::Acquire)
    }

    pub fn animation_state(&self) -> LoopState {
        self.animation
            .lock()
            .as_ref()
            .map_or(LoopState::Stopped, AnimationHandle::state)
    }

    pub fn frames_drawn(&self) -> u64 {
        self.animation
            .lock()
            .as_ref()
            .map_or(0, AnimationHandle::frames_drawn)
    }

    /// Stop the loop and wait for it to exit. The last frame stays on the surface.
    pub async fn stop(&self) {
        let handle = self.animation.lock().take();
        if let Some(handle) = handle {
            handle.shutdown().await;
        }
    }
}
