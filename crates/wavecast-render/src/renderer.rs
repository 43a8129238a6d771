use std::f64::consts::TAU;
use std::sync::Arc;

use wavecast_weather::{HourlySeries, Metric};

use crate::mapping::index_for_column;
use crate::params::WaveParams;
use crate::stats::SeriesStats;
use crate::surface::{StrokeStyle, Surface};

/// Undulation amplitudes as a share of surface height
const PRIMARY_SWELL: f64 = 0.06;
const SECONDARY_SWELL: f64 = 0.03;
/// Full sine cycles across the surface width
const PRIMARY_CYCLES: f64 = 2.0;
const SECONDARY_CYCLES: f64 = 5.0;
const SECONDARY_DRIFT: f64 = 1.3;

/// Read-only view of one metric of a forecast, shared by the frame loop and
/// pointer handlers.
#[derive(Debug, Clone)]
pub struct SeriesView {
    series: Arc<HourlySeries>,
    metric: Metric,
    stats: Option<SeriesStats>,
}

impl SeriesView {
    pub fn new(series: Arc<HourlySeries>, metric: Metric) -> Self {
        let stats = SeriesStats::from_values(series.values(metric));
        Self {
            series,
            metric,
            stats,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn series(&self) -> &Arc<HourlySeries> {
        &self.series
    }

    pub fn values(&self) -> &[f64] {
        self.series.values(self.metric)
    }

    /// `None` when the series is empty
    pub fn stats(&self) -> Option<SeriesStats> {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Sample under column `x`; the same lookup drawing uses.
    pub fn index_at(&self, x: f64, width: f64) -> Option<usize> {
        index_for_column(x, width, self.len())
    }

    pub fn normalized_at(&self, index: usize) -> Option<f64> {
        let value = *self.values().get(index)?;
        Some(self.stats?.normalize(value))
    }
}

/// Per-loop mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub phase: f64,
    pub min: f64,
    pub max: f64,
    pub hue: f64,
    pub speed: f64,
}

/// One metric's animated waveform.
#[derive(Debug, Clone)]
pub struct SeriesRenderer {
    view: Arc<SeriesView>,
    state: RenderState,
    strength: f64,
}

impl SeriesRenderer {
    pub fn new(view: Arc<SeriesView>, latitude: f64) -> Self {
        let params = WaveParams::new(view.metric(), latitude);
        let (min, max) = view
            .stats()
            .map(|s| (s.min, s.max))
            .unwrap_or((0.0, 0.0));

        Self {
            view,
            state: RenderState {
                phase: 0.0,
                min,
                max,
                hue: params.hue,
                speed: params.speed,
            },
            strength: params.strength,
        }
    }

    pub fn view(&self) -> &Arc<SeriesView> {
        &self.view
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Path for the current phase: one point per whole column in `[0, width]`.
    pub fn frame_points(&self, width: f64, height: f64) -> Vec<(f64, f64)> {
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return Vec::new();
        }

        let mid = height / 2.0;
        let values = self.view.values();
        let stats = self.view.stats();
        let columns = width.floor() as usize;

        (0..=columns)
            .map(|column| {
                let x = column as f64;
                let y = match (self.view.index_at(x, width), stats) {
                    (Some(i), Some(stats)) => {
                        let norm = stats.normalize(values[i]);
                        let data = (norm - 0.5) * self.strength * height;
                        let swell = undulation(x / width, self.state.phase) * height;
                        (mid - data + swell).clamp(0.0, height)
                    }
                    // nothing to draw: flat line
                    _ => mid,
                };
                (x, y)
            })
            .collect()
    }

    /// Draw one frame and advance the phase.
    pub fn draw_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (width, height) = surface.size();
        let points = self.frame_points(width, height);

        surface.clear();
        if let Some(((x0, y0), rest)) = points.split_first() {
            surface.begin_path();
            surface.move_to(*x0, *y0);
            for (x, y) in rest {
                surface.line_to(*x, *y);
            }
            surface.stroke(&StrokeStyle::from_hue(self.state.hue));
        }

        self.state.phase += self.state.speed;
    }
}

/// Data-independent swell at horizontal fraction `u` and phase `t`.
fn undulation(u: f64, t: f64) -> f64 {
    PRIMARY_SWELL * (TAU * PRIMARY_CYCLES * u + t).sin()
        + SECONDARY_SWELL * (TAU * SECONDARY_CYCLES * u - SECONDARY_DRIFT * t).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn series(temperature: Vec<f64>) -> Arc<HourlySeries> {
        let len = temperature.len();
        Arc::new(HourlySeries {
            latitude: 52.52,
            longitude: 13.405,
            time: Vec::new(),
            temperature,
            pressure: vec![1013.0; len],
            wind_speed: vec![3.0; len],
        })
    }

    fn renderer(temperature: Vec<f64>, metric: Metric) -> SeriesRenderer {
        SeriesRenderer::new(Arc::new(SeriesView::new(series(temperature), metric)), 52.52)
    }

    #[test]
    fn test_berlin_temperature_stats() {
        let r = renderer(vec![10.0, 10.5, 11.0, 10.8, 10.1], Metric::Temperature);
        let state = r.state();
        assert_eq!(state.min, 10.0);
        assert_eq!(state.max, 11.0);
    }

    #[test]
    fn test_frames_never_panic_and_stay_on_surface() {
        let mut r = renderer(vec![10.0, 10.5, 11.0], Metric::Temperature);
        let mut surface = RecordingSurface::new(300.0, 80.0);
        for _ in 0..500 {
            r.draw_frame(&mut surface);
            for (_, y) in surface.path_points() {
                assert!((0.0..=80.0).contains(&y));
            }
        }
        assert_eq!(surface.frames(), 500);
    }

    #[test]
    fn test_one_point_per_column_and_one_stroke() {
        let mut r = renderer(vec![1.0, 2.0], Metric::Temperature);
        let mut surface = RecordingSurface::new(100.0, 50.0);
        r.draw_frame(&mut surface);

        let points = surface.path_points();
        assert_eq!(points.len(), 101);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[100].0, 100.0);
        assert_eq!(surface.stroke_count(), 1);
        assert!(matches!(surface.commands()[2], DrawCommand::MoveTo(..)));
    }

    #[test]
    fn test_phase_advances_by_speed() {
        let mut r = renderer(vec![1.0, 2.0], Metric::Temperature);
        let speed = r.state().speed;
        let mut surface = RecordingSurface::new(10.0, 10.0);
        r.draw_frame(&mut surface);
        r.draw_frame(&mut surface);
        assert!((r.state().phase - 2.0 * speed).abs() < 1e-12);
    }

    #[test]
    fn test_animation_changes_the_curve() {
        let mut r = renderer(vec![1.0, 2.0, 3.0], Metric::Temperature);
        let before = r.frame_points(100.0, 50.0);
        let mut surface = RecordingSurface::new(100.0, 50.0);
        for _ in 0..10 {
            r.draw_frame(&mut surface);
        }
        assert_ne!(before, r.frame_points(100.0, 50.0));
    }

    #[test]
    fn test_higher_values_draw_higher() {
        let r = renderer(vec![0.0, 100.0], Metric::Temperature);
        let points = r.frame_points(100.0, 100.0);
        // both columns sit where the swell is zero
        let low = points[0].1;
        let high = points[50].1;
        assert!(high < low, "high value should have smaller y: {} vs {}", high, low);
    }

    #[test]
    fn test_empty_series_draws_flat_line() {
        let mut r = renderer(Vec::new(), Metric::Temperature);
        assert_eq!(r.state().min, 0.0);
        let mut surface = RecordingSurface::new(20.0, 10.0);
        r.draw_frame(&mut surface);
        assert!(surface.path_points().iter().all(|(_, y)| *y == 5.0));
    }

    #[test]
    fn test_constant_series_is_finite() {
        let r = renderer(vec![10.0, 10.5], Metric::Pressure);
        assert_eq!(r.state().min, r.state().max);
        assert!(r
            .frame_points(64.0, 32.0)
            .iter()
            .all(|(_, y)| y.is_finite()));
    }

    #[test]
    fn test_zero_sized_surface_draws_nothing() {
        let mut r = renderer(vec![1.0], Metric::Temperature);
        let mut surface = RecordingSurface::new(0.0, 10.0);
        r.draw_frame(&mut surface);
        assert!(surface.path_points().is_empty());
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_normalized_values_in_unit_range() {
        let view = SeriesView::new(series(vec![-4.0, 0.0, 3.3, 9.9]), Metric::Temperature);
        for i in 0..view.len() {
            let n = view.normalized_at(i).unwrap();
            assert!((0.0..=1.0).contains(&n));
        }
        assert_eq!(view.normalized_at(4), None);
    }
}
