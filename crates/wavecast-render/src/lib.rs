//! Animated waveform rendering for hourly forecast series.
//!
//! A [`SeriesRenderer`] turns one metric of an [`HourlySeries`] into a line that
//! undulates over time; an [`AnimationHandle`] owns the frame loop that drives it.
//!
//! [`HourlySeries`]: wavecast_weather::HourlySeries

pub mod animation;
pub mod mapping;
pub mod params;
pub mod renderer;
pub mod stats;
pub mod surface;
pub mod tooltip;

pub use animation::{AnimationHandle, LoopState};
pub use mapping::index_for_column;
pub use params::{hue_for_latitude, speed_for_latitude, WaveParams};
pub use renderer::{RenderState, SeriesRenderer, SeriesView};
pub use stats::SeriesStats;
pub use surface::{DrawCommand, RecordingSurface, StrokeStyle, Surface, TextSurface};
pub use tooltip::Tooltip;
