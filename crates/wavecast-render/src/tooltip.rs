//! Pointer value lookups.

use crate::renderer::SeriesView;

/// Offset of the label from the pointer, in drawing units
const POINTER_OFFSET_X: f64 = 12.0;
const POINTER_OFFSET_Y: f64 = -12.0;

/// Floating value label for the sample under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub index: usize,
    pub value: f64,
    /// Value at one decimal place with its unit, e.g. "10.5 °C"
    pub text: String,
    /// Forecast hour of the sample, when known
    pub hour: Option<String>,
    pub x: f64,
    pub y: f64,
}

impl SeriesView {
    /// Label for a pointer at `(x, y)` on a `width` × `height` surface.
    ///
    /// Uses [`SeriesView::index_at`], so the value shown is always a point on the
    /// drawn curve. `None` for an empty series.
    pub fn tooltip_at(&self, x: f64, y: f64, width: f64, height: f64) -> Option<Tooltip> {
        let index = self.index_at(x, width)?;
        let value = *self.values().get(index)?;

        Some(Tooltip {
            index,
            value,
            text: format!("{:.1} {}", value, self.metric().unit()),
            hour: self.series().hour_label(index),
            x: (x + POINTER_OFFSET_X).clamp(0.0, width),
            y: (y + POINTER_OFFSET_Y).clamp(0.0, height.max(0.0)),
        })
    }
}
