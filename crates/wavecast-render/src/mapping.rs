//! Column-to-sample mapping shared by drawing and pointer lookups.

/// Series index drawn at horizontal offset `x` on a surface `width` wide.
///
/// Nearest-neighbor: `floor(x / width * len)`, clamped so `x == width` lands on
/// the last sample. `None` for an empty series or a zero-width surface.
pub fn index_for_column(x: f64, width: f64, len: usize) -> Option<usize> {
    if len == 0 || width.is_nan() || width <= 0.0 || !x.is_finite() {
        return None;
    }

    let fraction = x.clamp(0.0, width) / width;
    let index = (fraction * len as f64).floor() as usize;
    Some(index.min(len - 1))
}
