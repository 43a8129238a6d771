//! Latitude-derived animation parameters.
//!
//! Pace and color are pure functions of the query latitude so the same place
//! always animates the same way.

use wavecast_weather::Metric;

/// Phase advance per frame at the equator
pub const BASE_SPEED: f64 = 0.02;
/// Degrees of latitude per extra unit of phase speed
pub const SPEED_SCALE: f64 = 1500.0;
pub const BASE_HUE: f64 = 210.0;
pub const HUE_PER_DEGREE: f64 = 0.3;

pub fn speed_for_latitude(latitude: f64) -> f64 {
    BASE_SPEED + latitude.abs() / SPEED_SCALE
}

/// Stroke hue in degrees, wrapped into `[0, 360)`.
pub fn hue_for_latitude(latitude: f64) -> f64 {
    (BASE_HUE + latitude * HUE_PER_DEGREE).rem_euclid(360.0)
}

/// Everything a renderer needs besides the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub hue: f64,
    pub speed: f64,
    /// Share of the surface height the data may swing across
    pub strength: f64,
}

impl WaveParams {
    pub fn new(metric: Metric, latitude: f64) -> Self {
        Self {
            hue: hue_for_latitude(latitude),
            speed: speed_for_latitude(latitude),
            strength: strength_for(metric),
        }
    }
}

fn strength_for(metric: Metric) -> f64 {
    match metric {
        Metric::Temperature => 0.6,
        Metric::Pressure => 0.4,
        Metric::WindSpeed => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_are_deterministic() {
        assert_eq!(speed_for_latitude(52.52), speed_for_latitude(52.52));
        assert_eq!(hue_for_latitude(52.52), hue_for_latitude(52.52));
        assert_eq!(
            WaveParams::new(Metric::Pressure, 52.52),
            WaveParams::new(Metric::Pressure, 52.52)
        );
    }

    #[test]
    fn test_speed_grows_with_distance_from_equator() {
        assert_eq!(speed_for_latitude(0.0), BASE_SPEED);
        assert!(speed_for_latitude(60.0) > speed_for_latitude(30.0));
        assert_eq!(speed_for_latitude(-45.0), speed_for_latitude(45.0));
    }

    #[test]
    fn test_hue_shifts_with_latitude() {
        assert_eq!(hue_for_latitude(0.0), 210.0);
        assert!((hue_for_latitude(52.52) - 225.756).abs() < 1e-9);
        assert!((hue_for_latitude(-90.0) - 183.0).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_share_latitude_parameters() {
        let temperature = WaveParams::new(Metric::Temperature, 10.0);
        let wind = WaveParams::new(Metric::WindSpeed, 10.0);
        assert_eq!(temperature.hue, wind.hue);
        assert_eq!(temperature.speed, wind.speed);
        assert_ne!(temperature.strength, wind.strength);
    }
}
