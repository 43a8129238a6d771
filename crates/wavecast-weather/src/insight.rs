//! Plain-language notes shown beside the waveforms, based on the first forecast hour.

use serde::Serialize;

use crate::types::HourlySeries;

/// Sea-level pressure separating "unsettled" from "stable" readings, in hPa
pub const STANDARD_PRESSURE_HPA: f64 = 1013.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub surface: String,
    pub pressure: String,
    pub wind: String,
    pub context: String,
}

impl Insights {
    /// `None` for an empty forecast.
    pub fn from_series(series: &HourlySeries) -> Option<Self> {
        let temperature = *series.temperature.first()?;
        let pressure = *series.pressure.first()?;
        let wind = *series.wind_speed.first()?;
        let low_pressure = pressure < STANDARD_PRESSURE_HPA;

        let pressure_note = if low_pressure {
            "Lower pressure often supports rising air and unsettled weather."
        } else {
            "Higher pressure usually indicates stable atmospheric conditions."
        };

        let driver = if low_pressure {
            "a lower-pressure system encouraging motion"
        } else {
            "stable pressure suppressing large-scale motion"
        };

        Some(Self {
            surface: format!(
                "Temperature is {:.1}°C. This describes the immediate conditions at ground level.",
                temperature
            ),
            pressure: format!("Sea-level pressure is {:.1} hPa. {}", pressure, pressure_note),
            wind: format!(
                "Wind speed is {:.1} m/s. Wind reflects horizontal air movement driven by pressure differences.",
                wind
            ),
            context: format!(
                "Today's weather is shaped primarily by {}. This connects surface conditions to larger atmospheric behavior.",
                driver
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pressure: f64) -> HourlySeries {
        HourlySeries {
            temperature: vec![12.34, 13.0],
            pressure: vec![pressure, 1020.0],
            wind_speed: vec![4.0, 5.0],
            ..Default::default()
        }
    }

    #[test]
    fn test_low_pressure_reads_unsettled() {
        let insights = Insights::from_series(&series(1005.0)).unwrap();
        assert!(insights.pressure.contains("unsettled"));
        assert!(insights.context.contains("lower-pressure"));
    }

    #[test]
    fn test_standard_pressure_reads_stable() {
        let insights = Insights::from_series(&series(1013.0)).unwrap();
        assert!(insights.pressure.contains("stable"));
        assert!(insights.context.contains("stable pressure"));
    }

    #[test]
    fn test_uses_first_hour_only() {
        let insights = Insights::from_series(&series(1005.0)).unwrap();
        assert!(insights.surface.contains("12.3°C"));
        assert!(insights.wind.contains("4.0 m/s"));
    }

    #[test]
    fn test_empty_series_has_no_insights() {
        assert_eq!(Insights::from_series(&HourlySeries::default()), None);
    }
}
