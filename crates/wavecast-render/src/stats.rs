/// Min/max of one series, computed once per renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Self { min, max })
    }

    /// Denominator for normalization; a flat series divides by 1.
    pub fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            range
        } else {
            1.0
        }
    }

    /// `value` rescaled into `[0, 1]`. A constant series normalizes to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / self.range()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let stats = SeriesStats::from_values(&[10.5, 10.0, 11.0, 10.2]).unwrap();
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 11.0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(SeriesStats::from_values(&[]), None);
    }

    #[test]
    fn test_normalized_values_stay_in_unit_range() {
        let values = [-3.0, 0.0, 7.5, 2.25, 12.0];
        let stats = SeriesStats::from_values(&values).unwrap();
        for v in values {
            let n = stats.normalize(v);
            assert!((0.0..=1.0).contains(&n), "{} normalized to {}", v, n);
        }
        assert_eq!(stats.normalize(-3.0), 0.0);
        assert_eq!(stats.normalize(12.0), 1.0);
    }

    #[test]
    fn test_constant_series_does_not_divide_by_zero() {
        let stats = SeriesStats::from_values(&[1013.0; 24]).unwrap();
        assert_eq!(stats.range(), 1.0);
        assert_eq!(stats.normalize(1013.0), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = SeriesStats::from_values(&[4.2]).unwrap();
        assert_eq!(stats.min, stats.max);
        assert!(stats.normalize(4.2).is_finite());
    }
}
