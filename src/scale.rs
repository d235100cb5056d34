use crate::types::Scale;

/// Smallest value passed to `log2`; raw densities below it (including 0) are
/// clamped so log-scaled output is always finite.
pub const LOG_FLOOR: f64 = 1e-9;

impl Scale {
    /// Rescale a single raw density
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            Scale::Linear => raw,
            Scale::Log => raw.max(LOG_FLOOR).log2(),
        }
    }

    pub fn apply_all(&self, raw: Vec<f64>) -> Vec<f64> {
        match self {
            Scale::Linear => raw,
            Scale::Log => raw.into_iter().map(|v| self.apply(v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_identity() {
        assert_eq!(Scale::Linear.apply_all(vec![0.0, 25.0, 33.5]), vec![0.0, 25.0, 33.5]);
    }

    #[test]
    fn test_log_zero_uses_floor() {
        let value = Scale::Log.apply(0.0);
        assert!(value.is_finite());
        assert_eq!(value, LOG_FLOOR.log2());
    }

    #[test]
    fn test_log_inverts() {
        for x in [1e-6, 0.5, 1.0, 25.0, 33.333333333333336, 100.0] {
            let back = 2f64.powf(Scale::Log.apply(x));
            assert!((back - x).abs() <= x * 1e-12, "{} -> {}", x, back);
        }
    }

    #[test]
    fn test_log_of_powers_of_two() {
        assert_eq!(Scale::Log.apply_all(vec![1.0, 32.0, 64.0]), vec![0.0, 5.0, 6.0]);
    }
}
