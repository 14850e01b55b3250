// Interval model: converts a stability into a day-count interval for a
// desired retention, bounded by the configured ceiling. The only place
// the retention target and maximum interval are applied.

use crate::params::{FsrsParameters, ParameterError};

fn modifier(retention: f64, params: &FsrsParameters) -> f64 {
    (retention.powf(1.0 / params.decay()) - 1.0) / params.factor()
}

/// Elapsed-days-per-unit-stability that yields `retention` on the
/// forgetting curve. Fails fast on a retention outside (0, 1]: a
/// silently clamped target would corrupt every downstream interval.
pub fn interval_modifier(
    retention: f64,
    params: &FsrsParameters,
) -> Result<f64, ParameterError> {
    if !(retention > 0.0 && retention <= 1.0) {
        return Err(ParameterError::InvalidRetention(retention));
    }
    Ok(modifier(retention, params))
}

/// Next review interval in whole days, floored at 1 and capped at the
/// configured maximum. The retention target was validated when the
/// parameter set was built, so this cannot fail.
pub fn next_interval(stability: f64, params: &FsrsParameters) -> i64 {
    let days = (stability * modifier(params.request_retention(), params)).round() as i64;
    days.clamp(1, i64::from(params.maximum_interval()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DEFAULT_WEIGHTS;

    #[test]
    fn modifier_is_one_at_ninety_percent() {
        // At the curve's definitional anchor the interval equals the
        // stability, so the modifier must be exactly 1.
        let params = FsrsParameters::default();
        let m = interval_modifier(0.9, &params).unwrap();
        assert!((m - 1.0).abs() < 1e-10);
    }

    #[test]
    fn interval_tracks_stability_at_default_retention() {
        let params = FsrsParameters::default();
        for s in [1.0, 5.0, 42.0, 365.0] {
            assert_eq!(next_interval(s, &params), s as i64);
        }
    }

    #[test]
    fn stricter_retention_shortens_intervals() {
        let lax = FsrsParameters::new(DEFAULT_WEIGHTS.to_vec(), 0.8, 36500).unwrap();
        let strict = FsrsParameters::new(DEFAULT_WEIGHTS.to_vec(), 0.97, 36500).unwrap();
        assert!(next_interval(30.0, &strict) < next_interval(30.0, &lax));
    }

    #[test]
    fn interval_is_floored_at_one_day() {
        let params = FsrsParameters::default();
        assert_eq!(next_interval(0.1, &params), 1);
    }

    #[test]
    fn interval_is_capped_at_maximum() {
        let params = FsrsParameters::new(DEFAULT_WEIGHTS.to_vec(), 0.9, 100).unwrap();
        assert_eq!(next_interval(5000.0, &params), 100);
    }

    #[test]
    fn rejects_invalid_retention() {
        let params = FsrsParameters::default();
        assert_eq!(
            interval_modifier(0.0, &params),
            Err(ParameterError::InvalidRetention(0.0))
        );
        assert_eq!(
            interval_modifier(1.5, &params),
            Err(ParameterError::InvalidRetention(1.5))
        );
    }
}
