// FSRS parameter set: model weights plus the two scheduling knobs.
//
// Two formula generations are supported and told apart by weight count:
// the 17-weight legacy vector uses a fixed forgetting-curve decay, the
// 21-weight current vector carries its decay in w[20].

use thiserror::Error;

/// Current-formula default weights (21 entries).
pub const DEFAULT_WEIGHTS: [f64; 21] = [
    0.212, 1.2931, 2.3065, 8.2956, 6.4133, 0.8334, 3.0194, 0.001, 1.8722, 0.1666, 0.796, 1.4835,
    0.0614, 0.2629, 1.6483, 0.6014, 1.8729, 0.5425, 0.0912, 0.0658, 0.1542,
];

/// Legacy-formula default weights (17 entries).
pub const DEFAULT_WEIGHTS_LEGACY: [f64; 17] = [
    0.4, 0.6, 2.4, 5.8, 4.93, 0.94, 0.86, 0.01, 1.49, 0.14, 0.94, 2.18, 0.05, 0.34, 1.26, 0.29,
    2.61,
];

pub const DEFAULT_REQUEST_RETENTION: f64 = 0.9;
pub const DEFAULT_MAXIMUM_INTERVAL: u32 = 36500;

const LEGACY_WEIGHT_COUNT: usize = 17;
const CURRENT_WEIGHT_COUNT: usize = 21;
const LEGACY_DECAY: f64 = -0.5;

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("request_retention must be in (0, 1], got {0}")]
    InvalidRetention(f64),
    #[error("weight vector must have 17 (legacy) or 21 (current) entries, got {0}")]
    InvalidWeightCount(usize),
    #[error("maximum_interval must be at least 1 day")]
    InvalidMaximumInterval,
    #[error("{0} must be a non-empty list of positive durations")]
    InvalidSteps(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaVersion {
    Legacy,
    Current,
}

/// Immutable weight vector plus retention target and interval ceiling.
/// Shared read-only by every scheduling call; validated once on
/// construction so the engine itself never has to re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct FsrsParameters {
    w: Vec<f64>,
    request_retention: f64,
    maximum_interval: u32,
}

impl FsrsParameters {
    pub fn new(
        w: Vec<f64>,
        request_retention: f64,
        maximum_interval: u32,
    ) -> Result<Self, ParameterError> {
        if w.len() != LEGACY_WEIGHT_COUNT && w.len() != CURRENT_WEIGHT_COUNT {
            return Err(ParameterError::InvalidWeightCount(w.len()));
        }
        if !(request_retention > 0.0 && request_retention <= 1.0) {
            return Err(ParameterError::InvalidRetention(request_retention));
        }
        if maximum_interval == 0 {
            return Err(ParameterError::InvalidMaximumInterval);
        }
        Ok(Self {
            w,
            request_retention,
            maximum_interval,
        })
    }

    pub fn version(&self) -> FormulaVersion {
        if self.w.len() == LEGACY_WEIGHT_COUNT {
            FormulaVersion::Legacy
        } else {
            FormulaVersion::Current
        }
    }

    pub fn w(&self) -> &[f64] {
        &self.w
    }

    pub fn request_retention(&self) -> f64 {
        self.request_retention
    }

    pub fn maximum_interval(&self) -> u32 {
        self.maximum_interval
    }

    /// Forgetting-curve exponent. Legacy vectors pin it; current vectors
    /// carry it as a fitted weight.
    pub fn decay(&self) -> f64 {
        match self.version() {
            FormulaVersion::Legacy => LEGACY_DECAY,
            FormulaVersion::Current => -self.w[20],
        }
    }

    /// Curve scale factor, solved so retrievability is exactly 0.9 when
    /// elapsed time equals stability.
    pub fn factor(&self) -> f64 {
        0.9f64.powf(1.0 / self.decay()) - 1.0
    }
}

impl Default for FsrsParameters {
    fn default() -> Self {
        Self {
            w: DEFAULT_WEIGHTS.to_vec(),
            request_retention: DEFAULT_REQUEST_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_current_version() {
        let params = FsrsParameters::default();
        assert_eq!(params.version(), FormulaVersion::Current);
        assert_eq!(params.w().len(), 21);
    }

    #[test]
    fn legacy_vector_detected_by_length() {
        let params =
            FsrsParameters::new(DEFAULT_WEIGHTS_LEGACY.to_vec(), 0.9, 36500).unwrap();
        assert_eq!(params.version(), FormulaVersion::Legacy);
        assert!((params.decay() - -0.5).abs() < 1e-12);
    }

    #[test]
    fn current_decay_comes_from_w20() {
        let params = FsrsParameters::default();
        assert!((params.decay() - -DEFAULT_WEIGHTS[20]).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_weight_counts() {
        for n in [0usize, 5, 16, 18, 19, 20, 22] {
            let result = FsrsParameters::new(vec![0.5; n], 0.9, 36500);
            assert_eq!(result, Err(ParameterError::InvalidWeightCount(n)));
        }
    }

    #[test]
    fn rejects_out_of_range_retention() {
        for r in [0.0, -0.1, 1.0001, 2.0] {
            let result = FsrsParameters::new(DEFAULT_WEIGHTS.to_vec(), r, 36500);
            assert_eq!(result, Err(ParameterError::InvalidRetention(r)));
        }
        // 1.0 is inclusive
        assert!(FsrsParameters::new(DEFAULT_WEIGHTS.to_vec(), 1.0, 36500).is_ok());
    }

    #[test]
    fn rejects_zero_maximum_interval() {
        let result = FsrsParameters::new(DEFAULT_WEIGHTS.to_vec(), 0.9, 0);
        assert_eq!(result, Err(ParameterError::InvalidMaximumInterval));
    }

    #[test]
    fn factor_anchors_curve_at_retention_ninety() {
        // (1 + factor)^decay must equal 0.9 for both versions
        let current = FsrsParameters::default();
        let legacy =
            FsrsParameters::new(DEFAULT_WEIGHTS_LEGACY.to_vec(), 0.9, 36500).unwrap();
        for params in [current, legacy] {
            let r = (1.0 + params.factor()).powf(params.decay());
            assert!((r - 0.9).abs() < 1e-12);
        }
    }
}
