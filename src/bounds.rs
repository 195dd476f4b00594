//! Per-dimension range and the bounds clamp used by every mutator after
//! its arithmetic is done.

use crate::error::ConfigError;
use crate::rng::Rng64;

/// One dimension's box constraint, `lb < ub`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub lb: f64,
    pub ub: f64,
}

impl Range {
    pub fn new(lb: f64, ub: f64) -> Result<Self, ConfigError> {
        if lb >= ub {
            return Err(ConfigError::InvalidRange { dim: 0 });
        }
        Ok(Self { lb, ub })
    }

    pub fn span(&self) -> f64 {
        self.ub - self.lb
    }
}

/// Validate a full per-dimension range vector, attaching the offending
/// dimension index to any failure.
pub fn validate_ranges(ranges: &[(f64, f64)]) -> Result<Vec<Range>, ConfigError> {
    ranges
        .iter()
        .enumerate()
        .map(|(dim, &(lb, ub))| {
            if lb < ub {
                Ok(Range { lb, ub })
            } else {
                Err(ConfigError::InvalidRange { dim })
            }
        })
        .collect()
}

/// Return `x` unchanged if it lies in `range`, else a fresh uniform
/// resample over the range.
pub fn clamp_or_resample(x: f64, range: Range, rng: &mut Rng64) -> f64 {
    if x >= range.lb && x <= range.ub {
        x
    } else {
        rng.uniform_range(range.lb, range.ub)
    }
}

/// Apply [`clamp_or_resample`] coordinate-wise to a full vector.
pub fn clamp_or_resample_vec(mut v: ndarray::Array1<f64>, ranges: &[Range], rng: &mut Rng64) -> ndarray::Array1<f64> {
    for (j, range) in ranges.iter().enumerate() {
        v[j] = clamp_or_resample(v[j], *range, rng);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_value_is_unchanged() {
        let range = Range::new(-1.0, 1.0).unwrap();
        let mut rng = Rng64::seeded(0);
        assert_eq!(clamp_or_resample(0.2, range, &mut rng), 0.2);
    }

    #[test]
    fn out_of_range_value_is_resampled_in_range() {
        let range = Range::new(-1.0, 1.0).unwrap();
        let mut rng = Rng64::seeded(0);
        for _ in 0..50 {
            let v = clamp_or_resample(1.5, range, &mut rng);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn invalid_range_is_rejected() {
        assert!(Range::new(1.0, 1.0).is_err());
        assert!(Range::new(2.0, 1.0).is_err());
    }

    #[test]
    fn validate_ranges_reports_offending_dimension() {
        let err = validate_ranges(&[(-1.0, 1.0), (2.0, 2.0)]).unwrap_err();
        match err {
            ConfigError::InvalidRange { dim } => assert_eq!(dim, 1),
            _ => panic!("wrong error variant"),
        }
    }
}
