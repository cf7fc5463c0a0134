//! Geometric and harmonic means
//!
//! Both are recomputed from the whole series on each call rather than kept as
//! a running product or reciprocal sum, so long-lived windows do not drift.
//! A zero anywhere in scope short-circuits to `0.0`; otherwise a negative value
//! makes the mean undefined and evaluation fails with
//! [`ReduceError::Undefined`].

use crate::math;
use crate::series::Series;
use crate::traits::{ReduceError, Statistic};

/// Shared degenerate cases: `None` when empty, `0.0` with a zero in scope,
/// an error for negatives. `Ok(Some(min))` means the formula applies.
fn mean_domain<S: Statistic>(series: &Series) -> Result<Option<f64>, ReduceError> {
    let Some(min) = series.min() else {
        return Ok(None);
    };
    if series.contains_zero() {
        return Ok(Some(0.0));
    }
    if min < 0.0 {
        return Err(ReduceError::Undefined {
            statistic: S::NAME,
            value: min,
        });
    }
    Ok(Some(min))
}

/// n-th root of the product of the values, computed in log space
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometricMean;

impl Statistic for GeometricMean {
    const NAME: &'static str = "geometric mean";

    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError> {
        match mean_domain::<Self>(series)? {
            Some(min) if min > 0.0 => {}
            other => return Ok(other),
        }

        let log_sum: f64 = series
            .iter()
            .map(|(value, count)| math::ln(value) * count as f64)
            .sum();
        Ok(Some(math::exp(log_sum / series.count() as f64)))
    }
}

/// Count divided by the sum of reciprocals
#[derive(Clone, Copy, Debug, Default)]
pub struct HarmonicMean;

impl Statistic for HarmonicMean {
    const NAME: &'static str = "harmonic mean";

    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError> {
        let scale = match mean_domain::<Self>(series)? {
            Some(min) if min > 0.0 => min,
            other => return Ok(other),
        };

        // Reciprocals are taken relative to the smallest value so that
        // subnormal inputs do not overflow the sum to infinity
        let scaled_sum: f64 = series
            .iter()
            .map(|(value, count)| count as f64 * (scale / value))
            .sum();
        Ok(Some(scale * (series.count() as f64 / scaled_sum)))
    }
}
