//! Population variance and standard deviation
//!
//! Spread is recomputed from the series snapshot on each call. Each distinct
//! value enters as a block of identical observations and blocks are combined
//! with Chan et al.'s pairwise update, which keeps the spread stable without
//! a second pass.

use crate::math;
use crate::series::Series;
use crate::traits::{ReduceError, Statistic};

/// First and second central moments of a weighted sample
///
/// The second moment is kept divided by the count, so spreads close to
/// `f64::MAX` stay finite.
///
/// # Example
///
/// ```
/// use statreduce::statistics::Moments;
///
/// let mut moments = Moments::new();
/// moments.push_block(2.0, 1);
/// moments.push_block(4.0, 3);
/// moments.push_block(5.0, 2);
/// moments.push_block(7.0, 1);
/// moments.push_block(9.0, 1);
///
/// assert!((moments.mean().unwrap() - 5.0).abs() < 1e-12);
/// assert!((moments.population_variance().unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    /// Number of observations
    count: u64,
    /// Running mean
    mean: f64,
    /// Mean squared difference from the mean
    variance: f64,
}

impl Moments {
    /// Create empty moments
    pub fn new() -> Self {
        Self::default()
    }

    /// Moments of every occurrence in `series`
    pub fn from_series(series: &Series) -> Self {
        let mut moments = Self::new();
        for (value, count) in series.iter() {
            moments.push_block(value, count);
        }
        moments
    }

    /// Add `weight` observations all equal to `value`
    pub fn push_block(&mut self, value: f64, weight: u64) {
        if weight == 0 {
            return;
        }
        if self.count == 0 {
            self.count = weight;
            self.mean = value;
            self.variance = 0.0;
            return;
        }

        let combined = (self.count + weight) as f64;
        let old_share = self.count as f64 / combined;
        let new_share = weight as f64 / combined;
        let delta = value - self.mean;

        self.mean += delta * new_share;
        // The block itself contributes no spread, only the shift between means
        self.variance = self.variance * old_share + (delta * old_share) * (delta * new_share);
        self.count += weight;
    }

    /// Number of observations
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Variance with divisor n
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then_some(self.variance)
    }

    /// Square root of the population variance
    pub fn population_stddev(&self) -> Option<f64> {
        self.population_variance().map(math::sqrt)
    }
}

/// Mean of squared deviations from the mean, divisor n
#[derive(Clone, Copy, Debug, Default)]
pub struct PopulationVariance;

impl Statistic for PopulationVariance {
    const NAME: &'static str = "population variance";

    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError> {
        Ok(Moments::from_series(series).population_variance())
    }
}

/// Square root of the population variance
#[derive(Clone, Copy, Debug, Default)]
pub struct PopulationStdDev;

impl Statistic for PopulationStdDev {
    const NAME: &'static str = "population standard deviation";

    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError> {
        Ok(Moments::from_series(series).population_stddev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Series {
        [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect()
    }

    #[test]
    fn test_classic_example() {
        let series = classic();

        let variance = PopulationVariance.evaluate(&series).unwrap().unwrap();
        let stddev = PopulationStdDev.evaluate(&series).unwrap().unwrap();

        assert!((variance - 4.0).abs() < 1e-12);
        assert!((stddev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let series = Series::new();

        assert_eq!(PopulationVariance.evaluate(&series), Ok(None));
        assert_eq!(PopulationStdDev.evaluate(&series), Ok(None));
        assert_eq!(Moments::new().mean(), None);
    }

    #[test]
    fn test_single_value() {
        let series: Series = [42.0].into_iter().collect();

        assert_eq!(PopulationVariance.evaluate(&series), Ok(Some(0.0)));
        assert_eq!(PopulationStdDev.evaluate(&series), Ok(Some(0.0)));
    }

    #[test]
    fn test_constant_blocks() {
        let mut moments = Moments::new();
        moments.push_block(3.0, 10);
        moments.push_block(3.0, 5);

        assert_eq!(moments.len(), 15);
        assert_eq!(moments.mean(), Some(3.0));
        assert_eq!(moments.population_variance(), Some(0.0));
    }

    #[test]
    fn test_zero_weight_ignored() {
        let mut moments = Moments::new();
        moments.push_block(1.0, 0);
        assert!(moments.is_empty());
    }

    #[test]
    fn test_matches_two_pass() {
        let values = [1.5, -3.0, 8.25, 8.25, 0.0, 12.0, -7.5];
        let series: Series = values.iter().copied().collect();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let expected = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        let variance = PopulationVariance.evaluate(&series).unwrap().unwrap();
        assert!((variance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_numerical_stability() {
        let base = 1e9;
        let series: Series = (0..1000).map(|i| base + (i % 10) as f64).collect();

        // Offsets 0..9 repeated evenly: variance of 0..9 is 8.25
        let variance = PopulationVariance.evaluate(&series).unwrap().unwrap();
        assert!((variance - 8.25).abs() < 1e-4, "variance: {}", variance);
    }

    #[test]
    fn test_extreme_magnitudes() {
        // Mean 0, every deviation is 1e154: variance 1e308, still finite
        let series: Series = [1e154, -1e154].into_iter().collect();

        let variance = PopulationVariance.evaluate(&series).unwrap().unwrap();
        let stddev = PopulationStdDev.evaluate(&series).unwrap().unwrap();

        assert!(variance.is_finite(), "variance: {:e}", variance);
        assert!((variance / 1e308 - 1.0).abs() < 1e-12);
        assert!((stddev / 1e154 - 1.0).abs() < 1e-12);
    }
}
