//! Order statistics: median and mode

use crate::series::Series;
use crate::traits::{ReduceError, Statistic};

/// Middle value, or the mean of the two middle values for an even count
#[derive(Clone, Copy, Debug, Default)]
pub struct Median;

impl Statistic for Median {
    const NAME: &'static str = "median";

    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError> {
        Ok(series.median())
    }
}

/// Most frequent value
///
/// When several values share the highest multiplicity the smallest of them
/// wins, so the result does not depend on the order rows arrived in.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mode;

impl Statistic for Mode {
    const NAME: &'static str = "mode";

    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError> {
        Ok(series.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let odd: Series = [1.0, 2.0, 3.0].into_iter().collect();
        let even: Series = [1.0, 2.0, 3.0, 4.0].into_iter().collect();

        assert_eq!(Median.evaluate(&odd), Ok(Some(2.0)));
        assert_eq!(Median.evaluate(&even), Ok(Some(2.5)));
        assert_eq!(Median.evaluate(&Series::new()), Ok(None));
    }

    #[test]
    fn test_median_of_extremes() {
        let series: Series = [f64::MAX, f64::MAX].into_iter().collect();
        assert_eq!(Median.evaluate(&series), Ok(Some(f64::MAX)));

        let series: Series = [f64::MIN, f64::MAX].into_iter().collect();
        assert_eq!(Median.evaluate(&series), Ok(Some(0.0)));
    }

    #[test]
    fn test_mode_tie_break() {
        let series: Series = [1.0, 1.0, 2.0, 2.0].into_iter().collect();
        assert_eq!(Mode.evaluate(&series), Ok(Some(1.0)));
    }

    #[test]
    fn test_mode_insertion_order_irrelevant() {
        let forward: Series = [5.0, 5.0, -1.0, -1.0, 3.0].into_iter().collect();
        let backward: Series = [3.0, -1.0, -1.0, 5.0, 5.0].into_iter().collect();

        assert_eq!(Mode.evaluate(&forward), Ok(Some(-1.0)));
        assert_eq!(Mode.evaluate(&backward), Ok(Some(-1.0)));
    }

    #[test]
    fn test_mode_all_distinct() {
        let series: Series = [9.0, 4.0, 7.0].into_iter().collect();
        assert_eq!(Mode.evaluate(&series), Ok(Some(4.0)));
        assert_eq!(Mode.evaluate(&Series::new()), Ok(None));
    }
}
