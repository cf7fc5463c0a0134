//! Generic reducer over a statistic
//!
//! One implementation of the protocol serves every statistic: the series is
//! shared machinery and the [`Statistic`] parameter only selects the formula.

use tracing::{debug, error, trace};

use crate::series::Series;
use crate::traits::{ReduceError, Reducer, ReducerMode, ReducerState, Statistic};

/// Reducer binding one [`Series`] to one statistic
///
/// # Example
///
/// ```
/// use statreduce::reducer::StatReducer;
/// use statreduce::statistics::Median;
/// use statreduce::traits::Reducer;
///
/// let mut median = StatReducer::<Median>::window();
///
/// for value in [1.0, 2.0, 3.0] {
///     median.accumulate(value).unwrap();
/// }
/// assert_eq!(median.value(), Ok(Some(2.0)));
///
/// median.accumulate(4.0).unwrap();
/// assert_eq!(median.value(), Ok(Some(2.5)));
///
/// median.retract(1.0).unwrap();
/// assert_eq!(median.value(), Ok(Some(3.0)));
/// ```
#[derive(Clone, Debug)]
pub struct StatReducer<S: Statistic> {
    statistic: S,
    series: Series,
    mode: ReducerMode,
    state: ReducerState,
}

impl<S: Statistic> StatReducer<S> {
    /// Create a started reducer in the given mode
    pub fn new(mode: ReducerMode) -> Self {
        Self {
            statistic: S::default(),
            series: Series::new(),
            mode,
            state: ReducerState::Empty,
        }
    }

    /// Create a reducer for group-by aggregation
    pub fn aggregate() -> Self {
        Self::new(ReducerMode::Aggregate)
    }

    /// Create a reducer for sliding window frames
    pub fn window() -> Self {
        Self::new(ReducerMode::Window)
    }

    /// Values currently in scope
    pub fn series(&self) -> &Series {
        &self.series
    }

    fn ensure_live(&self) -> Result<(), ReduceError> {
        if self.state == ReducerState::Finalized {
            return Err(ReduceError::Finalized);
        }
        Ok(())
    }
}

fn ensure_finite(value: f64) -> Result<f64, ReduceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReduceError::InvalidInput(value))
    }
}

impl<S: Statistic> Reducer for StatReducer<S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn mode(&self) -> ReducerMode {
        self.mode
    }

    fn state(&self) -> ReducerState {
        self.state
    }

    fn start(&mut self) {
        trace!(statistic = S::NAME, mode = ?self.mode, "start");
        self.series.clear();
        self.state = ReducerState::Empty;
    }

    fn accumulate(&mut self, value: f64) -> Result<(), ReduceError> {
        self.ensure_live()?;
        let value = ensure_finite(value)?;
        self.series.add(value);
        self.state = ReducerState::Accumulating;
        Ok(())
    }

    fn retract(&mut self, value: f64) -> Result<(), ReduceError> {
        self.ensure_live()?;
        if self.mode == ReducerMode::Aggregate {
            return Err(ReduceError::RetractUnsupported(S::NAME));
        }
        let value = ensure_finite(value)?;
        self.series.remove(value).map_err(|err| {
            error!(
                statistic = S::NAME,
                value,
                in_scope = self.series.count(),
                "retract without a matching accumulate"
            );
            err
        })
    }

    fn value(&self) -> Result<Option<f64>, ReduceError> {
        self.statistic.evaluate(&self.series)
    }

    fn finalize(&mut self) -> Result<Option<f64>, ReduceError> {
        self.ensure_live()?;
        let result = self.value().map_err(|err| {
            debug!(statistic = S::NAME, count = self.series.count(), %err, "finalize failed");
            err
        })?;
        trace!(statistic = S::NAME, count = self.series.count(), ?result, "finalize");
        self.series.clear();
        self.state = ReducerState::Finalized;
        Ok(result)
    }

    fn count(&self) -> u64 {
        self.series.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{GeometricMean, HarmonicMean, Mode, PopulationVariance};

    #[test]
    fn test_state_transitions() {
        let mut reducer = StatReducer::<Mode>::aggregate();
        assert_eq!(reducer.state(), ReducerState::Empty);

        reducer.accumulate(1.0).unwrap();
        assert_eq!(reducer.state(), ReducerState::Accumulating);

        assert_eq!(reducer.finalize(), Ok(Some(1.0)));
        assert_eq!(reducer.state(), ReducerState::Finalized);
        assert!(reducer.is_empty());
    }

    #[test]
    fn test_finalized_rejects_calls() {
        let mut reducer = StatReducer::<Mode>::window();
        reducer.accumulate(1.0).unwrap();
        reducer.finalize().unwrap();

        assert_eq!(reducer.accumulate(2.0), Err(ReduceError::Finalized));
        assert_eq!(reducer.retract(1.0), Err(ReduceError::Finalized));
        assert_eq!(reducer.finalize(), Err(ReduceError::Finalized));
        assert_eq!(reducer.value(), Ok(None));
    }

    #[test]
    fn test_start_revives_finalized() {
        let mut reducer = StatReducer::<Mode>::aggregate();
        reducer.accumulate(3.0).unwrap();
        reducer.finalize().unwrap();

        reducer.start();
        assert_eq!(reducer.state(), ReducerState::Empty);
        reducer.accumulate(5.0).unwrap();
        assert_eq!(reducer.finalize(), Ok(Some(5.0)));
    }

    #[test]
    fn test_start_discards_series() {
        let mut reducer = StatReducer::<Mode>::window();
        reducer.accumulate(3.0).unwrap();
        reducer.start();

        assert!(reducer.is_empty());
        assert_eq!(reducer.value(), Ok(None));
    }

    #[test]
    fn test_invalid_input() {
        let mut reducer = StatReducer::<PopulationVariance>::window();

        assert!(matches!(
            reducer.accumulate(f64::NAN),
            Err(ReduceError::InvalidInput(v)) if v.is_nan()
        ));
        assert_eq!(
            reducer.accumulate(f64::INFINITY),
            Err(ReduceError::InvalidInput(f64::INFINITY))
        );
        assert_eq!(
            reducer.retract(f64::NEG_INFINITY),
            Err(ReduceError::InvalidInput(f64::NEG_INFINITY))
        );
        assert!(reducer.is_empty());
        assert_eq!(reducer.state(), ReducerState::Empty);
    }

    #[test]
    fn test_retract_not_present() {
        let mut reducer = StatReducer::<GeometricMean>::window();
        reducer.accumulate(2.0).unwrap();

        assert_eq!(reducer.retract(8.0), Err(ReduceError::NotPresent(8.0)));
        assert_eq!(reducer.count(), 1);
    }

    #[test]
    fn test_retract_in_aggregate_mode() {
        let mut reducer = StatReducer::<GeometricMean>::aggregate();
        reducer.accumulate(2.0).unwrap();

        assert_eq!(
            reducer.retract(2.0),
            Err(ReduceError::RetractUnsupported("geometric mean"))
        );
        assert_eq!(reducer.count(), 1);
    }

    #[test]
    fn test_value_does_not_mutate() {
        let mut reducer = StatReducer::<Mode>::window();
        reducer.accumulate(7.0).unwrap();

        assert_eq!(reducer.value(), Ok(Some(7.0)));
        assert_eq!(reducer.value(), Ok(Some(7.0)));
        assert_eq!(reducer.count(), 1);
        assert_eq!(reducer.series().frequency(7.0), 1);
    }

    #[test]
    fn test_undefined_mean_keeps_instance() {
        let mut reducer = StatReducer::<GeometricMean>::aggregate();
        reducer.accumulate(-2.0).unwrap();
        reducer.accumulate(8.0).unwrap();

        let undefined = ReduceError::Undefined {
            statistic: "geometric mean",
            value: -2.0,
        };
        assert_eq!(reducer.finalize(), Err(undefined));
        assert_eq!(reducer.state(), ReducerState::Accumulating);
        assert_eq!(reducer.count(), 2);

        // A zero makes the mean defined again
        reducer.accumulate(0.0).unwrap();
        assert_eq!(reducer.finalize(), Ok(Some(0.0)));
    }

    #[test]
    fn test_undefined_mean_in_window() {
        let mut reducer = StatReducer::<HarmonicMean>::window();
        reducer.accumulate(4.0).unwrap();
        reducer.accumulate(-1.0).unwrap();

        assert!(matches!(
            reducer.value(),
            Err(ReduceError::Undefined { statistic: "harmonic mean", value }) if value == -1.0
        ));

        reducer.retract(-1.0).unwrap();
        assert_eq!(reducer.value(), Ok(Some(4.0)));
    }
}
