//! Core traits for statistical reducers
//!
//! Every reducer implements the object-safe [`Reducer`] trait, which models the
//! lifecycle a SQL engine drives for aggregate and window functions. The
//! per-statistic formulas plug in through [`Statistic`].

use core::fmt::Debug;

use thiserror::Error;

use crate::series::Series;

/// Error raised by the reducer protocol
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReduceError {
    /// `retract` was called for a value with no remaining occurrence
    ///
    /// This is a protocol violation by the caller: the window-frame
    /// bookkeeping has drifted from what was accumulated.
    #[error("value {0} is not present in the series")]
    NotPresent(f64),
    /// A NaN or infinite value was passed to `accumulate` or `retract`
    #[error("invalid input: {0} is not a finite number")]
    InvalidInput(f64),
    /// A protocol call arrived after `finalize`
    #[error("reducer has already been finalized")]
    Finalized,
    /// `retract` was called on a reducer running in aggregate mode
    #[error("retract is not supported by aggregate reducer `{0}`")]
    RetractUnsupported(&'static str),
    /// The statistic has no value for the series in scope
    ///
    /// Geometric and harmonic means are undefined once a negative value is in
    /// scope and no zero is present.
    #[error("{statistic} is undefined for negative value {value}")]
    Undefined {
        statistic: &'static str,
        value: f64,
    },
}

/// How the host drives a reducer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReducerMode {
    /// Group-by semantics: `start`, `accumulate*`, `finalize`
    Aggregate,
    /// Sliding frame: `start`, `(accumulate | retract)*`, `value` after each change
    Window,
}

/// Lifecycle state of a reducer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReducerState {
    /// Started, nothing accumulated yet
    Empty,
    /// At least one value has been accumulated
    Accumulating,
    /// `finalize` has been called; only `start` is accepted
    Finalized,
}

/// A per-statistic formula evaluated over a series snapshot
pub trait Statistic: Clone + Debug + Default + Send {
    /// Display name of the statistic
    const NAME: &'static str;

    /// Compute the statistic, or `None` for an empty series
    ///
    /// Fails with [`ReduceError::Undefined`] when the series has no value
    /// under this statistic.
    fn evaluate(&self, series: &Series) -> Result<Option<f64>, ReduceError>;
}

/// The reducer protocol driven by a host SQL engine
///
/// Calls on one instance must be strictly sequential: `start` precedes any
/// `accumulate`, and `retract(x)` must follow a matching un-retracted
/// `accumulate(x)`.
pub trait Reducer: Debug + Send {
    /// Name of the statistic this reducer computes
    fn name(&self) -> &'static str;

    /// Aggregate or window mode
    fn mode(&self) -> ReducerMode;

    /// Current lifecycle state
    fn state(&self) -> ReducerState;

    /// Reset to a fresh, empty series
    fn start(&mut self);

    /// Add one value to the series
    fn accumulate(&mut self, value: f64) -> Result<(), ReduceError>;

    /// Remove one previously accumulated occurrence of `value`
    fn retract(&mut self, value: f64) -> Result<(), ReduceError>;

    /// Current result without mutating the series
    fn value(&self) -> Result<Option<f64>, ReduceError>;

    /// Compute the result, clear the series and end the instance
    ///
    /// If the result is undefined the error is returned and the instance is
    /// left untouched.
    fn finalize(&mut self) -> Result<Option<f64>, ReduceError>;

    /// Number of values currently in scope
    fn count(&self) -> u64;

    /// Check if no values are in scope
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_error_display() {
        assert_eq!(
            ReduceError::NotPresent(3.5).to_string(),
            "value 3.5 is not present in the series"
        );
        assert_eq!(
            ReduceError::InvalidInput(f64::INFINITY).to_string(),
            "invalid input: inf is not a finite number"
        );
        assert_eq!(
            ReduceError::RetractUnsupported("median").to_string(),
            "retract is not supported by aggregate reducer `median`"
        );
        assert_eq!(
            ReduceError::Undefined {
                statistic: "geometric mean",
                value: -2.0
            }
            .to_string(),
            "geometric mean is undefined for negative value -2"
        );
    }

    #[test]
    fn test_mode_ordering() {
        assert!(ReducerMode::Aggregate < ReducerMode::Window);
    }
}
