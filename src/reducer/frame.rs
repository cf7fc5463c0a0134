//! Host-side drivers that feed a column of values through a reducer
//!
//! These mirror what a SQL engine does for one group or one partition, and are
//! mainly useful for embedding the reducers without a SQL engine at hand.

use tracing::trace;

use crate::traits::{ReduceError, Reducer};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Rows a window function sees for each output row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The whole partition, as in `OVER (PARTITION BY ...)` without ordering
    Partition,
    /// `ROWS BETWEEN preceding PRECEDING AND CURRENT ROW`
    Rows { preceding: usize },
}

/// Run `values` through an aggregate: start, accumulate all, finalize
pub fn evaluate_aggregate(
    reducer: &mut dyn Reducer,
    values: &[f64],
) -> Result<Option<f64>, ReduceError> {
    reducer.start();
    for &value in values {
        reducer.accumulate(value)?;
    }
    reducer.finalize()
}

/// Evaluate a window function for every row of a partition
///
/// Returns one result per input row. With [`Frame::Rows`] the row leaving the
/// frame is retracted before the current row's value is read, so the reducer
/// must be in window mode.
///
/// # Example
///
/// ```
/// use statreduce::reducer::{evaluate_window, Frame, StatReducer};
/// use statreduce::statistics::Median;
///
/// let mut median = StatReducer::<Median>::window();
/// let out = evaluate_window(&mut median, &[1.0, 5.0, 3.0, 9.0], Frame::Rows { preceding: 1 })
///     .unwrap();
///
/// assert_eq!(out, vec![Some(1.0), Some(3.0), Some(4.0), Some(6.0)]);
/// ```
pub fn evaluate_window(
    reducer: &mut dyn Reducer,
    values: &[f64],
    frame: Frame,
) -> Result<Vec<Option<f64>>, ReduceError> {
    reducer.start();
    let mut out = Vec::with_capacity(values.len());

    match frame {
        Frame::Partition => {
            for &value in values {
                reducer.accumulate(value)?;
            }
            let result = reducer.value()?;
            trace!(statistic = reducer.name(), rows = values.len(), ?result, "partition frame");
            out.resize(values.len(), result);
        }
        Frame::Rows { preceding } => {
            for (i, &value) in values.iter().enumerate() {
                reducer.accumulate(value)?;
                if i > preceding {
                    reducer.retract(values[i - preceding - 1])?;
                }
                out.push(reducer.value()?);
            }
            trace!(statistic = reducer.name(), rows = values.len(), preceding, "rows frame");
        }
    }

    Ok(out)
}
