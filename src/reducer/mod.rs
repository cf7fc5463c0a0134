//! The reducer protocol
//!
//! A host SQL engine drives each reducer instance through a fixed lifecycle:
//!
//! - aggregate functions: `start`, `accumulate*`, `finalize`
//! - window functions: `start`, `(accumulate | retract)*`, with `value` read
//!   after every frame change
//!
//! [`StatReducer`] implements the lifecycle once for every statistic. The
//! [`evaluate_aggregate`] and [`evaluate_window`] drivers play the host's part
//! for a single group or partition.
//!
//! # Example
//!
//! ```
//! use statreduce::reducer::StatReducer;
//! use statreduce::statistics::PopulationVariance;
//! use statreduce::traits::Reducer;
//!
//! let mut variance = StatReducer::<PopulationVariance>::aggregate();
//!
//! for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     variance.accumulate(value).unwrap();
//! }
//!
//! let result = variance.finalize().unwrap().unwrap();
//! assert!((result - 4.0).abs() < 1e-12);
//! ```

mod frame;
mod lifecycle;

pub use frame::{evaluate_aggregate, evaluate_window, Frame};
pub use lifecycle::StatReducer;
