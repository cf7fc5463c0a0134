//! # Statreduce
//!
//! Statistical reducers for SQL aggregate and window functions.
//!
//! Statreduce implements the reducer protocol a SQL engine drives for
//! user-defined aggregates (`start`, `accumulate*`, `finalize`) and window
//! functions (`start`, `(accumulate | retract)*`, `value`), together with the
//! statistics plugged into it.
//!
//! ## Features
//!
//! - **Order statistics**: median and mode over a multiset with O(log n)
//!   insertion and removal
//! - **Means**: geometric and harmonic mean, recomputed from the frame
//! - **Spread**: population variance and standard deviation
//! - **Window support**: `retract` undoes a previous `accumulate` as rows
//!   leave a sliding frame
//! - **Registration table**: SQL names such as `geomean` / `wingeomean`
//!   mapped to reducer constructors
//!
//! ## Quick Start
//!
//! ```rust
//! use statreduce::prelude::*;
//!
//! let mut median = StatReducer::<Median>::window();
//!
//! for value in [1.0, 2.0, 3.0] {
//!     median.accumulate(value).unwrap();
//! }
//! assert_eq!(median.value(), Ok(Some(2.0)));
//!
//! median.accumulate(4.0).unwrap();
//! assert_eq!(median.value(), Ok(Some(2.5)));
//!
//! // The oldest row leaves the frame
//! median.retract(1.0).unwrap();
//! assert_eq!(median.value(), Ok(Some(3.0)));
//! ```
//!
//! ## Registering with a host engine
//!
//! ```rust
//! use statreduce::registry::{FunctionRegistry, RegistryConfig};
//!
//! let registry = FunctionRegistry::with_builtins(RegistryConfig::default());
//!
//! let mut geomean = registry.create("geomean").unwrap();
//! geomean.accumulate(2.0).unwrap();
//! geomean.accumulate(8.0).unwrap();
//!
//! let result = geomean.finalize().unwrap().unwrap();
//! assert!((result - 4.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` + `alloc` and uses `libm` for math
//! - `serde`: Serialization of [`Series`](series::Series) and
//!   [`RegistryConfig`](registry::RegistryConfig)

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

pub mod reducer;
pub mod registry;
pub mod series;
pub mod statistics;

mod math;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::reducer::{evaluate_aggregate, evaluate_window, Frame, StatReducer};
    pub use crate::registry::{FunctionRegistry, RegistryConfig};
    pub use crate::series::Series;
    pub use crate::statistics::{
        GeometricMean, HarmonicMean, Median, Mode, PopulationStdDev, PopulationVariance,
        StatisticKind,
    };
}

pub use reducer::StatReducer;
pub use registry::FunctionRegistry;
pub use series::Series;
pub use traits::{ReduceError, Reducer};
