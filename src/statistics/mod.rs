//! Statistic engines
//!
//! Each engine reads a [`Series`] snapshot and produces a result. An empty
//! series gives `None`; the means fail with [`ReduceError::Undefined`] when a
//! negative value is in scope and no zero is:
//!
//! | Statistic | Empty series | Contains a zero | Negative, no zero | Otherwise |
//! |---|---|---|---|---|
//! | [`GeometricMean`] | `None` | `Some(0.0)` | `Undefined` | geometric mean |
//! | [`HarmonicMean`] | `None` | `Some(0.0)` | `Undefined` | harmonic mean |
//! | [`Mode`] | `None` | | | most frequent, ties to the smallest |
//! | [`Median`] | `None` | | | middle value or mean of the two middles |
//! | [`PopulationStdDev`] | `None` | | | square root of the variance |
//! | [`PopulationVariance`] | `None` | | | divisor n |
//!
//! # Example
//!
//! ```
//! use statreduce::series::Series;
//! use statreduce::statistics::{HarmonicMean, StatisticKind};
//! use statreduce::traits::Statistic;
//!
//! let series: Series = [2.0, 8.0].into_iter().collect();
//!
//! assert!((HarmonicMean.evaluate(&series).unwrap().unwrap() - 3.2).abs() < 1e-12);
//! assert_eq!(StatisticKind::Median.evaluate(&series), Ok(Some(5.0)));
//! ```

mod means;
mod moments;
mod order;

pub use means::{GeometricMean, HarmonicMean};
pub use moments::{Moments, PopulationStdDev, PopulationVariance};
pub use order::{Median, Mode};

use crate::reducer::StatReducer;
use crate::series::Series;
use crate::traits::{ReduceError, Reducer, ReducerMode, Statistic};

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// The closed set of supported statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatisticKind {
    GeometricMean,
    HarmonicMean,
    Mode,
    Median,
    PopulationStdDev,
    PopulationVariance,
}

impl StatisticKind {
    /// Every statistic, in registration order
    pub const ALL: [StatisticKind; 6] = [
        StatisticKind::GeometricMean,
        StatisticKind::HarmonicMean,
        StatisticKind::Mode,
        StatisticKind::Median,
        StatisticKind::PopulationStdDev,
        StatisticKind::PopulationVariance,
    ];

    /// Base SQL function name, e.g. `geomean`
    pub fn sql_name(self) -> &'static str {
        match self {
            StatisticKind::GeometricMean => "geomean",
            StatisticKind::HarmonicMean => "harmomean",
            StatisticKind::Mode => "mode",
            StatisticKind::Median => "median",
            StatisticKind::PopulationStdDev => "stdev",
            StatisticKind::PopulationVariance => "variance",
        }
    }

    /// Look up a statistic by its base SQL name, ignoring ASCII case
    pub fn from_sql_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.sql_name().eq_ignore_ascii_case(name))
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            StatisticKind::GeometricMean => GeometricMean::NAME,
            StatisticKind::HarmonicMean => HarmonicMean::NAME,
            StatisticKind::Mode => Mode::NAME,
            StatisticKind::Median => Median::NAME,
            StatisticKind::PopulationStdDev => PopulationStdDev::NAME,
            StatisticKind::PopulationVariance => PopulationVariance::NAME,
        }
    }

    /// Evaluate this statistic over `series`
    pub fn evaluate(self, series: &Series) -> Result<Option<f64>, ReduceError> {
        match self {
            StatisticKind::GeometricMean => GeometricMean.evaluate(series),
            StatisticKind::HarmonicMean => HarmonicMean.evaluate(series),
            StatisticKind::Mode => Mode.evaluate(series),
            StatisticKind::Median => Median.evaluate(series),
            StatisticKind::PopulationStdDev => PopulationStdDev.evaluate(series),
            StatisticKind::PopulationVariance => PopulationVariance.evaluate(series),
        }
    }

    /// Create a fresh reducer instance for this statistic
    pub fn reducer(self, mode: ReducerMode) -> Box<dyn Reducer> {
        match self {
            StatisticKind::GeometricMean => Box::new(StatReducer::<GeometricMean>::new(mode)),
            StatisticKind::HarmonicMean => Box::new(StatReducer::<HarmonicMean>::new(mode)),
            StatisticKind::Mode => Box::new(StatReducer::<Mode>::new(mode)),
            StatisticKind::Median => Box::new(StatReducer::<Median>::new(mode)),
            StatisticKind::PopulationStdDev => {
                Box::new(StatReducer::<PopulationStdDev>::new(mode))
            }
            StatisticKind::PopulationVariance => {
                Box::new(StatReducer::<PopulationVariance>::new(mode))
            }
        }
    }
}

impl core::fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
