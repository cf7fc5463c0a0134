//! Numeric series storage
//!
//! This module provides the multiset every reducer keeps its in-scope values
//! in. It supports insertion and removal of single occurrences in O(log n),
//! which is what window functions need when rows leave a sliding frame.
//!
//! # Example
//!
//! ```
//! use statreduce::series::Series;
//!
//! let mut series = Series::new();
//!
//! for value in [3.0, 1.0, 2.0, 2.0] {
//!     series.add(value);
//! }
//!
//! assert_eq!(series.mode(), Some(2.0));
//! assert_eq!(series.median(), Some(2.0));
//!
//! series.remove(2.0).unwrap();
//! assert_eq!(series.sorted_values(), vec![1.0, 2.0, 3.0]);
//! ```

mod multiset;

pub use multiset::Series;
