//! Ordered multiset of real numbers
//!
//! Values are kept in a value → multiplicity map ordered by value, alongside a
//! multiplicity → values index so the most frequent value can be found without
//! scanning.

use ordered_float::OrderedFloat;

use crate::traits::ReduceError;

#[cfg(feature = "std")]
use std::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};

type Key = OrderedFloat<f64>;

/// Canonical map key; folds `-0.0` into `+0.0`
#[inline]
fn key(value: f64) -> Key {
    OrderedFloat(value + 0.0)
}

/// Multiset of the values currently in scope for one reducer
///
/// Every added occurrence can be removed exactly once, independently of other
/// occurrences of the same value.
///
/// | operation | cost |
/// |---|---|
/// | `add`, `remove` | O(log n) |
/// | `mode`, `min`, `max`, `frequency` | O(log n) |
/// | `median` | O(distinct values) |
/// | `sorted_values` | O(n) |
///
/// # Example
///
/// ```
/// use statreduce::series::Series;
///
/// let mut series = Series::new();
/// series.add(1.0);
/// series.add(1.0);
/// series.add(4.0);
///
/// assert_eq!(series.count(), 3);
/// assert_eq!(series.frequency(1.0), 2);
///
/// series.remove(1.0).unwrap();
/// series.remove(1.0).unwrap();
/// assert!(series.remove(1.0).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    /// Value → number of occurrences
    counts: BTreeMap<Key, u64>,
    /// Number of occurrences → values having exactly that many
    by_frequency: BTreeMap<u64, BTreeSet<Key>>,
    /// Total number of occurrences
    len: u64,
}

impl Series {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one occurrence of `value`
    ///
    /// Callers are expected to pass finite values; the reducer layer rejects
    /// NaN and infinities before they reach the series.
    pub fn add(&mut self, value: f64) {
        self.add_count(value, 1);
    }

    /// Insert `count` occurrences of `value`
    pub fn add_count(&mut self, value: f64, count: u64) {
        if count == 0 {
            return;
        }
        let k = key(value);
        let entry = self.counts.entry(k).or_insert(0);
        let old = *entry;
        *entry += count;
        let new = *entry;

        self.unindex(old, k);
        self.by_frequency.entry(new).or_default().insert(k);
        self.len += count;
    }

    /// Remove exactly one occurrence of `value`
    ///
    /// Fails with [`ReduceError::NotPresent`] if no occurrence remains.
    pub fn remove(&mut self, value: f64) -> Result<(), ReduceError> {
        let k = key(value);
        let old = match self.counts.get_mut(&k) {
            Some(count) => {
                let old = *count;
                *count -= 1;
                old
            }
            None => return Err(ReduceError::NotPresent(value)),
        };

        self.unindex(old, k);
        if old == 1 {
            self.counts.remove(&k);
        } else {
            self.by_frequency.entry(old - 1).or_default().insert(k);
        }
        self.len -= 1;
        Ok(())
    }

    /// Drop `k` from the bucket of values seen `count` times
    fn unindex(&mut self, count: u64, k: Key) {
        if count == 0 {
            return;
        }
        if let Some(bucket) = self.by_frequency.get_mut(&count) {
            bucket.remove(&k);
            if bucket.is_empty() {
                self.by_frequency.remove(&count);
            }
        }
    }

    /// Number of occurrences in the series
    pub fn count(&self) -> u64 {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct values
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of occurrences of `value`
    pub fn frequency(&self, value: f64) -> u64 {
        self.counts.get(&key(value)).copied().unwrap_or(0)
    }

    /// Check whether at least one zero is in scope
    pub fn contains_zero(&self) -> bool {
        self.counts.contains_key(&key(0.0))
    }

    /// Smallest value
    pub fn min(&self) -> Option<f64> {
        self.counts.keys().next().map(|k| k.0)
    }

    /// Largest value
    pub fn max(&self) -> Option<f64> {
        self.counts.keys().next_back().map(|k| k.0)
    }

    /// Distinct values with their multiplicities, ascending
    pub fn iter(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.counts.iter().map(|(k, &count)| (k.0, count))
    }

    /// Every occurrence, repeats included
    pub fn raw_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter()
            .flat_map(|(value, count)| core::iter::repeat(value).take(count as usize))
    }

    /// Every occurrence in ascending order
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len as usize);
        out.extend(self.raw_values());
        out
    }

    /// Most frequent value; ties go to the smallest value
    pub fn mode(&self) -> Option<f64> {
        self.by_frequency
            .values()
            .next_back()
            .and_then(|bucket| bucket.iter().next())
            .map(|k| k.0)
    }

    /// Middle value, or the mean of the two middle values for an even count
    pub fn median(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        let upper_rank = self.len / 2;
        let lower_rank = if self.len % 2 == 0 {
            upper_rank - 1
        } else {
            upper_rank
        };

        let mut seen = 0u64;
        let mut lower = None;
        for (value, count) in self.iter() {
            seen += count;
            if lower.is_none() && seen > lower_rank {
                lower = Some(value);
            }
            if seen > upper_rank {
                return lower.map(|lo| {
                    if lower_rank == upper_rank {
                        value
                    } else {
                        midpoint(lo, value)
                    }
                });
            }
        }
        None
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.counts.clear();
        self.by_frequency.clear();
        self.len = 0;
    }
}

/// Mean of two finite values without overflowing near `f64::MAX`
fn midpoint(lo: f64, hi: f64) -> f64 {
    if (lo < 0.0) == (hi < 0.0) {
        lo + (hi - lo) / 2.0
    } else {
        (lo + hi) / 2.0
    }
}

impl Extend<f64> for Series {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut series = Series::new();
        series.extend(iter);
        series
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Series {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let values: Vec<(f64, u64)> = self.iter().collect();
        let mut state = serializer.serialize_struct("Series", 2)?;
        state.serialize_field("values", &values)?;
        state.serialize_field("count", &self.len)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct SeriesData {
            values: Vec<(f64, u64)>,
            count: u64,
        }

        let data = SeriesData::deserialize(deserializer)?;
        let mut series = Series::new();
        let mut total = 0u64;
        for (value, count) in data.values {
            if !value.is_finite() {
                return Err(serde::de::Error::custom("series values must be finite"));
            }
            // Per-value counts never exceed the total, so checking it suffices
            total = total
                .checked_add(count)
                .ok_or_else(|| serde::de::Error::custom("series multiplicities overflow u64"))?;
            series.add_count(value, count);
        }
        if series.len != data.count {
            return Err(serde::de::Error::custom(
                "series count does not match the stored multiplicities",
            ));
        }
        Ok(series)
    }
}
