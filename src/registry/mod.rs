//! Function registration table
//!
//! A host SQL engine resolves function names to reducer constructors through
//! a [`FunctionRegistry`]. It is an ordinary value built once at startup; the
//! crate keeps no global state.
//!
//! # Example
//!
//! ```
//! use statreduce::registry::{FunctionRegistry, RegistryConfig};
//! use statreduce::traits::ReducerMode;
//!
//! let registry = FunctionRegistry::with_builtins(RegistryConfig::default());
//!
//! let mut winmode = registry.create("winmode").unwrap();
//! assert_eq!(winmode.mode(), ReducerMode::Window);
//!
//! for value in [3.0, 1.0, 3.0] {
//!     winmode.accumulate(value).unwrap();
//! }
//! assert_eq!(winmode.value(), Ok(Some(3.0)));
//!
//! winmode.retract(3.0).unwrap();
//! assert_eq!(winmode.value(), Ok(Some(1.0)));
//! ```

mod config;

pub use config::{RegistryConfig, DEFAULT_WINDOW_PREFIX};

use thiserror::Error;
use tracing::{debug, warn};

use crate::statistics::StatisticKind;
use crate::traits::{Reducer, ReducerMode};

#[cfg(feature = "std")]
use std::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, collections::BTreeMap, format, string::String, vec::Vec};

/// Error raised while registering or resolving functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No function is registered under this name
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    /// A function is already registered under this name
    #[error("function `{0}` is already registered")]
    DuplicateFunction(String),
}

/// One registered SQL function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionEntry {
    /// Statistic computed by the function
    pub statistic: StatisticKind,
    /// Aggregate or window semantics
    pub mode: ReducerMode,
}

impl FunctionEntry {
    /// Construct a fresh, started reducer
    pub fn create(&self) -> Box<dyn Reducer> {
        self.statistic.reducer(self.mode)
    }
}

/// Mapping from SQL function name to reducer constructor
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, FunctionEntry>,
    config: RegistryConfig,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            functions: BTreeMap::new(),
            config,
        }
    }

    /// Create a registry holding every statistic as an aggregate and a window function
    ///
    /// A window name that collides with an aggregate name (an empty prefix, or
    /// a prefix that turns one base name into another) is skipped with a
    /// warning and the aggregate keeps the name.
    pub fn with_builtins(config: RegistryConfig) -> Self {
        let mut registry = Self::new(config);
        let skipped = registry.register_builtins();
        debug!(
            functions = registry.len(),
            skipped = skipped.len(),
            window_prefix = %registry.config.window_prefix,
            "registered built-in reducers"
        );
        registry
    }

    /// Like [`with_builtins`](Self::with_builtins), but fail on the first
    /// name collision instead of skipping it
    pub fn try_with_builtins(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new(config);
        match registry.register_builtins().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(registry),
        }
    }

    /// Register every built-in, returning the registrations that were skipped
    fn register_builtins(&mut self) -> Vec<RegistryError> {
        let mut skipped = Vec::new();
        for statistic in StatisticKind::ALL {
            let base = statistic.sql_name();
            let window = format!("{}{}", self.config.window_prefix, base);
            for (name, mode) in [
                (base, ReducerMode::Aggregate),
                (window.as_str(), ReducerMode::Window),
            ] {
                if let Err(err) = self.register(name, statistic, mode) {
                    warn!(
                        statistic = statistic.sql_name(),
                        ?mode,
                        %err,
                        "skipping built-in registration"
                    );
                    skipped.push(err);
                }
            }
        }
        skipped
    }

    /// The naming configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn normalize(&self, name: &str) -> String {
        if self.config.case_sensitive {
            String::from(name)
        } else {
            name.to_lowercase()
        }
    }

    /// Register `statistic` under `name`
    pub fn register(
        &mut self,
        name: &str,
        statistic: StatisticKind,
        mode: ReducerMode,
    ) -> Result<(), RegistryError> {
        let key = self.normalize(name);
        if self.functions.contains_key(&key) {
            return Err(RegistryError::DuplicateFunction(key));
        }
        debug!(name = %key, %statistic, ?mode, "register function");
        self.functions.insert(key, FunctionEntry { statistic, mode });
        Ok(())
    }

    /// Make `alias` resolve to the same function as `target`
    pub fn register_alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let entry = *self
            .get(target)
            .ok_or_else(|| RegistryError::UnknownFunction(self.normalize(target)))?;
        self.register(alias, entry.statistic, entry.mode)
    }

    /// Look up a function
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(&self.normalize(name))
    }

    /// Check whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Construct a fresh, started reducer for `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn Reducer>, RegistryError> {
        self.get(name)
            .map(FunctionEntry::create)
            .ok_or_else(|| RegistryError::UnknownFunction(self.normalize(name)))
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Registered names and entries in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionEntry)> {
        self.functions.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if no function is registered
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
