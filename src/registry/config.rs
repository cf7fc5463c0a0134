//! Registry naming configuration

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Default prefix distinguishing window functions from aggregates
pub const DEFAULT_WINDOW_PREFIX: &str = "win";

/// How built-in functions are named in a [`FunctionRegistry`](super::FunctionRegistry)
///
/// With the defaults the median is registered as `median` (aggregate) and
/// `winmedian` (window), and lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Prepended to each base name for the window variant
    pub window_prefix: String,
    /// Match function names exactly instead of folding to lowercase
    pub case_sensitive: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            window_prefix: String::from(DEFAULT_WINDOW_PREFIX),
            case_sensitive: false,
        }
    }
}

impl RegistryConfig {
    /// Use a different window prefix
    pub fn with_window_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.window_prefix = prefix.into();
        self
    }

    /// Toggle case-sensitive name matching
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}
