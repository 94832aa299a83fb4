//! Options bag carried by every resolved element
//!
//! Resolution never reads these; they are copied onto each element for the
//! formatting stage that runs afterwards.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Opaque key/value options passed through to downstream consumers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ElementOptions {
    values: BTreeMap<String, String>,
}

impl ElementOptions {
    /// Create an empty options bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get an option value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
