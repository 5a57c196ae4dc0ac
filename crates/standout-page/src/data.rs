//! Template payload.
//!
//! [`TemplateData`] is the schema-less bag of values handed to every page.
//! It serializes as `{"Data": {...}}`, so templates reach a value through the
//! `Data` key:
//!
//! ```jinja
//! <p>{{ Data.payload }}</p>
//! ```
//!
//! Rendering without a payload uses [`TemplateData::default`], which is an
//! empty map rather than a missing value, so templates that never touch
//! `Data` render fine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary key/value data passed through to template execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateData {
    /// The values, addressed in templates as `Data.<key>`.
    #[serde(rename = "Data")]
    pub data: BTreeMap<String, Value>,
}

impl TemplateData {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload from an existing map.
    pub fn from_map(data: BTreeMap<String, Value>) -> Self {
        Self { data }
    }

    /// Adds a value, returning the payload for chaining.
    ///
    /// ```rust
    /// use standout_page::TemplateData;
    ///
    /// let data = TemplateData::new()
    ///     .with("title", "Home")
    ///     .with("count", 3);
    /// assert_eq!(data.get("count"), Some(&serde_json::json!(3)));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Converts the payload into the engine's input value.
    pub(crate) fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
