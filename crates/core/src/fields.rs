//! Text-field map collected from a multipart form.
//!
//! The API layer walks the multipart stream once and files every text part
//! into a [`FieldMap`]; file parts are handled separately. Repeated field
//! names (`trek_days`, `inclusions`, ...) accumulate in arrival order.

use std::collections::BTreeMap;

/// Ordered multimap of text form fields.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    values: BTreeMap<String, Vec<String>>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`. Trailing `[]` (array-style field names)
    /// is stripped so `trek_days[]` and `trek_days` address the same key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let mut name = name.into();
        if let Some(stripped) = name.strip_suffix("[]") {
            name = stripped.to_string();
        }
        self.values.entry(name).or_default().push(value.into());
    }

    /// Last value recorded for `name`, if any. A repeated scalar field
    /// overrides earlier occurrences.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// All values recorded for `name`, in arrival order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
