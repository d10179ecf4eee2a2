//! Configuration constant store.

use std::collections::HashMap;

use crate::config::schema::ConstantConfig;

/// Flat, read-only mapping from constant name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantStore {
    values: HashMap<String, String>,
}

impl ConstantStore {
    /// Build from validated config entries.
    /// Names are unique after validation; a repeated name keeps the last value.
    pub fn from_config(entries: &[ConstantConfig]) -> Self {
        Self {
            values: entries
                .iter()
                .map(|c| (c.name.clone(), c.value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
