//! Named parameter bindings supplied per evaluation call
//!
//! Bindings map parameter names to text values. A tree compiled in non-exact
//! mode holds normalized identifiers, so callers either normalize their keys
//! with [`crate::lexical::non_exact_name`] or insert through
//! [`Bindings::set_non_exact`].

use crate::lexical::non_exact_name;
use std::collections::HashMap;

/// Name-to-text parameter map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter under its exact name
    pub fn set(&mut self, name: &str, value: &str) -> &mut Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Bind a parameter under its normalized name
    pub fn set_non_exact(&mut self, name: &str, value: &str) -> &mut Self {
        self.values
            .insert(non_exact_name(name), value.to_string());
        self
    }

    /// Look up a parameter by the name stored in the compiled tree
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameters are bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for Bindings {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
