//! Property context
//!
//! The property bag of one subject (person, event, group) being evaluated.
//! A context is built per evaluation call and only read by the matcher.

use flagprop_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Property values keyed by property name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyContext {
    properties: HashMap<String, Value>,
}

impl PropertyContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(properties: HashMap<String, Value>) -> Self {
        Self { properties }
    }

    /// Build a context from a JSON object; any other JSON shape yields `None`.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match Value::from(json) {
            Value::Object(properties) => Some(Self { properties }),
            _ => None,
        }
    }

    /// Add a property (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Raw lookup, `Some(&Value::Null)` for an explicit null
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Lookup treating an explicit null the same as an absent key
    pub fn value_of(&self, key: &str) -> Option<&Value> {
        match self.properties.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(String, Value)> for PropertyContext {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}
