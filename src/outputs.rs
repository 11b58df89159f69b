//! Per-run output storage
//!
//! One `OutputStore` is created empty at the start of a dispatcher run,
//! owned by that run, and dropped with it. Nothing is shared across runs,
//! so concurrent runs (e.g. concurrent HTTP requests) cannot corrupt each
//! other's named references.

use std::collections::HashMap;

use crate::value::OpValue;

/// Mapping from a declared output name to the last value produced under it
#[derive(Debug, Default)]
pub struct OutputStore {
    values: HashMap<String, OpValue>,
}

impl OutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, overwriting any prior value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: OpValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&OpValue> {
        self.values.get(name)
    }

    /// Whether `name` resolves as a reference.
    ///
    /// A string parameter equal to an existing key is *always* treated as a
    /// reference, never as a literal, so literal string arguments must not
    /// collide with any declared output name.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_and_get() {
        let mut store = OutputStore::new();
        store.insert("x", OpValue::Scalar(json!(42)));

        assert!(store.contains("x"));
        match store.get("x").unwrap() {
            OpValue::Scalar(v) => assert_eq!(v, &json!(42)),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn insert_overwrites() {
        let mut store = OutputStore::new();
        store.insert("x", OpValue::Bool(false));
        store.insert("x", OpValue::Bool(true));

        assert_eq!(store.len(), 1);
        assert!(matches!(store.get("x"), Some(OpValue::Bool(true))));
    }

    #[test]
    fn missing_name_is_not_a_reference() {
        let store = OutputStore::new();
        assert!(!store.contains("data"));
        assert!(store.get("data").is_none());
    }
}
