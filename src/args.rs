//! Resolved keyword arguments for one operation call
//!
//! After the dispatcher substitutes output references, every node call is a
//! flat map of argument name to [`OpValue`]. Operations pull what they need
//! through the typed accessors here; missing or mis-typed arguments turn
//! into the corresponding [`TabulaError`] variants.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::error::TabulaError;
use crate::frame::Frame;
use crate::value::OpValue;

#[derive(Debug, Default)]
pub struct OpArgs {
    values: HashMap<String, OpValue>,
}

impl OpArgs {
    pub fn new(values: HashMap<String, OpValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&OpValue> {
        self.values.get(name)
    }

    /// Required frame argument
    pub fn frame(&self, name: &str) -> Result<&Frame, TabulaError> {
        match self.values.get(name) {
            Some(OpValue::Frame(f)) => Ok(f),
            Some(other) => Err(TabulaError::TypeArgument {
                name: name.to_string(),
                got: other.kind().to_string(),
            }),
            None => Err(TabulaError::MissingArgument(name.to_string())),
        }
    }

    fn scalar_of(&self, name: &str) -> Result<&JsonValue, TabulaError> {
        match self.values.get(name) {
            Some(OpValue::Scalar(v)) => Ok(v),
            Some(other) => Err(TabulaError::argument(
                name,
                format!("expected a literal, got {}", other.kind()),
            )),
            None => Err(TabulaError::MissingArgument(name.to_string())),
        }
    }

    /// Required scalar argument (any JSON shape)
    pub fn scalar(&self, name: &str) -> Result<&JsonValue, TabulaError> {
        self.scalar_of(name)
    }

    /// Required string argument
    pub fn str(&self, name: &str) -> Result<&str, TabulaError> {
        self.scalar_of(name)?
            .as_str()
            .ok_or_else(|| TabulaError::argument(name, "expected a string"))
    }

    /// Optional string argument
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, TabulaError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(_) => self.str(name).map(Some),
        }
    }

    /// Required integer argument
    pub fn usize(&self, name: &str) -> Result<usize, TabulaError> {
        self.scalar_of(name)?
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| TabulaError::argument(name, "expected a non-negative integer"))
    }

    /// Optional integer argument
    pub fn opt_usize(&self, name: &str) -> Result<Option<usize>, TabulaError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(_) => self.usize(name).map(Some),
        }
    }

    /// Optional u64 argument (seeds)
    pub fn opt_u64(&self, name: &str) -> Result<Option<u64>, TabulaError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(_) => self
                .scalar_of(name)?
                .as_u64()
                .map(Some)
                .ok_or_else(|| TabulaError::argument(name, "expected a non-negative integer")),
        }
    }

    /// Required float argument
    pub fn f64(&self, name: &str) -> Result<f64, TabulaError> {
        self.scalar_of(name)?
            .as_f64()
            .ok_or_else(|| TabulaError::argument(name, "expected a number"))
    }

    /// Optional boolean with a default
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, TabulaError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(_) => self
                .scalar_of(name)?
                .as_bool()
                .ok_or_else(|| TabulaError::argument(name, "expected a boolean")),
        }
    }

    /// Required list of column names; a bare string counts as a one-element
    /// list, matching how documents usually write single-column subsets.
    pub fn str_list(&self, name: &str) -> Result<Vec<String>, TabulaError> {
        match self.scalar_of(name)? {
            JsonValue::String(s) => Ok(vec![s.clone()]),
            JsonValue::Array(items) => items
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| TabulaError::argument(name, "expected a list of strings"))
                })
                .collect(),
            _ => Err(TabulaError::argument(
                name,
                "expected a string or a list of strings",
            )),
        }
    }

    /// Optional list of column names
    pub fn opt_str_list(&self, name: &str) -> Result<Option<Vec<String>>, TabulaError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(_) => self.str_list(name).map(Some),
        }
    }

    /// Required string-to-string mapping (column renames)
    pub fn mapping(&self, name: &str) -> Result<Vec<(String, String)>, TabulaError> {
        match self.scalar_of(name)? {
            JsonValue::Object(map) => map
                .iter()
                .map(|(k, v)| {
                    v.as_str()
                        .map(|s| (k.clone(), s.to_string()))
                        .ok_or_else(|| {
                            TabulaError::argument(name, "mapping values must be strings")
                        })
                })
                .collect(),
            _ => Err(TabulaError::argument(name, "expected a mapping")),
        }
    }
}
