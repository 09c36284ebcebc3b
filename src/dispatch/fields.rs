//! Command input fields
//!
//! A flat map of named, loosely-typed values as a client submits them:
//! decoded JSON numbers (integer or float literals) or numeric strings.

use serde_json::{Map, Value};

use crate::error::{Result, SliderError};

/// Named numeric inputs for one command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a JSON object; `null` counts as no fields
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(SliderError::Validation(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a request body; an empty body means no fields
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SliderError::Validation(format!("invalid JSON body: {}", e)))?;
        Self::from_json(value)
    }

    /// Parse `name=value` pairs (command line input)
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                SliderError::Validation(format!("expected name=value, got {:?}", pair))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(SliderError::Validation(format!(
                    "missing field name in {:?}",
                    pair
                )));
            }
            fields.insert(name, value.trim());
        }
        Ok(fields)
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a float field, falling back to `default` when absent
    pub fn float(&self, name: &str, default: f64) -> Result<f64> {
        let Some(value) = self.0.get(name) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(name, value, "a finite number")),
        }
    }

    /// Read an integer field, falling back to `default` when absent
    ///
    /// Float literals are truncated toward zero; strings must be integers.
    pub fn int(&self, name: &str, default: i64) -> Result<i64> {
        let Some(value) = self.0.get(name) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| invalid(name, value, "an integer"))
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn invalid(name: &str, value: &Value, expected: &str) -> SliderError {
    SliderError::Validation(format!(
        "field '{}' must be {}, got {}",
        name, expected, value
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
