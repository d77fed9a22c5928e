//! Generator options: a JSON object handed to every generator run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Key under which the validated sources directory is injected.
pub const SOURCES_DIRECTORY_KEY: &str = "sourcesDirectory";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratorOptions(Map<String, Value>);

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only JSON objects.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidOptionShape {
                value: match &other {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                },
                kind: json_kind(&other),
            }),
        }
    }

    /// Parse a JSON document, then check it is an object.
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::MalformedOptions { reason: e.to_string() })?;
        Self::from_value(value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Like [`get_str`](Self::get_str) but fails naming the generator.
    pub fn require_str(&self, generator: &str, key: &str) -> Result<&str, DomainError> {
        self.get_str(key).ok_or_else(|| DomainError::MissingOption {
            generator: generator.to_string(),
            key: key.to_string(),
        })
    }

    pub fn sources_directory(&self) -> Option<&Path> {
        self.get_str(SOURCES_DIRECTORY_KEY).map(Path::new)
    }

    /// `self` overlaid on `defaults`: keys present in `self` win.
    pub fn merged_over(self, defaults: &GeneratorOptions) -> Self {
        let mut merged = defaults.0.clone();
        merged.extend(self.0);
        Self(merged)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Compact JSON, used in log lines.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<Map<String, Value>> for GeneratorOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
