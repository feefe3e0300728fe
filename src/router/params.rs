//! Route parameters.

use indexmap::IndexMap;
use serde::Serialize;

/// Captured or provided value of one dynamic segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `[id]`
    One(String),
    /// `[...slug]`, `[[...slug]]`
    Many(Vec<String>),
}

impl ParamValue {
    /// Segments this value expands to.
    pub fn segments(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Append a value, turning a single value into a list.
    pub fn push(&mut self, value: String) {
        match self {
            Self::One(first) => *self = Self::Many(vec![std::mem::take(first), value]),
            Self::Many(values) => values.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// `name -> value`, in pattern order.
pub type RouteParams = IndexMap<String, ParamValue>;

/// Collect `key=value` pairs; a repeated key becomes a list.
pub fn params_from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> RouteParams {
    let mut params = RouteParams::new();
    for (key, value) in pairs {
        match params.get_mut(key) {
            Some(existing) => existing.push(value.to_string()),
            None => {
                params.insert(key.to_string(), ParamValue::from(value));
            }
        }
    }
    params
}
