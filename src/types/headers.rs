//! Ordered header bag carried by a [`Message`](super::Message).
//!
//! Headers hold both ordinary custom MIME headers and Mailgun options stored
//! under the reserved `X-Mailgun-` prefix. Iteration follows insertion order;
//! setting an existing name replaces the value in place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A header value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// A single string.
    Text(String),
    /// A sequence of strings.
    List(Vec<String>),
    /// A mapping whose values may be nested structures.
    Map(Map<String, Value>),
}

impl HeaderValue {
    /// Returns true for an empty string, list, or mapping.
    pub fn is_empty(&self) -> bool {
        match self {
            HeaderValue::Text(text) => text.is_empty(),
            HeaderValue::List(items) => items.is_empty(),
            HeaderValue::Map(map) => map.is_empty(),
        }
    }

    /// Returns the string value, if this is [`HeaderValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(value: Vec<String>) -> Self {
        HeaderValue::List(value)
    }
}

impl From<Vec<&str>> for HeaderValue {
    fn from(value: Vec<&str>) -> Self {
        HeaderValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<Map<String, Value>> for HeaderValue {
    fn from(value: Map<String, Value>) -> Self {
        HeaderValue::Map(value)
    }
}

/// Insertion-ordered collection of headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headers {
    entries: Vec<(String, HeaderValue)>,
}

impl Headers {
    /// Create an empty header bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header. An existing header with the same name (ASCII
    /// case-insensitive) keeps its position and takes the new name and value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, value),
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Get a header value by name (ASCII case-insensitive).
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Remove a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<HeaderValue> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Merge another header bag into this one, in the other bag's order.
    pub fn merge(&mut self, other: Headers) -> &mut Self {
        for (name, value) in other.entries {
            self.set(name, value);
        }
        self
    }

    /// Iterate headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no headers are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
