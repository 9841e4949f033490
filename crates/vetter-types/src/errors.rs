//! Error payloads and the error map they are filed into.
//!
//! Serialized shape:
//!
//! ```json
//! {
//!   "email": "Email cannot be empty",
//!   "password": ["Password must contain a digit", "Password must contain an uppercase letter"],
//!   "_error": { "_message": "Account locked", "_redirection": [{ "href": "/contact", "title": "Contact us" }] }
//! }
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A link attached to an error, already interpolated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirection {
    pub href: String,
    pub title: String,
}

/// What one failing rule contributes to the error map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// A bare message.
    Message(String),
    /// A message with links.
    Linked {
        #[serde(rename = "_message")]
        message: String,
        #[serde(rename = "_redirection")]
        redirection: Vec<Redirection>,
    },
}

impl ErrorPayload {
    pub fn message(&self) -> &str {
        match self {
            ErrorPayload::Message(message) => message,
            ErrorPayload::Linked { message, .. } => message,
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        ErrorPayload::Message(message.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        ErrorPayload::Message(message)
    }
}

/// Everything filed under one output key.
///
/// A single payload stays scalar; a second one turns the entry into a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    Many(Vec<ErrorPayload>),
    One(ErrorPayload),
}

impl ErrorEntry {
    /// Append a payload, promoting a scalar entry to a list.
    pub fn push(&mut self, payload: ErrorPayload) {
        match self {
            ErrorEntry::Many(list) => list.push(payload),
            ErrorEntry::One(_) => {
                let first = std::mem::replace(self, ErrorEntry::Many(Vec::with_capacity(2)));
                if let (ErrorEntry::One(first), ErrorEntry::Many(list)) = (first, &mut *self) {
                    list.push(first);
                    list.push(payload);
                }
            }
        }
    }

    /// Payloads in filing order.
    pub fn payloads(&self) -> &[ErrorPayload] {
        match self {
            ErrorEntry::One(payload) => std::slice::from_ref(payload),
            ErrorEntry::Many(list) => list,
        }
    }

    /// Messages in filing order.
    pub fn messages(&self) -> Vec<&str> {
        self.payloads().iter().map(ErrorPayload::message).collect()
    }
}

/// Output key → filed errors, in first-filed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, ErrorEntry)>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a payload under `key`, merging with anything already there.
    pub fn file(&mut self, key: impl Into<String>, payload: ErrorPayload) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, entry)) => entry.push(payload),
            None => self.entries.push((key, ErrorEntry::One(payload))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Output keys in first-filed order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorEntry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a plain JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, entry)| {
                    let value = serde_json::to_value(entry).unwrap_or(serde_json::Value::Null);
                    (k.clone(), value)
                })
                .collect(),
        )
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ErrorMapVisitor;

        impl<'de> Visitor<'de> for ErrorMapVisitor {
            type Value = ErrorMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of output keys to error entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ErrorMap, A::Error> {
                let mut map = ErrorMap::new();
                while let Some((key, entry)) = access.next_entry::<String, ErrorEntry>()? {
                    map.entries.push((key, entry));
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ErrorMapVisitor)
    }
}

impl<K: Into<String>> FromIterator<(K, ErrorPayload)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, ErrorPayload)>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for (key, payload) in iter {
            map.file(key, payload);
        }
        map
    }
}
