//! Dynamic domain objects and JSON hydration.
//!
//! The Tassi API is schema-less from the client's point of view:
//! responses are arbitrary JSON whose shape is owned by the server. This
//! module provides the uniform in-memory representation for that data —
//! [`TassiValue`], a tagged union over the JSON data model, and
//! [`TassiObject`], the attribute bag used for every JSON object.
//!
//! Hydration ([`TassiValue::hydrate`]) is a one-way, lossless,
//! structure-preserving projection: every key present in the source JSON
//! object is present in the result, nested objects become
//! [`TassiObject`]s recursively, arrays map element-wise, and scalars
//! pass through unchanged. No schema validation and no type coercion is
//! performed.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tassi_api::TassiValue;
//!
//! let value = TassiValue::hydrate(json!({"id": 4, "weight": "5.0"}));
//! let package = value.as_object().unwrap();
//!
//! assert_eq!(package.get_i64("id"), Some(4));
//! assert_eq!(package.get_str("weight"), Some("5.0"));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

/// A hydrated JSON value: a scalar, a sequence, or a [`TassiObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum TassiValue {
    /// JSON `null`.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar, kept in `serde_json`'s arbitrary representation.
    Number(Number),
    /// A string scalar.
    String(String),
    /// A sequence of hydrated values.
    Array(Vec<TassiValue>),
    /// A nested domain object.
    Object(TassiObject),
}

impl TassiValue {
    /// Recursively converts a raw JSON value into its hydrated form.
    #[must_use]
    pub fn hydrate(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::hydrate).collect()),
            Value::Object(map) => Self::Object(TassiObject::hydrate_map(map)),
        }
    }

    /// Projects the hydrated value back into raw JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Number(number) => Value::Number(number.clone()),
            Self::String(text) => Value::String(text.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(object) => Value::Object(object.to_json_map()),
        }
    }

    /// Returns `true` for [`TassiValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean scalar, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integral number.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Returns the value as a `u64`, if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, if it is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Returns the string scalar, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the sequence, if this is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&[TassiValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested object, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&TassiObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<Value> for TassiValue {
    fn from(value: Value) -> Self {
        Self::hydrate(value)
    }
}

/// A dynamic domain object: an ordered mapping from attribute name to
/// hydrated value.
///
/// Objects are created by hydration and may be freely mutated by callers
/// afterwards; the transport never mutates them. The optional `id`
/// attribute is what instance paths are built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TassiObject {
    attributes: BTreeMap<String, TassiValue>,
}

impl TassiObject {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn hydrate_map(map: Map<String, Value>) -> Self {
        let attributes = map
            .into_iter()
            .map(|(key, value)| (key, TassiValue::hydrate(value)))
            .collect();
        Self { attributes }
    }

    fn to_json_map(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }

    /// Returns the attribute stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TassiValue> {
        self.attributes.get(key)
    }

    /// Returns the `id` attribute, if present.
    #[must_use]
    pub fn id(&self) -> Option<&TassiValue> {
        self.get("id")
    }

    /// Returns the attribute under `key` as a string scalar.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TassiValue::as_str)
    }

    /// Returns the attribute under `key` as an `i64`.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(TassiValue::as_i64)
    }

    /// Returns the attribute under `key` as a `u64`.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(TassiValue::as_u64)
    }

    /// Returns the attribute under `key` as an `f64`.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(TassiValue::as_f64)
    }

    /// Returns the attribute under `key` as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(TassiValue::as_bool)
    }

    /// Returns the attribute under `key` as a nested object.
    #[must_use]
    pub fn get_object(&self, key: &str) -> Option<&TassiObject> {
        self.get(key).and_then(TassiValue::as_object)
    }

    /// Returns the attribute under `key` as a sequence.
    #[must_use]
    pub fn get_array(&self, key: &str) -> Option<&[TassiValue]> {
        self.get(key).and_then(TassiValue::as_array)
    }

    /// Inserts or replaces an attribute, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: TassiValue) -> Option<TassiValue> {
        self.attributes.insert(key.into(), value)
    }

    /// Removes an attribute, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<TassiValue> {
        self.attributes.remove(key)
    }

    /// Returns `true` if an attribute named `key` exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the object has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates over the attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TassiValue)> {
        self.attributes.iter()
    }

    /// Serializes every attribute except `id` back into a JSON parameter
    /// mapping, for re-submitting a mutated object to the API.
    #[must_use]
    pub fn to_params(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }
}
