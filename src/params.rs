//! Request parameter bags and their form encoding.
//!
//! [`QueryParams`] keeps entries in insertion order. Encoding follows the
//! service's query-string conventions:
//!
//! - arrays use bracket notation: `field[]=a&field[]=b`
//! - keys and values are percent-encoded with the strict URI-component set
//!   (only `A-Z a-z 0-9 - _ . ~` stay literal) and spaces become `+`
//! - a null value renders the bare key, an empty array renders nothing

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

use crate::error::OstError;

/// Order in which parameters are serialized (and therefore signed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamOrder {
    /// Keep the order entries were inserted in.
    #[default]
    Insertion,
    /// Sort entries by key before encoding.
    Sorted,
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Textual form of the value, `None` for null.
    ///
    /// Nested lists flatten to comma-joined text.
    fn text(&self) -> Option<String> {
        match self {
            ParamValue::Null => None,
            ParamValue::Bool(b) => Some(b.to_string()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::UInt(n) => Some(n.to_string()),
            ParamValue::Float(f) => Some(format_float(*f)),
            ParamValue::Decimal(d) => Some(d.to_string()),
            ParamValue::Text(s) => Some(s.clone()),
            ParamValue::List(items) => Some(
                items
                    .iter()
                    .map(|item| item.text().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// Convert a JSON value. Objects are not representable as parameters.
    pub fn from_json(value: Value) -> Result<Self, OstError> {
        Ok(match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ParamValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ParamValue::UInt(u)
                } else if let Ok(d) = n.to_string().parse::<Decimal>() {
                    ParamValue::Decimal(d.normalize())
                } else {
                    ParamValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ParamValue::Text(s),
            Value::Array(items) => ParamValue::List(
                items
                    .into_iter()
                    .map(ParamValue::from_json)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(_) => {
                return Err(OstError::InvalidParams(
                    "nested objects cannot be encoded as parameters".to_string(),
                ));
            }
        })
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        value.to_string()
    }
}

macro_rules! impl_from_for_param {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_for_param! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f64 => Float,
    Decimal => Decimal,
    String => Text,
    &str => Text,
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        // Shortest f32 digits, not the widened f64 expansion.
        let shortest = value.to_string().parse().unwrap_or(f64::from(value));
        ParamValue::Float(shortest)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// An insertion-ordered parameter bag.
///
/// # Example
///
/// ```rust
/// use ost_sdk::params::{ParamOrder, QueryParams};
///
/// let params = QueryParams::new()
///     .with("name", "Alice Doe")
///     .with("ids", vec!["a", "b"]);
/// assert_eq!(params.encode(ParamOrder::Insertion), "name=Alice+Doe&ids[]=a&ids[]=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing an existing entry with the same key in place.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Insert a value only when it is present.
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Drop any entry with this key and append the value at the end.
    pub(crate) fn append_overriding(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.remove(key);
        self.entries.push((key.to_string(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a parameter bag from a JSON object, keeping its key order.
    ///
    /// `null` yields an empty bag.
    pub fn from_json(value: Value) -> Result<Self, OstError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => {
                let mut params = Self::new();
                for (key, value) in map {
                    params.insert(key, ParamValue::from_json(value)?);
                }
                Ok(params)
            }
            other => Err(OstError::InvalidParams(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Encode the bag as `application/x-www-form-urlencoded` text.
    pub fn encode(&self, order: ParamOrder) -> String {
        let mut entries: Vec<&(String, ParamValue)> = self.entries.iter().collect();
        if order == ParamOrder::Sorted {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let mut parts = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key = encode_component(key);
            match value {
                ParamValue::Null => parts.push(key),
                ParamValue::List(items) => {
                    for item in items {
                        match item.text() {
                            Some(text) => {
                                parts.push(format!("{key}[]={}", encode_component(&text)))
                            }
                            None => parts.push(format!("{key}[]")),
                        }
                    }
                }
                scalar => {
                    let text = scalar.text().unwrap_or_default();
                    parts.push(format!("{key}={}", encode_component(&text)));
                }
            }
        }
        parts.join("&")
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(ParamOrder::Insertion))
    }
}

/// Percent-encode a key or value with the strict URI-component set, spaces as `+`.
pub(crate) fn encode_component(raw: &str) -> String {
    // form_urlencoded keeps `*` literal and escapes `~`; the strict set is the reverse.
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}
