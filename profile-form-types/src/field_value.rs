use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A live value held by a field.
///
/// Dates are calendar dates in UTC. On the wire they travel as epoch seconds,
/// both in the field description payload and in serialized [`FormValues`](crate::FormValues).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text from inputs, passwords and selections (the selected key).
    Text(String),

    /// Checkbox state.
    Bool(bool),

    /// An integer passed through from a pre-filled payload value.
    Int(i64),

    /// A floating-point number passed through from a pre-filled payload value.
    Float(f64),

    /// A calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// Convert a raw payload scalar. `null`, arrays and objects are not values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert epoch seconds to a date value.
    pub fn date_from_epoch(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(|dt| Self::Date(dt.date_naive()))
    }

    /// Convert back to a JSON scalar, dates as epoch seconds.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::Date(d) => Value::from(epoch_seconds(d)),
        }
    }

    /// The scalar key this value contributes when another field depends on it.
    ///
    /// Blank text has no key.
    pub fn as_key(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) if !s.trim().is_empty() => Some(Cow::Borrowed(s.as_str())),
            Self::Int(i) => Some(Cow::Owned(i.to_string())),
            _ => None,
        }
    }

    /// Whether this is text containing only whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Date(_) => "Date",
        }
    }
}

fn epoch_seconds(date: &NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Date(d) => serializer.serialize_i64(epoch_seconds(d)),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}
