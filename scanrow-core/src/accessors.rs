use crate::{RowStore, Scalar, Value};
use atoi::FromRadix10SignedChecked;

/// Parses the whole of `text` as a base-10 integer with an optional sign.
pub(crate) fn parse_int(text: &[u8]) -> Option<i64> {
    if !text.last().is_some_and(u8::is_ascii_digit) {
        return None;
    }
    match i64::from_radix_10_signed_checked(text) {
        (Some(value), used) if used == text.len() => Some(value),
        _ => None,
    }
}

pub(crate) fn parse_float(text: &str) -> Option<f64> {
    fast_float::parse::<f64, _>(text).ok()
}

impl RowStore {
    /// Integer value of `key`: native integers as they are, text and blobs
    /// parsed as decimal numbers. `None` for anything else, including NULL.
    pub fn check_int(&self, key: &str) -> Option<i64> {
        self.with_value(key, |value| match value {
            Value::Int64(v) => Some(*v),
            Value::Varchar(v) => parse_int(v.as_bytes()),
            Value::Blob(v) => parse_int(v),
            Value::Null | Value::Float64(..) => None,
        })
        .flatten()
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.check_int(key).unwrap_or_default()
    }

    /// Text form of `key`. NULL is a valid empty string, only an unknown
    /// column fails.
    pub fn check_string(&self, key: &str) -> Option<String> {
        self.with_value(key, |value| match value {
            Value::Null => String::new(),
            Value::Int64(v) => itoa::Buffer::new().format(*v).to_owned(),
            Value::Float64(v) => ryu::Buffer::new().format(*v).to_owned(),
            Value::Varchar(v) => v.clone(),
            Value::Blob(v) => String::from_utf8_lossy(v).into_owned(),
        })
    }

    pub fn get_string(&self, key: &str) -> String {
        self.check_string(key).unwrap_or_default()
    }

    /// Only native integers are booleans, true when positive.
    pub fn check_bool(&self, key: &str) -> Option<bool> {
        self.with_value(key, |value| match value {
            Value::Int64(v) => Some(*v > 0),
            _ => None,
        })
        .flatten()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.check_bool(key).unwrap_or_default()
    }

    /// The text form of `key` parsed as a decimal number.
    pub fn check_float(&self, key: &str) -> Option<f64> {
        self.with_value(key, |value| match value {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            _ => None,
        })
        .flatten()
        .or_else(|| parse_float(&self.check_string(key)?))
    }

    pub fn get_float(&self, key: &str) -> f64 {
        self.check_float(key).unwrap_or_default()
    }

    /// First successful conversion among string, integer and boolean.
    pub fn get_interface(&self, key: &str) -> Scalar {
        if let Some(v) = self.check_string(key) {
            Scalar::Text(v)
        } else if let Some(v) = self.check_int(key) {
            Scalar::Integer(v)
        } else if let Some(v) = self.check_bool(key) {
            Scalar::Boolean(v)
        } else {
            Scalar::Empty
        }
    }
}
