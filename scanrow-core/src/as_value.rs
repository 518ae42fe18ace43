use crate::{Path, Point, Value};
use std::borrow::Cow;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Conversion of native values into query parameters.
///
/// Drivers only ever see [`Value`]: integers widen to `Int64`, floats to
/// `Float64`, booleans become `0` / `1` and `None` becomes `Null`.
///
/// # Examples
/// ```rust
/// use scanrow_core::{AsValue, Value};
/// assert_eq!(42i32.as_value(), Value::Int64(42));
/// assert_eq!(None::<String>.as_value(), Value::Null);
/// ```
pub trait AsValue {
    fn as_value(self) -> Value;
}

macro_rules! impl_as_value {
    ($source:ty, $into:path, $via:ty) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                $into(self as $via)
            }
        }
    };
}

impl_as_value!(i8, Value::Int64, i64);
impl_as_value!(i16, Value::Int64, i64);
impl_as_value!(i32, Value::Int64, i64);
impl_as_value!(i64, Value::Int64, i64);
impl_as_value!(isize, Value::Int64, i64);
impl_as_value!(u8, Value::Int64, i64);
impl_as_value!(u16, Value::Int64, i64);
impl_as_value!(u32, Value::Int64, i64);
impl_as_value!(f32, Value::Float64, f64);
impl_as_value!(f64, Value::Float64, f64);

impl AsValue for bool {
    fn as_value(self) -> Value {
        Value::Int64(self as i64)
    }
}

impl AsValue for Value {
    fn as_value(self) -> Value {
        self
    }
}

impl AsValue for String {
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
}

impl AsValue for &str {
    fn as_value(self) -> Value {
        Value::Varchar(self.to_owned())
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(self) -> Value {
        Value::Varchar(self.into_owned())
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Value {
        Value::Blob(self.into_boxed_slice())
    }
}

impl AsValue for &[u8] {
    fn as_value(self) -> Value {
        Value::Blob(self.into())
    }
}

impl AsValue for Box<[u8]> {
    fn as_value(self) -> Value {
        Value::Blob(self)
    }
}

impl AsValue for OffsetDateTime {
    fn as_value(self) -> Value {
        Value::Varchar(self.format(&Rfc3339).unwrap_or_else(|_| self.to_string()))
    }
}

impl AsValue for Point {
    fn as_value(self) -> Value {
        Value::Blob(self.to_prefixed_wkb().into_boxed_slice())
    }
}

impl AsValue for Path {
    fn as_value(self) -> Value {
        Value::Blob(self.to_prefixed_wkb().into_boxed_slice())
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
}

/// Builds the positional parameter list of a query.
///
/// ```rust
/// use scanrow_core::{params, Value};
/// let params = params![7, "Ada", None::<i64>];
/// assert_eq!(params, vec![Value::Int64(7), Value::Varchar("Ada".into()), Value::Null]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::AsValue::as_value($value)),+]
    };
}
