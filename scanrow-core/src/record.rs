use crate::{Path, Point};
use std::fmt::{self, Debug};
use time::OffsetDateTime;

/// How a record field is filled from its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    Integer,
    String,
    Boolean,
    Float,
    /// A `Vec<T>` stored as a JSON array in a text column.
    Sequence,
    Timestamp,
    GeoPoint,
    GeoPath,
}

/// A column decoded according to a [`FieldShape`], ready to be assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Integer(i64),
    String(String),
    Boolean(bool),
    Float(f64),
    Sequence(Vec<serde_json::Value>),
    Timestamp(Option<OffsetDateTime>),
    GeoPoint(Option<Point>),
    GeoPath(Option<Path>),
    /// Nothing to assign, the field keeps its current value.
    Untouched,
}

/// Registration of one record field: the column it reads, its shape and the
/// function storing the decoded value into the field.
pub struct FieldDescriptor<R> {
    pub column: &'static str,
    pub shape: FieldShape,
    pub assign: fn(&mut R, Decoded),
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldDescriptor<R> {}

impl<R> Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("column", &self.column)
            .field("shape", &self.shape)
            .field("assign", &"..")
            .finish()
    }
}

/// A type rows can be mapped onto.
///
/// Usually derived:
/// ```rust,ignore
/// #[derive(Default, Record)]
/// struct User {
///     #[sql("id")]
///     id: i64,
///     #[sql("name")]
///     name: String,
///     cache: Vec<u8>, // untagged, never touched
/// }
/// ```
/// Implementing it by hand only requires listing the descriptors:
/// ```rust
/// use scanrow_core::{Column, FieldDescriptor, FieldShape, Record};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Record for Counter {
///     const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor {
///         column: "hits",
///         shape: FieldShape::Integer,
///         assign: |record: &mut Self, value| Column::assign(&mut record.hits, value),
///     }];
/// }
/// ```
pub trait Record: Sized + 'static {
    const FIELDS: &'static [FieldDescriptor<Self>];
}

/// A field type that accepts decoded column values.
///
/// Values of a different kind than the field expects are ignored.
pub trait Column {
    fn assign(&mut self, value: Decoded);
}

macro_rules! impl_column_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Column for $ty {
                fn assign(&mut self, value: Decoded) {
                    if let Decoded::Integer(v) = value {
                        *self = v as $ty;
                    }
                }
            }
        )+
    };
}

impl_column_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Column for f64 {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::Float(v) = value {
            *self = v;
        }
    }
}

impl Column for f32 {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::Float(v) = value {
            *self = v as f32;
        }
    }
}

impl Column for String {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::String(v) = value {
            *self = v;
        }
    }
}

impl Column for bool {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::Boolean(v) = value {
            *self = v;
        }
    }
}

impl Column for Option<OffsetDateTime> {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::Timestamp(v) = value {
            *self = v;
        }
    }
}

impl Column for Option<Point> {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::GeoPoint(v) = value {
            *self = v;
        }
    }
}

impl Column for Option<Path> {
    fn assign(&mut self, value: Decoded) {
        if let Decoded::GeoPath(v) = value {
            *self = v;
        }
    }
}

impl<T: SequenceElement + Default> Column for Vec<T> {
    /// Replaces the vector when the decoded array is not empty. Elements that
    /// cannot be converted keep their default value.
    fn assign(&mut self, value: Decoded) {
        let Decoded::Sequence(items) = value else {
            return;
        };
        if items.is_empty() {
            return;
        }
        *self = items
            .iter()
            .map(|item| T::from_element(item).unwrap_or_default())
            .collect();
    }
}

/// Conversion of one element of a JSON array into the element type of a
/// sequence field.
pub trait SequenceElement: Sized {
    fn from_element(value: &serde_json::Value) -> Option<Self>;
}

macro_rules! impl_sequence_element_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SequenceElement for $ty {
                /// JSON numbers are converted, fractions truncated.
                fn from_element(value: &serde_json::Value) -> Option<Self> {
                    let serde_json::Value::Number(number) = value else {
                        return None;
                    };
                    number
                        .as_i64()
                        .map(|v| v as $ty)
                        .or_else(|| number.as_u64().map(|v| v as $ty))
                        .or_else(|| number.as_f64().map(|v| v as $ty))
                }
            }
        )+
    };
}

impl_sequence_element_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl SequenceElement for f64 {
    fn from_element(value: &serde_json::Value) -> Option<Self> {
        value.as_f64()
    }
}

impl SequenceElement for f32 {
    fn from_element(value: &serde_json::Value) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }
}

impl SequenceElement for bool {
    fn from_element(value: &serde_json::Value) -> Option<Self> {
        value.as_bool()
    }
}

impl SequenceElement for String {
    fn from_element(value: &serde_json::Value) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }
}

impl SequenceElement for serde_json::Value {
    fn from_element(value: &serde_json::Value) -> Option<Self> {
        Some(value.clone())
    }
}
