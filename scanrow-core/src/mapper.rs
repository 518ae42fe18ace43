use crate::{
    Decoded, FieldShape, Path, Point, Record, Result, RowStore, SRID_PREFIX_LEN, Value,
    decode_timestamp, util::strip_prefix,
};

/// Reads the column `column` of `row` the way a field of shape `shape` expects.
///
/// Decoding never fails: malformed data becomes the zero value of the shape,
/// or [`Decoded::Untouched`] where the field must keep its value.
pub fn decode_column(row: &RowStore, column: &str, shape: FieldShape) -> Decoded {
    match shape {
        FieldShape::Integer => Decoded::Integer(row.get_int(column)),
        FieldShape::String => Decoded::String(row.get_string(column)),
        FieldShape::Boolean => Decoded::Boolean(row.get_bool(column)),
        FieldShape::Float => Decoded::Float(row.get_float(column)),
        FieldShape::Sequence => decode_sequence(&row.get_string(column), column),
        FieldShape::Timestamp => Decoded::Timestamp(decode_timestamp(&row.get_string(column))),
        FieldShape::GeoPoint => row
            .with_value(column, |value| {
                Decoded::GeoPoint(decode_geometry(value, column, Point::from_wkb))
            })
            .unwrap_or(Decoded::Untouched),
        FieldShape::GeoPath => row
            .with_value(column, |value| {
                Decoded::GeoPath(decode_geometry(value, column, Path::from_wkb))
            })
            .unwrap_or(Decoded::Untouched),
    }
}

fn decode_sequence(text: &str, column: &str) -> Decoded {
    if text.is_empty() {
        return Decoded::Untouched;
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Array(items)) => Decoded::Sequence(items),
        Ok(other) => {
            log::trace!("Column `{}` holds JSON that is not an array: {}", column, other);
            Decoded::Untouched
        }
        Err(e) => {
            log::trace!("Column `{}` does not hold valid JSON: {}", column, e);
            Decoded::Untouched
        }
    }
}

fn decode_geometry<T>(value: &Value, column: &str, decode: fn(&[u8]) -> Result<T>) -> Option<T> {
    let Value::Blob(bytes) = value else {
        log::trace!(
            "Column `{}` is {} instead of a geometry BLOB",
            column,
            value.type_name()
        );
        return None;
    };
    decode(strip_prefix(bytes, SRID_PREFIX_LEN))
        .inspect_err(|e| log::trace!("Column `{}` is not a valid geometry: {:#}", column, e))
        .ok()
}

/// Fills the registered fields of `record` from `row`.
pub fn unmarshal<R: Record>(record: &mut R, row: &RowStore) {
    for field in R::FIELDS {
        if field.column.is_empty() {
            continue;
        }
        let decoded = decode_column(row, field.column, field.shape);
        if !matches!(decoded, Decoded::Untouched) {
            (field.assign)(record, decoded);
        }
    }
}
