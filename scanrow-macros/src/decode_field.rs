use crate::decode_shape::decode_shape;
use proc_macro2::TokenStream;
use syn::{Field, Ident, LitStr, Result};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) column: String,
    pub(crate) shape: TokenStream,
}

/// Reads the `#[sql("column")]` tag of a field.
///
/// Returns `None` for fields that do not take part in the mapping: untagged,
/// tagged with an empty name or of a type no column can fill.
pub(crate) fn decode_field(field: &Field) -> Result<Option<FieldMetadata>> {
    let mut column = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("sql") {
            continue;
        }
        let name: LitStr = attr.parse_args().map_err(|e| {
            syn::Error::new(
                e.span(),
                "Error while parsing `sql`, use it like: `#[sql(\"column_name\")]`",
            )
        })?;
        column = Some(name.value());
    }
    let Some(column) = column.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let Some(shape) = decode_shape(&field.ty) else {
        return Ok(None);
    };
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Tagged fields must have a name"))?;
    Ok(Some(FieldMetadata {
        ident,
        column,
        shape,
    }))
}
