use proc_macro2::TokenStream;
use quote::quote;
use std::cmp::min;
use syn::{GenericArgument, Path, PathArguments, Type};

pub(crate) fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

/// `path` names `name`, bare or qualified by one of `crates`.
fn matches_type(path: &Path, crates: &[&str], name: &str) -> bool {
    let mut segments = path.segments.iter().rev();
    if !segments.next().is_some_and(|v| v.ident == name) {
        return false;
    }
    match segments.next() {
        None => path.leading_colon.is_none(),
        Some(owner) => segments.next().is_none() && crates.iter().any(|c| owner.ident == *c),
    }
}

fn first_generic(path: &Path) -> Option<&Path> {
    let PathArguments::AngleBracketed(bracketed) = &path.segments.last()?.arguments else {
        return None;
    };
    match bracketed.args.first()? {
        GenericArgument::Type(Type::Path(inner)) => Some(&inner.path),
        _ => None,
    }
}

/// The `FieldShape` variant of a field type, `None` when the type cannot be
/// mapped from a column.
pub(crate) fn decode_shape(ty: &Type) -> Option<TokenStream> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let path = &type_path.path;
    if let Some(ident) = path.get_ident() {
        let ident = ident.to_string();
        let shape = match ident.as_str() {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => quote!(Integer),
            "f32" | "f64" => quote!(Float),
            "bool" => quote!(Boolean),
            "String" => quote!(String),
            _ => return None,
        };
        return Some(quote!(::scanrow::FieldShape::#shape));
    }
    let shape = if matches_path(path, &["std", "string", "String"]) {
        quote!(String)
    } else if matches_path(path, &["std", "vec", "Vec"]) {
        quote!(Sequence)
    } else if matches_path(path, &["std", "option", "Option"]) {
        let inner = first_generic(path)?;
        if matches_type(inner, &["time"], "OffsetDateTime") {
            quote!(Timestamp)
        } else if matches_type(inner, &["scanrow", "scanrow_core"], "Point") {
            quote!(GeoPoint)
        } else if matches_type(inner, &["scanrow", "scanrow_core"], "Path") {
            quote!(GeoPath)
        } else {
            return None;
        }
    } else {
        return None;
    };
    Some(quote!(::scanrow::FieldShape::#shape))
}
