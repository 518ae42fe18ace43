mod decode_field;
mod decode_shape;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Fields, GenericParam, ItemStruct, Result, parse_macro_input, parse_quote};

/// Registers the fields tagged with `#[sql("column")]` as a `scanrow::Record`.
#[proc_macro_derive(Record, attributes(sql))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    match record_impl(item) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn record_impl(mut item: ItemStruct) -> Result<proc_macro2::TokenStream> {
    let Fields::Named(..) = &item.fields else {
        return Err(syn::Error::new_spanned(
            &item.ident,
            "Record can only be derived for structs with named fields",
        ));
    };
    let fields = item
        .fields
        .iter()
        .filter_map(|f| decode_field(f).transpose())
        .collect::<Result<Vec<_>>>()?;
    let descriptors = fields.iter().map(|f| {
        let ident = &f.ident;
        let column = &f.column;
        let shape = &f.shape;
        quote! {
            ::scanrow::FieldDescriptor {
                column: #column,
                shape: #shape,
                assign: |record: &mut Self, value: ::scanrow::Decoded| {
                    ::scanrow::Column::assign(&mut record.#ident, value)
                },
            }
        }
    });
    let type_params = item
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    let where_clause = item.generics.make_where_clause();
    for param in type_params {
        where_clause.predicates.push(parse_quote!(#param: 'static));
    }
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::scanrow::Record for #name #ty_generics #where_clause {
            const FIELDS: &'static [::scanrow::FieldDescriptor<Self>] = &[#(#descriptors),*];
        }
    })
}
