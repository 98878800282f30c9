//! Shared helpers for the derive.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Member};

/// Validate that the input is a struct, returning its fields.
pub fn validate_struct<'a>(input: &'a DeriveInput, macro_name: &str) -> syn::Result<&'a Fields> {
    match &input.data {
        Data::Struct(data) => Ok(&data.fields),
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{macro_name} derive only supports structs and enums"),
        )),
    }
}

/// How to reach a field (`self.name` or `self.0`) and what to call it.
pub fn field_access(index: usize, field: &Field) -> (Member, String) {
    match &field.ident {
        Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
        None => (Member::Unnamed(syn::Index::from(index)), index.to_string()),
    }
}
