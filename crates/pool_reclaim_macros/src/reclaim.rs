//! Reclaim derive macro implementation.
//!
//! Generates `::pool_reclaim::Members` and `::pool_reclaim::Reclaim`
//! implementations (plus `FixedTuple` in tuple mode) from a struct
//! definition. Enums get a `Reclaim` impl that forwards to the active
//! variant's payload.

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DataEnum, DeriveInput, Fields, Generics, Member, Type,
};

use crate::attrs::{field_mode, ContainerAttrs, FieldMode, Mode};
use crate::utils::{field_access, validate_struct};

/// Main entry point for the Reclaim derive macro.
pub fn derive_reclaim(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_reclaim_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// One field after attribute parsing.
struct FieldSlot {
    access: Member,
    name: String,
    ty: Type,
    mode: FieldMode,
}

pub(crate) fn derive_reclaim_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    if let Data::Enum(data) = &input.data {
        return generate_enum(input, &container, data);
    }
    let fields = validate_struct(input, "Reclaim")?;

    let slots = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let (access, name) = field_access(index, field);
            Ok(FieldSlot {
                access,
                name,
                ty: field.ty.clone(),
                mode: field_mode(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let flattened = slots.iter().find(|s| s.mode == FieldMode::Flatten);

    match container.mode {
        Mode::Handle => {
            if container.static_members.is_some() {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`static_members` cannot be combined with `handle`",
                ));
            }
            if let Some(slot) = flattened {
                return Err(syn::Error::new_spanned(
                    &slot.ty,
                    "`flatten` has no effect on a `handle` type",
                ));
            }
            Ok(generate_handle(input))
        }
        Mode::Tuple => {
            if let Some(slot) = flattened {
                return Err(syn::Error::new_spanned(
                    &slot.ty,
                    "`flatten` fields cannot be tuple positions",
                ));
            }
            let members = generate_members(input, &container, &slots);
            let tuple = generate_tuple(input, &slots);
            Ok(quote! {
                #members
                #tuple
            })
        }
        Mode::Opaque => {
            let members = generate_members(input, &container, &slots);
            let opaque = generate_opaque(input);
            Ok(quote! {
                #members
                #opaque
            })
        }
    }
}

/// `Members` yielding every slot in declaration order.
fn generate_members(
    input: &DeriveInput,
    container: &ContainerAttrs,
    slots: &[FieldSlot],
) -> TokenStream2 {
    let name = &input.ident;
    let generics = bounded_generics(&input.generics, slots);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let visits = slots.iter().filter_map(|slot| {
        let access = &slot.access;
        let member_name = &slot.name;
        match slot.mode {
            FieldMode::Slot => Some(quote! {
                visit(::pool_reclaim::Member::instance(#member_name, &mut self.#access));
            }),
            FieldMode::Flatten => Some(quote! {
                ::pool_reclaim::Members::for_each_member(&mut self.#access, visit);
            }),
            FieldMode::Skip => None,
        }
    });

    let statics = container.static_members.as_ref().map(|path| {
        quote! {
            #path(visit);
        }
    });

    quote! {
        impl #impl_generics ::pool_reclaim::Members for #name #ty_generics #where_clause {
            fn for_each_member(
                &mut self,
                visit: &mut dyn FnMut(::pool_reclaim::Member<'_>),
            ) {
                #(#visits)*
                #statics
            }
        }
    }
}

/// `Reclaim` answering `Shape::Opaque`: plain objects are not walked when
/// nested.
fn generate_opaque(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::pool_reclaim::Reclaim for #name #ty_generics #where_clause {
            fn shape(&self) -> ::pool_reclaim::Shape<'_> {
                ::pool_reclaim::Shape::Opaque
            }
        }
    }
}

fn generate_handle(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::pool_reclaim::Reclaim for #name #ty_generics #where_clause {
            fn shape(&self) -> ::pool_reclaim::Shape<'_> {
                ::pool_reclaim::Shape::Handle(self)
            }
        }
    }
}

/// `FixedTuple` over the non-skipped fields, plus `Reclaim` answering
/// `Shape::Tuple`.
fn generate_tuple(input: &DeriveInput, slots: &[FieldSlot]) -> TokenStream2 {
    let name = &input.ident;
    let generics = bounded_generics(&input.generics, slots);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let positions: Vec<_> = slots
        .iter()
        .filter(|slot| slot.mode == FieldMode::Slot)
        .collect();
    let arity = positions.len();
    let arms = positions.iter().enumerate().map(|(index, slot)| {
        let index = Literal::usize_unsuffixed(index);
        let access = &slot.access;
        quote! {
            #index => ::core::option::Option::Some(&self.#access as &dyn ::pool_reclaim::Reclaim),
        }
    });

    quote! {
        impl #impl_generics ::pool_reclaim::FixedTuple for #name #ty_generics #where_clause {
            fn arity(&self) -> usize {
                #arity
            }

            fn position(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn ::pool_reclaim::Reclaim> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::pool_reclaim::Reclaim for #name #ty_generics #where_clause {
            fn shape(&self) -> ::pool_reclaim::Shape<'_> {
                ::pool_reclaim::Shape::Tuple(self)
            }
        }
    }
}

/// `Reclaim` for a tagged union: each variant carries at most one payload,
/// and the enum classifies (and detaches) as that payload does. Unit
/// variants and skipped payloads are opaque.
fn generate_enum(
    input: &DeriveInput,
    container: &ContainerAttrs,
    data: &DataEnum,
) -> syn::Result<TokenStream2> {
    if container.mode != Mode::Opaque || container.static_members.is_some() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "enums take no container attributes; each variant forwards to its payload",
        ));
    }

    let name = &input.ident;
    let mut payloads = Vec::new();
    let mut shape_arms = Vec::new();
    let mut detach_arms = Vec::new();

    for variant in &data.variants {
        let ident = &variant.ident;
        let field = match &variant.fields {
            Fields::Unit => None,
            fields if fields.len() == 1 => fields.iter().next(),
            fields => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "Reclaim enum variants carry at most one field",
                ))
            }
        };

        let Some(field) = field else {
            shape_arms.push(quote! { Self::#ident => ::pool_reclaim::Shape::Opaque, });
            continue;
        };

        let pattern = match &field.ident {
            Some(field_name) => quote! { Self::#ident { #field_name: inner } },
            None => quote! { Self::#ident(inner) },
        };
        match field_mode(&field.attrs)? {
            FieldMode::Slot => {
                shape_arms.push(quote! {
                    #pattern => ::pool_reclaim::Reclaim::shape(inner),
                });
                detach_arms.push(quote! {
                    #pattern => ::pool_reclaim::Reclaim::detach(inner),
                });
                let (access, name) = field_access(0, field);
                payloads.push(FieldSlot {
                    access,
                    name,
                    ty: field.ty.clone(),
                    mode: FieldMode::Slot,
                });
            }
            FieldMode::Skip => {
                let ignored = match &field.ident {
                    Some(_) => quote! { Self::#ident { .. } },
                    None => quote! { Self::#ident(..) },
                };
                shape_arms.push(quote! { #ignored => ::pool_reclaim::Shape::Opaque, });
            }
            FieldMode::Flatten => {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "`flatten` is not supported on enum variants",
                ))
            }
        }
    }

    let generics = bounded_generics(&input.generics, &payloads);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // `match *self {}` is the only exhaustive match on an empty enum.
    let shape_body = if data.variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#shape_arms)* } }
    };
    let detach_body = if detach_arms.is_empty() {
        quote! { false }
    } else if detach_arms.len() == data.variants.len() {
        quote! { match self { #(#detach_arms)* } }
    } else {
        quote! {
            match self {
                #(#detach_arms)*
                _ => false,
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::pool_reclaim::Reclaim for #name #ty_generics #where_clause {
            fn shape(&self) -> ::pool_reclaim::Shape<'_> {
                #shape_body
            }

            fn detach(&mut self) -> bool {
                #detach_body
            }
        }
    })
}

/// For generic structs and enums, require every slot type to implement the
/// trait the generated code calls on it.
fn bounded_generics(generics: &Generics, slots: &[FieldSlot]) -> Generics {
    let mut generics = generics.clone();
    if generics.params.is_empty() {
        return generics;
    }

    let where_clause = generics.make_where_clause();
    for slot in slots {
        let ty = &slot.ty;
        match slot.mode {
            FieldMode::Slot => where_clause
                .predicates
                .push(parse_quote!(#ty: ::pool_reclaim::Reclaim)),
            FieldMode::Flatten => where_clause
                .predicates
                .push(parse_quote!(#ty: ::pool_reclaim::Members)),
            FieldMode::Skip => {}
        }
    }
    generics
}
