//! Derive macro for the `Codec` trait from `hardpack-codec`.
//!
//! This crate provides a procedural macro to automatically derive implementations
//! of the `Codec` trait for structs where all fields implement `Codec`.  The
//! generated code is the record traversal: each field is written, then read
//! back, in declaration order with nothing in between.
//!
//! # Examples
//!
//! ## Named struct
//! ```ignore
//! use hardpack_codec::Codec;
//!
//! #[derive(Codec)]
//! struct MyStruct {
//!     field1: u32,
//!     field2: Vec<u8>,
//! }
//! ```
//!
//! ## Self-referential struct
//! ```ignore
//! #[derive(Codec)]
//! struct Node {
//!     value: i8,
//!     next: Option<Box<Node>>,
//! }
//! ```
//!
//! ## Tuple struct
//! ```ignore
//! #[derive(Codec)]
//! struct TupleStruct(u32, u64);
//! ```
//!
//! ## Unit struct
//! ```ignore
//! #[derive(Codec)]
//! struct UnitStruct;
//! ```

// The hardpack-codec dev-dependency is used in tests
#[cfg(test)]
use hardpack_codec as _;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericParam, parse_macro_input, parse_quote};

/// Derives the `Codec` trait for structs.
///
/// This macro generates implementations of the `decode` and `encode` methods
/// required by the `Codec` trait. All fields of the struct must implement `Codec`,
/// and every type parameter gets a `Codec` bound.
///
/// Fields are encoded and decoded in declaration order.
#[proc_macro_derive(Codec)]
pub fn derive_codec(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    // Only records are supported, there's no wire representation for variants.
    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(&input, "Codec derive macro only supports structs")
            .to_compile_error()
            .into();
    };

    let (decode_impl, encode_impl) = match &data_struct.fields {
        Fields::Named(fields) => {
            // Named struct: struct Foo { a: T, b: U }
            let field_names: Vec<_> = fields.named.iter().map(|f| &f.ident).collect();

            let decode_fields = field_names.iter().map(|ident| {
                quote! {
                    #ident: ::hardpack_codec::Codec::decode(dec)?
                }
            });

            let encode_fields = field_names.iter().map(|ident| {
                quote! {
                    ::hardpack_codec::Codec::encode(&self.#ident, enc)?;
                }
            });

            (
                quote! {
                    Ok(Self {
                        #(#decode_fields),*
                    })
                },
                quote! {
                    #(#encode_fields)*
                    Ok(())
                },
            )
        }
        Fields::Unnamed(fields) => {
            // Tuple struct: struct Foo(T, U)
            let field_count = fields.unnamed.len();

            let decode_fields = (0..field_count).map(|_| {
                quote! {
                    ::hardpack_codec::Codec::decode(dec)?
                }
            });

            let encode_fields = (0..field_count).map(|i| {
                let index = syn::Index::from(i);
                quote! {
                    ::hardpack_codec::Codec::encode(&self.#index, enc)?;
                }
            });

            (
                quote! {
                    Ok(Self(#(#decode_fields),*))
                },
                quote! {
                    #(#encode_fields)*
                    Ok(())
                },
            )
        }
        Fields::Unit => {
            // Unit struct: struct Foo;
            (quote! { Ok(Self) }, quote! { Ok(()) })
        }
    };

    for param in &mut input.generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::hardpack_codec::Codec));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics ::hardpack_codec::Codec for #name #ty_generics #where_clause {
            fn decode(dec: &mut impl ::hardpack_codec::Decoder) -> ::core::result::Result<Self, ::hardpack_codec::CodecError> {
                #decode_impl
            }

            fn encode(&self, enc: &mut impl ::hardpack_codec::Encoder) -> ::core::result::Result<(), ::hardpack_codec::CodecError> {
                #encode_impl
            }
        }
    };

    TokenStream::from(expanded)
}
