//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   Pierre Avital, <pierre.avital@me.com>
//

use quote::quote;
use syn::{
    parse::ParseStream, parse_quote, punctuated::Punctuated, DeriveInput, GenericParam, Ident,
    Token, Type,
};

/// Parses the content of `#[alternative(from(A, B))]`.
fn parse_sources(input: ParseStream) -> syn::Result<Vec<Type>> {
    let keyword: Ident = input.parse()?;
    if keyword != "from" {
        return Err(syn::Error::new(
            keyword.span(),
            "expected `from(..)` in `#[alternative(..)]`",
        ));
    }
    let content;
    syn::parenthesized!(content in input);
    let sources = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
    Ok(sources.into_iter().collect())
}

pub fn derive(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let st = crate::tl_mod();
    let DeriveInput {
        attrs,
        ident,
        mut generics,
        ..
    } = input;
    let mut sources = Vec::new();
    for attr in attrs.iter().filter(|a| a.path.is_ident("alternative")) {
        sources.extend(attr.parse_args_with(parse_sources)?);
    }
    let type_params = generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    let where_clause = generics.make_where_clause();
    for param in type_params {
        where_clause.predicates.push(parse_quote!(#param: 'static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #st::Alternative for #ident #ty_generics #where_clause {
            const CLASS: #st::Class = #st::Class::OPAQUE
                #(.accepting(<#sources as #st::Alternative>::CLASS))*;
            fn adopt<__Source: #st::Alternative>(
                source: __Source,
            ) -> ::core::result::Result<Self, __Source> {
                let source = match #st::classify::cast_same::<__Source, Self>(source) {
                    ::core::result::Result::Ok(value) => return ::core::result::Result::Ok(value),
                    ::core::result::Result::Err(source) => source,
                };
                #(
                    let source = match #st::classify::cast_same::<__Source, #sources>(source) {
                        ::core::result::Result::Ok(value) => {
                            return ::core::result::Result::Ok(
                                <Self as ::core::convert::From<#sources>>::from(value),
                            )
                        }
                        ::core::result::Result::Err(source) => source,
                    };
                )*
                ::core::result::Result::Err(source)
            }
        }
    })
}
