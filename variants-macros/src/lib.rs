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

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::quote;

mod alternative;

pub(crate) fn tl_mod() -> proc_macro2::TokenStream {
    match proc_macro_crate::crate_name("variants-core") {
        Ok(proc_macro_crate::FoundCrate::Itself) => return quote!(crate),
        Ok(proc_macro_crate::FoundCrate::Name(crate_name)) => {
            let crate_name = Ident::new(&crate_name, Span::call_site());
            return quote!(#crate_name);
        }
        _ => {}
    }
    match proc_macro_crate::crate_name("variants")
        .expect("Couldn't find `variants` in your dependencies")
    {
        proc_macro_crate::FoundCrate::Itself => quote!(crate),
        proc_macro_crate::FoundCrate::Name(crate_name) => {
            let crate_name = Ident::new(&crate_name, Span::call_site());
            quote!(#crate_name)
        }
    }
}

/// Implements `Alternative` for an opaque type.
///
/// By default, the type only accepts values of its own type in `Variant::new`. List other
/// accepted source types with `#[alternative(from(A, B))]`: they must each implement
/// `Alternative` and have a `From` conversion into the type. Their classes are folded into the
/// type's own, so that numbers or pointers are only offered to it if a listed source is one.
#[proc_macro_derive(Alternative, attributes(alternative))]
pub fn alternative(tokens: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(tokens as syn::DeriveInput);
    alternative::derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
