// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema module expansion.
//!
//! Orchestrates one generation pass: parse the module items, validate the
//! result, then emit the transformed module. Parse and validation errors are
//! accumulated and reported together instead of stopping at the first one.

mod analyze;
mod generate;
mod metadata;
mod parse;

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;

use self::parse::SchemaDef;

/// Expand the `#[schema]` attribute on a module.
pub fn expand(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let module: syn::ItemMod = match syn::parse2(item) {
        Ok(module) => module,
        Err(err) => return err.to_compile_error()
    };

    if module.content.is_none() {
        return syn::Error::new(
            module.span(),
            "#[schema] requires an inline module with a body"
        )
        .to_compile_error();
    }

    let schema = match SchemaDef::from_module(&module) {
        Ok(schema) => schema,
        Err(err) => return err.write_errors()
    };

    if let Err(err) = analyze::validate(&schema) {
        return err.write_errors();
    }

    let attrs = &module.attrs;
    let vis = &module.vis;
    let ident = &module.ident;
    let body = generate::generate(&schema);

    quote! {
        #(#attrs)*
        #vis mod #ident {
            #body
        }
    }
}
