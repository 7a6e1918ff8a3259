// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity struct emission.
//!
//! The original struct is re-emitted with the schema attributes stripped and
//! the standard derive set added. Row mapping relies on every generated
//! SELECT labeling its columns `AS` the field name, so `sqlx::FromRow` maps
//! by field name without per-field renames.

use proc_macro2::TokenStream;
use quote::quote;

use super::super::parse::EntityDef;

/// Re-emit one entity struct.
pub fn generate_entity(def: &EntityDef) -> TokenStream {
    let mut item = def.item.clone();
    item.attrs
        .retain(|a| !a.path().is_ident("entity") && !a.path().is_ident("relation"));

    if let syn::Fields::Named(named) = &mut item.fields {
        for field in named.named.iter_mut() {
            field
                .attrs
                .retain(|a| !a.path().is_ident("id") && !a.path().is_ident("column"));
        }
    }

    quote! {
        #[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
        #item
    }
}
