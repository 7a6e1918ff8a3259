// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code generation for a validated schema.
//!
//! Entities are re-emitted with row-mapping derives, repository traits are
//! re-emitted under `#[async_trait]` with the built-in CRUD methods
//! appended, and each trait is implemented for `sqlx::PgPool`. All SQL is
//! computed here, at expansion time, and embedded as string literals — the
//! generated code contains no query-building machinery.

mod crud;
mod entity;
mod method;
mod repository;

pub mod derived;

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::SchemaDef;

/// Emit the transformed module body.
pub fn generate(schema: &SchemaDef) -> TokenStream {
    let passthrough = &schema.passthrough;
    let entities = schema.entities.iter().map(entity::generate_entity);
    let repositories = schema
        .repositories
        .iter()
        .map(|repo| repository::generate_repository(repo, schema));

    quote! {
        #(#passthrough)*
        #(#entities)*
        #(#repositories)*
    }
}
