// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository trait and implementation emission.
//!
//! The user's trait is re-emitted with `#[query]` attributes stripped, the
//! built-in CRUD signatures appended and `#[async_trait]` applied; the
//! implementation targets `sqlx::PgPool` directly, so a pool is all that is
//! needed to use a repository.

use cpql_core::meta::{EntityMetadata, EntityMetadataMap};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::super::metadata::{entity_metadata, metadata_map_for};
use super::super::parse::{EntityDef, MethodKind, RepositoryDef, SchemaDef};
use super::{crud, method};

/// Precomputed identifiers and SQL fragments for one repository.
pub struct Context<'a> {
    /// The repository's entity definition.
    pub entity: &'a EntityDef,

    /// All entities in the module, for return-type classification.
    pub schema: &'a SchemaDef,

    /// Entity struct name.
    pub entity_name: &'a Ident,

    /// Qualified table name.
    pub table: String,

    /// SELECT list labeling every column with its field name.
    pub select_columns: String,

    /// Primary key column name.
    pub id_column: String,

    /// Metadata map for the translator: entity plus one-hop relations.
    pub metadata: EntityMetadataMap,

    /// The entity's own metadata, for the predicate builder.
    pub entity_meta: EntityMetadata
}

impl<'a> Context<'a> {
    /// Precompute the context for one repository.
    ///
    /// Only called after validation, so the entity is known to exist and to
    /// carry an `#[id]` field.
    pub fn new(repo: &'a RepositoryDef, schema: &'a SchemaDef) -> Self {
        let entity = schema
            .entity(&repo.entity_name)
            .expect("validated: repository entity exists");
        let entity_meta = entity_metadata(entity);

        let select_columns = entity
            .fields
            .iter()
            .map(|f| {
                let column = f.column_name();
                let name = f.name_str();
                if column == name {
                    column
                } else {
                    format!("{column} AS {name}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let id_column = entity
            .id_field()
            .map(|f| f.column_name())
            .expect("validated: entity has an #[id] field");

        Self {
            entity,
            schema,
            entity_name: &entity.ident,
            table: entity.qualified_table(),
            select_columns,
            id_column,
            metadata: metadata_map_for(entity, schema),
            entity_meta
        }
    }
}

/// Emit the rewritten trait plus its `sqlx::PgPool` implementation.
pub fn generate_repository(repo: &RepositoryDef, schema: &SchemaDef) -> TokenStream {
    let ctx = Context::new(repo, schema);
    let trait_tokens = rewrite_trait(repo, &ctx);
    let impl_tokens = generate_impl(repo, &ctx);

    quote! {
        #trait_tokens
        #impl_tokens
    }
}

fn rewrite_trait(repo: &RepositoryDef, ctx: &Context<'_>) -> TokenStream {
    let mut item = repo.item.clone();
    item.attrs.retain(|a| !a.path().is_ident("repository"));

    for trait_item in &mut item.items {
        if let syn::TraitItem::Fn(method) = trait_item {
            method.attrs.retain(|a| !a.path().is_ident("query"));
        }
    }

    if item.supertraits.is_empty() {
        item.colon_token = Some(Default::default());
        item.supertraits.push(syn::parse_quote!(Send));
        item.supertraits.push(syn::parse_quote!(Sync));
    }

    for signature in crud::builtin_signatures(repo, ctx) {
        item.items.push(syn::TraitItem::Fn(signature));
    }

    quote! {
        #[async_trait::async_trait]
        #item
    }
}

fn generate_impl(repo: &RepositoryDef, ctx: &Context<'_>) -> TokenStream {
    let mut methods: Vec<TokenStream> = Vec::new();

    for def in &repo.methods {
        let tokens = match &def.kind {
            MethodKind::Query {
                cpql
            } => method::query_method(def, cpql, ctx),
            MethodKind::Native {
                sql
            } => method::native_method(def, sql, ctx),
            MethodKind::Derived => method::derived_method(def, ctx),
            MethodKind::BuiltIn => crud::builtin_override(def, ctx),
            MethodKind::Provided => continue
        };
        methods.push(tokens);
    }

    methods.extend(crud::builtin_impls(repo, ctx));

    let trait_name = &repo.ident;
    quote! {
        #[async_trait::async_trait]
        impl #trait_name for sqlx::PgPool {
            #(#methods)*
        }
    }
}
