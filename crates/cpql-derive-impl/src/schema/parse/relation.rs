// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relationship attribute parsing.
//!
//! Struct-level `#[relation(...)]` attributes declare associations to other
//! entities. They only feed the translator's metadata map — relations never
//! contribute columns to the entity itself.

use darling::FromMeta;
use syn::Attribute;

use cpql_core::meta::RelationshipKind;

/// Raw attribute shape for darling.
#[derive(Debug, FromMeta)]
struct RelationAttrs {
    /// Logical association name used in queries.
    name: String,

    /// Relationship kind: `many_to_one`, `one_to_many`, `one_to_one` or
    /// `many_to_many`.
    kind: String,

    /// Target entity name.
    target: String,

    /// Join column override.
    #[darling(default)]
    join_column: Option<String>
}

/// Parsed relationship declaration.
#[derive(Debug, Clone)]
pub struct RelationDef {
    /// Logical association name.
    pub name: String,

    /// Relationship kind.
    pub kind: RelationshipKind,

    /// Target entity name.
    pub target: String,

    /// Join column override.
    pub join_column: Option<String>
}

impl RelationDef {
    /// Parse a `#[relation(...)]` attribute.
    pub fn from_attr(attr: &Attribute) -> darling::Result<Self> {
        let attrs = RelationAttrs::from_meta(&attr.meta)?;
        let Some(kind) = RelationshipKind::parse(&attrs.kind) else {
            return Err(darling::Error::unknown_value(&attrs.kind).with_span(attr));
        };
        Ok(Self {
            name: attrs.name,
            kind,
            target: attrs.target,
            join_column: attrs.join_column
        })
    }
}
