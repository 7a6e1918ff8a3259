// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema module parsing.
//!
//! Walks the items of a `#[schema]` module and sorts them into entity
//! definitions, repository definitions and untouched passthrough items.

mod entity;
mod relation;
mod repository;

pub use entity::{ColumnConfig, EntityDef, FieldDef};
pub use relation::RelationDef;
pub use repository::{MethodDef, MethodKind, RepositoryDef};

use syn::{Item, ItemMod};

/// Everything collected from one `#[schema]` module.
#[derive(Debug)]
pub struct SchemaDef {
    /// Entities, in declaration order.
    pub entities: Vec<EntityDef>,

    /// Repositories, in declaration order.
    pub repositories: Vec<RepositoryDef>,

    /// Items the macro does not touch, re-emitted verbatim.
    pub passthrough: Vec<Item>
}

impl SchemaDef {
    /// Parse a module body into a schema definition.
    ///
    /// Parse errors from individual items are accumulated so that a single
    /// expansion reports every problem at once.
    pub fn from_module(module: &ItemMod) -> darling::Result<Self> {
        let mut entities = Vec::new();
        let mut repositories = Vec::new();
        let mut passthrough = Vec::new();
        let mut errors = darling::Error::accumulator();

        let items = module
            .content
            .as_ref()
            .map(|(_, items)| items.as_slice())
            .unwrap_or_default();

        for item in items {
            match item {
                Item::Struct(item) if entity::is_entity(item) => {
                    if let Some(entity) = errors.handle(EntityDef::from_item(item)) {
                        entities.push(entity);
                    }
                }
                Item::Trait(item) if repository::is_repository(item) => {
                    if let Some(repo) = errors.handle(RepositoryDef::from_item(item)) {
                        repositories.push(repo);
                    }
                }
                other => passthrough.push(other.clone())
            }
        }

        errors.finish_with(Self {
            entities,
            repositories,
            passthrough
        })
    }

    /// Look up an entity by name, case-insensitively.
    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities
            .iter()
            .find(|e| e.ident.to_string().eq_ignore_ascii_case(name))
    }
}
