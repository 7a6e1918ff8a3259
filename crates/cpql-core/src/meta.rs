// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata model.
//!
//! Immutable descriptions of entities (table, columns, relationships) that
//! drive every name translation in the CPQL-to-SQL pipeline. One
//! [`EntityMetadataMap`] is built per generation pass and covers the main
//! entity plus every entity reachable through its declared relationships
//! (one hop, non-recursive).
//!
//! All name lookups are case-insensitive; source casing is preserved in the
//! stored values.

use std::collections::HashMap;

use crate::translate::naming::to_snake_case;

/// Kind of relationship between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Many rows of this entity reference one row of the target.
    ManyToOne,

    /// One row of this entity is referenced by many rows of the target.
    OneToMany,

    /// One-to-one association.
    OneToOne,

    /// Many-to-many association via a join table.
    ManyToMany
}

impl RelationshipKind {
    /// Parse a relationship kind from its snake_case spelling.
    ///
    /// Returns `None` for unrecognized values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "many_to_one" => Some(Self::ManyToOne),
            "one_to_many" => Some(Self::OneToMany),
            "one_to_one" => Some(Self::OneToOne),
            "many_to_many" => Some(Self::ManyToMany),
            _ => None
        }
    }

    /// Whether the relationship resolves to a collection of target rows.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// Metadata for a single entity property.
///
/// Produced once per entity per generation pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    /// Logical property name (the field name on the entity type).
    pub name: String,

    /// Physical column name.
    ///
    /// Defaults to the snake_case form of `name` when not overridden.
    pub column_name: String,

    /// Whether the column accepts NULL.
    pub is_nullable: bool,

    /// Whether this property is the primary key.
    pub is_primary_key: bool,

    /// Whether a value is required on insert.
    pub is_required: bool,

    /// Whether the column carries a UNIQUE constraint.
    pub is_unique: bool
}

impl PropertyMetadata {
    /// Create property metadata with the default column mapping.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let column_name = to_snake_case(&name);
        Self {
            name,
            column_name,
            is_nullable: false,
            is_primary_key: false,
            is_required: false,
            is_unique: false
        }
    }

    /// Override the physical column name.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column_name = column.into();
        self
    }

    /// Mark this property as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Mark the column as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }
}

/// Metadata for one declared relationship.
///
/// Only used to let the translator locate metadata for a *related* entity
/// when a query joins across entities; relationships never contribute
/// columns of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipMetadata {
    /// Logical property name of the association.
    pub property_name: String,

    /// Kind of relationship.
    pub kind: RelationshipKind,

    /// Logical name of the target entity.
    pub target_entity: String,

    /// Join column override. `None` means convention-derived.
    pub join_column: Option<String>
}

/// Immutable description of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMetadata {
    /// Logical entity name, the unique lookup key.
    pub name: String,

    /// Physical table name.
    pub table_name: String,

    /// Optional schema the table lives in.
    pub schema_name: Option<String>,

    /// Ordered property list. At most one entry per logical name
    /// (case-insensitive).
    pub properties: Vec<PropertyMetadata>,

    /// Declared relationships.
    pub relationships: Vec<RelationshipMetadata>
}

impl EntityMetadata {
    /// Create entity metadata with no properties or relationships.
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            schema_name: None,
            properties: Vec::new(),
            relationships: Vec::new()
        }
    }

    /// Set the schema name.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema_name = Some(schema.into());
        self
    }

    /// Table name qualified with the schema when one is set.
    #[must_use]
    pub fn qualified_table(&self) -> String {
        match &self.schema_name {
            Some(schema) => format!("{}.{}", schema, self.table_name),
            None => self.table_name.clone()
        }
    }

    /// Look up a property by logical name, case-insensitively.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a logical property name to its physical column name.
    ///
    /// Falls back to the snake_case form of the property name when no
    /// matching property entry exists.
    #[must_use]
    pub fn resolve_column(&self, property: &str) -> String {
        match self.property(property) {
            Some(p) => p.column_name.clone(),
            None => to_snake_case(property)
        }
    }

    /// The primary key property, when one is declared.
    #[must_use]
    pub fn primary_key(&self) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.is_primary_key)
    }

    /// Look up a relationship by its property name, case-insensitively.
    #[must_use]
    pub fn relationship(&self, property_name: &str) -> Option<&RelationshipMetadata> {
        self.relationships
            .iter()
            .find(|r| r.property_name.eq_ignore_ascii_case(property_name))
    }
}

/// Case-insensitive map from logical entity name to [`EntityMetadata`].
///
/// Built once per repository-generation pass and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct EntityMetadataMap {
    entities: HashMap<String, EntityMetadata>
}

impl EntityMetadataMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert entity metadata, keyed by its logical name.
    ///
    /// A later insert for the same name (case-insensitive) replaces the
    /// earlier entry.
    pub fn insert(&mut self, entity: EntityMetadata) {
        self.entities.insert(entity.name.to_lowercase(), entity);
    }

    /// Look up entity metadata by logical name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityMetadata> {
        self.entities.get(&name.to_lowercase())
    }

    /// Whether the map holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

impl FromIterator<EntityMetadata> for EntityMetadataMap {
    fn from_iter<I: IntoIterator<Item = EntityMetadata>>(iter: I) -> Self {
        let mut map = Self::new();
        for entity in iter {
            map.insert(entity);
        }
        map
    }
}
