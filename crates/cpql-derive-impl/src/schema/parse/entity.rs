// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity item parsing.
//!
//! Handles `#[entity(...)]` structs: entity-level attributes via darling,
//! field-level `#[id]` / `#[column(...)]` flags by hand, and struct-level
//! `#[relation(...)]` declarations.

use darling::FromMeta;
use syn::{Attribute, Field, Ident, ItemStruct, Meta, Type};

use super::relation::RelationDef;

/// Whether a struct carries `#[entity(...)]`.
pub fn is_entity(item: &ItemStruct) -> bool {
    item.attrs.iter().any(|a| a.path().is_ident("entity"))
}

/// Entity-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, FromMeta)]
struct EntityAttrs {
    /// Database table name. Required.
    table: String,

    /// Database schema name. No schema qualification when absent.
    #[darling(default)]
    schema: Option<String>
}

/// Column-level configuration from `#[column(...)]`.
///
/// # Supported Options
///
/// | Option | Example | Effect |
/// |--------|---------|--------|
/// | `name` | `#[column(name = "user_name")]` | Physical column name override |
/// | `unique` | `#[column(unique)]` | UNIQUE flag in metadata |
/// | `nullable` | `#[column(nullable)]` | Nullable even for non-`Option` types |
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    /// Custom column name. Defaults to the field name.
    pub name: Option<String>,

    /// UNIQUE constraint flag.
    pub unique: bool,

    /// Explicitly allow NULL.
    pub nullable: bool
}

impl ColumnConfig {
    /// Parse column config from a `#[column(...)]` attribute.
    fn from_attr(attr: &Attribute) -> Self {
        let mut config = Self::default();

        if let Meta::List(meta_list) = &attr.meta {
            let _ = meta_list.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let _: syn::Token![=] = meta.input.parse()?;
                    let value: syn::LitStr = meta.input.parse()?;
                    config.name = Some(value.value());
                } else if meta.path.is_ident("unique") {
                    config.unique = true;
                } else if meta.path.is_ident("nullable") {
                    config.nullable = true;
                }
                Ok(())
            });
        }

        config
    }
}

/// Field definition with all parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Whether this is the primary key field (`#[id]`).
    pub is_id: bool,

    /// Column configuration from `#[column(...)]`.
    pub column: ColumnConfig
}

impl FieldDef {
    /// Parse a field definition from syn's `Field`.
    fn from_field(field: &Field) -> darling::Result<Self> {
        let Some(ident) = field.ident.clone() else {
            return Err(darling::Error::custom("entity fields must be named").with_span(field));
        };

        let mut is_id = false;
        let mut column = ColumnConfig::default();
        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                is_id = true;
            } else if attr.path().is_ident("column") {
                column = ColumnConfig::from_attr(attr);
            }
        }

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            is_id,
            column
        })
    }

    /// Field name as a string.
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Physical column name: the `#[column(name = ...)]` override or the
    /// field name itself.
    pub fn column_name(&self) -> String {
        self.column
            .name
            .clone()
            .unwrap_or_else(|| self.name_str())
    }

    /// Whether the field type is `Option<T>`.
    ///
    /// A last-path-segment heuristic; custom types named `Option` produce
    /// false positives.
    pub fn is_option(&self) -> bool {
        if let Type::Path(type_path) = &self.ty
            && let Some(segment) = type_path.path.segments.last()
        {
            return segment.ident == "Option";
        }
        false
    }
}

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier (e.g. `User`).
    pub ident: Ident,

    /// Database table name.
    pub table: String,

    /// Optional database schema.
    pub schema: Option<String>,

    /// All field definitions.
    pub fields: Vec<FieldDef>,

    /// Struct-level relationship declarations.
    pub relations: Vec<RelationDef>,

    /// The original item, re-emitted (with macro attributes stripped) by the
    /// generator.
    pub item: ItemStruct
}

impl EntityDef {
    /// Parse an entity definition from an `ItemStruct`.
    pub fn from_item(item: &ItemStruct) -> darling::Result<Self> {
        let attrs = item
            .attrs
            .iter()
            .find(|a| a.path().is_ident("entity"))
            .expect("checked by is_entity");
        let attrs = EntityAttrs::from_meta(&attrs.meta)?;

        let mut errors = darling::Error::accumulator();

        let mut relations = Vec::new();
        for attr in item.attrs.iter().filter(|a| a.path().is_ident("relation")) {
            if let Some(relation) = errors.handle(RelationDef::from_attr(attr)) {
                relations.push(relation);
            }
        }

        let mut fields = Vec::new();
        match &item.fields {
            syn::Fields::Named(named) => {
                for field in &named.named {
                    if let Some(field) = errors.handle(FieldDef::from_field(field)) {
                        fields.push(field);
                    }
                }
            }
            _ => {
                errors.push(
                    darling::Error::custom("#[entity] requires a struct with named fields")
                        .with_span(&item.ident)
                );
            }
        }

        errors.finish_with(Self {
            ident: item.ident.clone(),
            table: attrs.table,
            schema: attrs.schema,
            fields,
            relations,
            item: item.clone()
        })
    }

    /// Entity name as a string.
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Table name qualified with the schema when one is set.
    pub fn qualified_table(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table),
            None => self.table.clone()
        }
    }

    /// The `#[id]` field, when present.
    pub fn id_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.is_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn user() -> EntityDef {
        let item: ItemStruct = parse_quote! {
            #[entity(table = "users", schema = "core")]
            #[relation(name = "team", kind = "many_to_one", target = "Team", join_column = "team_id")]
            pub struct User {
                #[id]
                pub id: i64,
                #[column(name = "user_name", unique)]
                pub name: String,
                pub email: Option<String>,
                pub team_id: i64,
            }
        };
        EntityDef::from_item(&item).unwrap()
    }

    #[test]
    fn parses_entity_attrs() {
        let entity = user();
        assert_eq!(entity.table, "users");
        assert_eq!(entity.schema.as_deref(), Some("core"));
        assert_eq!(entity.qualified_table(), "core.users");
    }

    #[test]
    fn parses_fields() {
        let entity = user();
        assert_eq!(entity.fields.len(), 4);
        assert_eq!(entity.id_field().map(|f| f.name_str()), Some("id".into()));
        let name = &entity.fields[1];
        assert_eq!(name.column_name(), "user_name");
        assert!(name.column.unique);
        assert!(entity.fields[2].is_option());
        assert!(!entity.fields[3].is_option());
    }

    #[test]
    fn parses_relations() {
        let entity = user();
        assert_eq!(entity.relations.len(), 1);
        assert_eq!(entity.relations[0].name, "team");
        assert_eq!(entity.relations[0].target, "Team");
    }

    #[test]
    fn missing_table_is_an_error() {
        let item: ItemStruct = parse_quote! {
            #[entity(schema = "core")]
            pub struct User {
                #[id]
                pub id: i64,
            }
        };
        assert!(EntityDef::from_item(&item).is_err());
    }

    #[test]
    fn tuple_struct_is_an_error() {
        let item: ItemStruct = parse_quote! {
            #[entity(table = "pairs")]
            pub struct Pair(i64, i64);
        };
        assert!(EntityDef::from_item(&item).is_err());
    }
}
