// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsed definitions to translator metadata.
//!
//! The translator consumes one [`EntityMetadataMap`] per repository: the
//! repository's entity plus every entity reachable through its declared
//! relationships — one hop, non-recursive. The map lives for one expansion
//! and is discarded afterwards.

use cpql_core::meta::{
    EntityMetadata, EntityMetadataMap, PropertyMetadata, RelationshipMetadata
};

use super::parse::{EntityDef, SchemaDef};

/// Convert one parsed entity to translator metadata.
pub fn entity_metadata(entity: &EntityDef) -> EntityMetadata {
    let mut meta = EntityMetadata::new(entity.name_str(), entity.table.clone());
    meta.schema_name = entity.schema.clone();

    for field in &entity.fields {
        let mut property =
            PropertyMetadata::new(field.name_str()).with_column(field.column_name());
        property.is_primary_key = field.is_id;
        property.is_nullable = field.is_option() || field.column.nullable;
        property.is_required = !property.is_nullable && !field.is_id;
        property.is_unique = field.column.unique;
        meta.properties.push(property);
    }

    for relation in &entity.relations {
        meta.relationships.push(RelationshipMetadata {
            property_name: relation.name.clone(),
            kind: relation.kind,
            target_entity: relation.target.clone(),
            join_column: relation.join_column.clone()
        });
    }

    meta
}

/// Build the metadata map for one repository's entity.
///
/// Relationship targets that are not declared in the module are simply
/// absent from the map; the translator degrades to its naming conventions
/// for them.
pub fn metadata_map_for(entity: &EntityDef, schema: &SchemaDef) -> EntityMetadataMap {
    let mut map = EntityMetadataMap::new();
    map.insert(entity_metadata(entity));

    for relation in &entity.relations {
        if let Some(target) = schema.entity(&relation.target) {
            map.insert(entity_metadata(target));
        }
    }

    map
}
