// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SELECT clause converter.
//!
//! Two rewrites, in order:
//!
//! 1. Aggregate calls. Bare `COUNT(alias)` becomes `COUNT(*)`; any of
//!    COUNT / AVG / SUM / MAX / MIN over `alias.Property` becomes
//!    `FUNC(column_name)` with the usual metadata resolution and snake_case
//!    fallback.
//! 2. A bare `SELECT [DISTINCT] alias` (alias = 1-3 character token starting
//!    lowercase, not followed by `.`, `,` or `(`) expands into an explicit
//!    column list, one `alias.column AS property` per metadata property in
//!    declaration order. Without metadata for the alias it degrades to
//!    `SELECT [DISTINCT] *`.
//!
//! Explicit column lists that already qualify properties are left for the
//! alias-stripping pass.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::alias::EntityAliasMap;
use super::strip::resolve_column_ref;
use crate::meta::EntityMetadataMap;

static AGGREGATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(COUNT|AVG|SUM|MAX|MIN)\s*\(\s*([A-Za-z_]\w*)(?:\s*\.\s*([A-Za-z_]\w*))?\s*\)")
        .expect("valid regex")
});

// The alias class is deliberately outside any (?i) group: the first
// character must be lowercase in the source.
static BARE_SELECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?i:(SELECT))\s+(?:(?i:(DISTINCT))\s+)?([a-z]\w{0,2})(\s+|$)")
        .expect("valid regex")
});

/// Rewrite the SELECT clause of a query.
#[must_use]
pub fn convert_select_clause(
    query: &str,
    metadata: &EntityMetadataMap,
    aliases: &EntityAliasMap
) -> String {
    let query = convert_aggregates(query, metadata, aliases);
    expand_bare_alias(&query, metadata, aliases)
}

fn convert_aggregates(
    query: &str,
    metadata: &EntityMetadataMap,
    aliases: &EntityAliasMap
) -> String {
    AGGREGATE
        .replace_all(query, |caps: &Captures<'_>| {
            let func = &caps[1];
            let target = &caps[2];
            match caps.get(3) {
                Some(property) => {
                    let column =
                        resolve_column_ref(target, property.as_str(), metadata, aliases);
                    format!("{func}({column})")
                }
                None if func.eq_ignore_ascii_case("COUNT") => format!("{func}(*)"),
                // Bare AVG(alias) and friends have no specified rewrite.
                None => caps[0].to_string()
            }
        })
        .into_owned()
}

fn expand_bare_alias(
    query: &str,
    metadata: &EntityMetadataMap,
    aliases: &EntityAliasMap
) -> String {
    let Some(caps) = BARE_SELECT.captures(query) else {
        return query.to_string();
    };

    let select = &caps[1];
    let distinct = caps
        .get(2)
        .map(|d| format!("{} ", d.as_str()))
        .unwrap_or_default();
    let alias = &caps[3];
    let trailing = &caps[4];

    let columns = aliases
        .entity_for(alias)
        .and_then(|entity| metadata.get(entity))
        .filter(|entity| !entity.properties.is_empty())
        .map(|entity| {
            entity
                .properties
                .iter()
                .map(|p| format!("{alias}.{} AS {}", p.column_name, p.name))
                .collect::<Vec<_>>()
                .join(", ")
        });

    let head_start = caps.get(1).map(|m| m.start()).unwrap_or(0);
    let head = &query[..head_start];
    let rest = &query[caps.get(0).map(|m| m.end()).unwrap_or(query.len())..];

    match columns {
        Some(list) => format!("{head}{select} {distinct}{list}{trailing}{rest}"),
        None => format!("{head}{select} {distinct}*{trailing}{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{EntityMetadata, PropertyMetadata};

    fn product_metadata() -> EntityMetadataMap {
        let mut entity = EntityMetadata::new("Product", "products");
        entity.properties.push(PropertyMetadata::new("id").primary_key());
        entity.properties.push(PropertyMetadata::new("name"));
        entity
            .properties
            .push(PropertyMetadata::new("unitPrice").with_column("unit_price"));
        let mut map = EntityMetadataMap::new();
        map.insert(entity);
        map
    }

    #[test]
    fn bare_count_becomes_star() {
        let query = "SELECT COUNT(e) FROM Product e";
        let out = convert_select_clause(
            query,
            &EntityMetadataMap::new(),
            &EntityAliasMap::extract(query),
        );
        assert_eq!(out, "SELECT COUNT(*) FROM Product e");
    }

    #[test]
    fn aggregate_over_property_uses_column() {
        let query = "SELECT AVG(e.unitPrice) FROM Product e";
        let out =
            convert_select_clause(query, &product_metadata(), &EntityAliasMap::extract(query));
        assert_eq!(out, "SELECT AVG(unit_price) FROM Product e");
    }

    #[test]
    fn aggregate_without_metadata_snake_cases() {
        let query = "SELECT MAX(e.CreatedAt) FROM Widget e";
        let out = convert_select_clause(
            query,
            &EntityMetadataMap::new(),
            &EntityAliasMap::extract(query),
        );
        assert_eq!(out, "SELECT MAX(created_at) FROM Widget e");
    }

    #[test]
    fn bare_avg_is_left_alone() {
        let query = "SELECT AVG(e) FROM Product e";
        let out =
            convert_select_clause(query, &product_metadata(), &EntityAliasMap::extract(query));
        assert_eq!(out, "SELECT AVG(e) FROM Product e");
    }

    #[test]
    fn bare_alias_expands_to_column_list() {
        let query = "SELECT e FROM Product e";
        let out =
            convert_select_clause(query, &product_metadata(), &EntityAliasMap::extract(query));
        assert_eq!(
            out,
            "SELECT e.id AS id, e.name AS name, e.unit_price AS unitPrice FROM Product e"
        );
    }

    #[test]
    fn bare_alias_with_distinct() {
        let query = "SELECT DISTINCT e FROM Product e";
        let out =
            convert_select_clause(query, &product_metadata(), &EntityAliasMap::extract(query));
        assert!(out.starts_with("SELECT DISTINCT e.id AS id"));
    }

    #[test]
    fn bare_alias_without_metadata_degrades_to_star() {
        let query = "SELECT w FROM Widget w";
        let out = convert_select_clause(
            query,
            &EntityMetadataMap::new(),
            &EntityAliasMap::extract(query),
        );
        assert_eq!(out, "SELECT * FROM Widget w");
    }

    #[test]
    fn explicit_column_list_is_untouched() {
        let query = "SELECT e.name, e.unitPrice FROM Product e";
        let out =
            convert_select_clause(query, &product_metadata(), &EntityAliasMap::extract(query));
        assert_eq!(out, query);
    }

    #[test]
    fn long_tokens_are_not_bare_aliases() {
        let query = "SELECT name FROM widgets";
        let out = convert_select_clause(
            query,
            &EntityMetadataMap::new(),
            &EntityAliasMap::extract(query),
        );
        assert_eq!(out, query);
    }
}
