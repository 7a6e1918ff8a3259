// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! FROM / JOIN clause converter.
//!
//! Rewrites `FROM Entity alias` and `[INNER|LEFT|RIGHT|FULL] JOIN Entity
//! alias ... ON` into physical table names. With metadata the alias token is
//! preserved after the table name so later passes can still qualify columns;
//! without metadata the table name is synthesized as
//! `pluralize(snake_case(Entity))` and the alias is dropped.
//!
//! The FROM rewrite runs as two sequential passes split by alias length
//! (1-3 characters, then 4 and longer), each anchored to end at a following
//! clause keyword or at end of string. The split keeps the patterns simple;
//! only one of the two can match a given occurrence.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::naming::fallback_table_name;
use super::strip::is_sql_keyword;
use crate::meta::EntityMetadataMap;

const CLAUSE_TAIL: &str = "INNER\\s+JOIN|LEFT\\s+JOIN|RIGHT\\s+JOIN|FULL\\s+JOIN|JOIN|WHERE|ORDER\\s+BY|GROUP\\s+BY|HAVING|LIMIT";

static FROM_SHORT_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(FROM)\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w{{0,2}})(?:\s+({CLAUSE_TAIL})\b|\s*$)"
    ))
    .expect("valid regex")
});

static FROM_LONG_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(FROM)\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w{{3,}})(?:\s+({CLAUSE_TAIL})\b|\s*$)"
    ))
    .expect("valid regex")
});

static JOIN_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:INNER\s+|LEFT\s+|RIGHT\s+|FULL\s+)?JOIN)\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w*)\s+(ON)\b",
    )
    .expect("valid regex")
});

/// Rewrite the FROM clause and every entity JOIN of a query.
#[must_use]
pub fn convert_from_clause(query: &str, metadata: &EntityMetadataMap) -> String {
    let query = rewrite_from(query, &FROM_SHORT_ALIAS, metadata);
    let query = rewrite_from(&query, &FROM_LONG_ALIAS, metadata);
    rewrite_joins(&query, metadata)
}

fn rewrite_from(query: &str, pattern: &Regex, metadata: &EntityMetadataMap) -> String {
    pattern
        .replace(query, |caps: &Captures<'_>| {
            let from = &caps[1];
            let entity = &caps[2];
            let alias = &caps[3];
            if is_sql_keyword(alias) {
                return caps[0].to_string();
            }
            let tail = caps.get(4).map(|t| t.as_str());
            match (metadata.get(entity), tail) {
                (Some(meta), Some(tail)) => {
                    format!("{from} {} {alias} {tail}", meta.qualified_table())
                }
                (Some(meta), None) => format!("{from} {} {alias}", meta.qualified_table()),
                (None, Some(tail)) => {
                    format!("{from} {} {tail}", fallback_table_name(entity))
                }
                (None, None) => format!("{from} {}", fallback_table_name(entity))
            }
        })
        .into_owned()
}

fn rewrite_joins(query: &str, metadata: &EntityMetadataMap) -> String {
    JOIN_ENTITY
        .replace_all(query, |caps: &Captures<'_>| {
            let join = &caps[1];
            let entity = &caps[2];
            let alias = &caps[3];
            let on = &caps[4];
            match metadata.get(entity) {
                Some(meta) => format!("{join} {} {alias} {on}", meta.qualified_table()),
                None => format!("{join} {} {on}", fallback_table_name(entity))
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{EntityMetadata, PropertyMetadata};

    fn metadata() -> EntityMetadataMap {
        let mut order = EntityMetadata::new("Order", "orders").with_schema("sales");
        order.properties.push(PropertyMetadata::new("id"));
        let mut customer = EntityMetadata::new("Customer", "customers");
        customer.properties.push(PropertyMetadata::new("id"));
        let mut map = EntityMetadataMap::new();
        map.insert(order);
        map.insert(customer);
        map
    }

    #[test]
    fn short_alias_with_metadata_keeps_alias() {
        let out = convert_from_clause("SELECT * FROM Order o WHERE o.id = @id", &metadata());
        assert_eq!(out, "SELECT * FROM sales.orders o WHERE o.id = @id");
    }

    #[test]
    fn short_alias_without_metadata_drops_alias() {
        let out = convert_from_clause(
            "SELECT * FROM Widget w WHERE w.name = @n",
            &EntityMetadataMap::new(),
        );
        assert_eq!(out, "SELECT * FROM widgets WHERE w.name = @n");
    }

    #[test]
    fn from_at_end_of_string() {
        let out = convert_from_clause("SELECT * FROM Widget w", &EntityMetadataMap::new());
        assert_eq!(out, "SELECT * FROM widgets");
    }

    #[test]
    fn long_alias_is_handled_by_second_pass() {
        let out = convert_from_clause("SELECT * FROM Order item WHERE item.id = @id", &metadata());
        assert_eq!(out, "SELECT * FROM sales.orders item WHERE item.id = @id");
    }

    #[test]
    fn join_with_metadata() {
        let out = convert_from_clause(
            "SELECT * FROM Order o JOIN Customer c ON o.customer_id = c.id",
            &metadata(),
        );
        assert_eq!(
            out,
            "SELECT * FROM sales.orders o JOIN customers c ON o.customer_id = c.id"
        );
    }

    #[test]
    fn left_join_without_metadata() {
        let out = convert_from_clause(
            "SELECT * FROM Order o LEFT JOIN Invoice i ON o.id = i.order_id",
            &metadata(),
        );
        assert_eq!(
            out,
            "SELECT * FROM sales.orders o LEFT JOIN invoices ON o.id = i.order_id"
        );
    }

    #[test]
    fn category_pluralization_in_fallback() {
        let out = convert_from_clause("SELECT * FROM Category c", &EntityMetadataMap::new());
        assert_eq!(out, "SELECT * FROM categories");
    }
}
