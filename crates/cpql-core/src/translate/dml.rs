// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! INSERT / UPDATE / DELETE clause converters.
//!
//! Each converter resolves the entity to its physical table name (metadata
//! first, `pluralize(snake_case(..))` fallback otherwise). The INSERT
//! converter additionally resolves its column list; VALUES lists are left
//! untouched because parameters were already converted. UPDATE and DELETE
//! drop the entity alias; their property references are handled afterwards
//! by the alias-stripping pass.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::naming::{fallback_table_name, to_snake_case};
use super::strip::is_sql_keyword;
use crate::meta::{EntityMetadata, EntityMetadataMap};

static INSERT_INTO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(INSERT\s+INTO)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)").expect("valid regex")
});

static UPDATE_WITH_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(UPDATE)\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w*)\s+(SET)\b").expect("valid regex")
});

static UPDATE_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(UPDATE)\s+([A-Za-z_]\w*)\s+(SET)\b").expect("valid regex")
});

static DELETE_WITH_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(DELETE\s+FROM)\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w*)(?:\s+(WHERE)\b|\s*$)")
        .expect("valid regex")
});

static DELETE_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(DELETE\s+FROM)\s+([A-Za-z_]\w*)(?:\s+(WHERE)\b|\s*$)")
        .expect("valid regex")
});

fn table_name(entity: &str, metadata: &EntityMetadataMap) -> String {
    match metadata.get(entity) {
        Some(meta) => meta.qualified_table(),
        None => fallback_table_name(entity)
    }
}

fn column_name(column: &str, meta: Option<&EntityMetadata>) -> String {
    match meta {
        Some(meta) => meta.resolve_column(column),
        None => to_snake_case(column)
    }
}

/// Rewrite `INSERT INTO Entity (col, ...)` to the physical table and
/// columns.
#[must_use]
pub fn convert_insert_clause(query: &str, metadata: &EntityMetadataMap) -> String {
    INSERT_INTO
        .replace(query, |caps: &Captures<'_>| {
            let insert = &caps[1];
            let entity = &caps[2];
            let meta = metadata.get(entity);
            let columns = caps[3]
                .split(',')
                .map(|c| column_name(c.trim(), meta))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{insert} {} ({columns})", table_name(entity, metadata))
        })
        .into_owned()
}

/// Rewrite `UPDATE Entity alias SET` to `UPDATE table SET`.
#[must_use]
pub fn convert_update_clause(query: &str, metadata: &EntityMetadataMap) -> String {
    if UPDATE_WITH_ALIAS.is_match(query) {
        return UPDATE_WITH_ALIAS
            .replace(query, |caps: &Captures<'_>| {
                format!("{} {} {}", &caps[1], table_name(&caps[2], metadata), &caps[4])
            })
            .into_owned();
    }
    UPDATE_PLAIN
        .replace(query, |caps: &Captures<'_>| {
            format!("{} {} {}", &caps[1], table_name(&caps[2], metadata), &caps[3])
        })
        .into_owned()
}

/// Rewrite `DELETE FROM Entity alias` to `DELETE FROM table`.
#[must_use]
pub fn convert_delete_from_clause(query: &str, metadata: &EntityMetadataMap) -> String {
    if let Some(caps) = DELETE_WITH_ALIAS.captures(query)
        && !is_sql_keyword(&caps[3])
    {
        return DELETE_WITH_ALIAS
            .replace(query, |caps: &Captures<'_>| {
                let table = table_name(&caps[2], metadata);
                match caps.get(4) {
                    Some(kw) => format!("{} {table} {}", &caps[1], kw.as_str()),
                    None => format!("{} {table}", &caps[1])
                }
            })
            .into_owned();
    }
    DELETE_PLAIN
        .replace(query, |caps: &Captures<'_>| {
            let table = table_name(&caps[2], metadata);
            match caps.get(3) {
                Some(kw) => format!("{} {table} {}", &caps[1], kw.as_str()),
                None => format!("{} {table}", &caps[1])
            }
        })
        .into_owned()
}
