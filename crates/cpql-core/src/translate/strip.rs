// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Alias-stripping converter.
//!
//! Resolves every remaining `alias.Property` occurrence to its physical
//! column name via alias → entity → metadata, falling back to
//! snake_case(Property) when unresolved.
//!
//! Stripping is confined to the clauses that can hold property references —
//! WHERE, ORDER BY, GROUP BY, HAVING, ON, and SET for UPDATE. Each region
//! runs from its keyword to the next FROM/JOIN keyword or end of string.
//! Confinement matters twice over: the SELECT list's qualified columns
//! (already rewritten with `AS` labels by the select converter) stay
//! untouched, and so do schema-qualified table names like `core.users`,
//! which the dotted-reference pattern would otherwise mangle.
//!
//! A fixed SQL-keyword denylist prevents keyword tokens adjacent to a `.`
//! from being mistaken for aliases.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::naming::to_snake_case;
use crate::meta::EntityMetadataMap;

use super::alias::EntityAliasMap;

/// Keywords that are never treated as alias tokens.
pub(crate) const SQL_KEYWORDS: [&str; 25] = [
    "SELECT", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "ON", "AND", "OR",
    "NOT", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "COUNT", "AVG", "SUM", "MAX",
    "MIN", "DISTINCT", "AS",
];

/// Whether a token is on the SQL-keyword denylist (case-insensitive).
pub(crate) fn is_sql_keyword(token: &str) -> bool {
    SQL_KEYWORDS.iter().any(|k| token.eq_ignore_ascii_case(k))
}

static ALIAS_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_]\w*)\s*\.\s*([A-Za-z_]\w*)\b").expect("valid regex")
});

static REGION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:WHERE|ORDER\s+BY|GROUP\s+BY|HAVING|ON|SET)\b").expect("valid regex")
});

static REGION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:FROM|(?:INNER\s+|LEFT\s+|RIGHT\s+|FULL\s+)?JOIN)\b")
        .expect("valid regex")
});

/// Strip entity aliases from qualified property references.
#[must_use]
pub fn remove_entity_aliases(
    query: &str,
    metadata: &EntityMetadataMap,
    aliases: &EntityAliasMap
) -> String {
    let mut out = String::new();
    let mut pos = 0;

    while let Some(start) = REGION_START.find_at(query, pos) {
        let body_start = start.end();
        let body_end = REGION_END
            .find_at(query, body_start)
            .map(|end| end.start())
            .unwrap_or(query.len());

        out.push_str(&query[pos..body_start]);
        out.push_str(&strip(&query[body_start..body_end], metadata, aliases));
        pos = body_end;

        if pos >= query.len() {
            break;
        }
    }

    out.push_str(&query[pos..]);
    out
}

fn strip(text: &str, metadata: &EntityMetadataMap, aliases: &EntityAliasMap) -> String {
    ALIAS_REF
        .replace_all(text, |caps: &Captures<'_>| {
            let alias = &caps[1];
            let property = &caps[2];
            if is_sql_keyword(alias) {
                return caps[0].to_string();
            }
            resolve_column_ref(alias, property, metadata, aliases)
        })
        .into_owned()
}

/// Resolve an `alias.Property` pair to a physical column name, falling back
/// to snake_case when the alias or entity is unknown.
pub(crate) fn resolve_column_ref(
    alias: &str,
    property: &str,
    metadata: &EntityMetadataMap,
    aliases: &EntityAliasMap
) -> String {
    aliases
        .entity_for(alias)
        .and_then(|entity| metadata.get(entity))
        .map(|entity| entity.resolve_column(property))
        .unwrap_or_else(|| to_snake_case(property))
}
