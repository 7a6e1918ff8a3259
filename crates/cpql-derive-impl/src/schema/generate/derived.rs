// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derived query methods.
//!
//! Parses convention-based method names — `find_by_age_greater_than`,
//! `count_by_status_and_deleted_false`, ... — into predicate tokens for the
//! keyword builder. Keyword suffixes are matched longest-first so properties
//! containing underscores (`first_name_containing`) split correctly; an
//! `_ignore_case` suffix becomes a standalone retroactive token.

use convert_case::{Case, Casing};
use cpql_core::meta::EntityMetadata;
use cpql_core::translate::keywords::{BooleanJoin, PredicateKeyword, build_predicate};

/// Operation selected by the method-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedOp {
    /// `find_by_*` — SELECT returning entities.
    Find,

    /// `count_by_*` — SELECT COUNT(*).
    Count,

    /// `exists_by_*` — SELECT COUNT(*), compared against zero.
    Exists,

    /// `delete_by_*` — DELETE.
    Delete
}

/// A parsed derived-query method name.
#[derive(Debug)]
pub struct DerivedQuery {
    /// The operation from the prefix.
    pub op: DerivedOp,

    /// Predicate tokens in `Property` / `Property:Keyword` form.
    pub tokens: Vec<String>,

    /// Connectives between consecutive tokens.
    pub joins: Vec<BooleanJoin>
}

/// Keyword suffixes in snake_case, longest first. The canonical token
/// spelling is the PascalCase form of the suffix.
const KEYWORD_SUFFIXES: [&str; 30] = [
    "_greater_than_equal",
    "_less_than_equal",
    "_not_containing",
    "_starting_with",
    "_greater_than",
    "_is_not_null",
    "_ending_with",
    "_starts_with",
    "_containing",
    "_less_than",
    "_ends_with",
    "_contains",
    "_not_like",
    "_not_null",
    "_between",
    "_is_null",
    "_matches",
    "_equals",
    "_before",
    "_is_not",
    "_not_in",
    "_regex",
    "_after",
    "_false",
    "_like",
    "_null",
    "_true",
    "_not",
    "_is",
    "_in",
];

/// Parse a derived-query method name.
///
/// Returns `None` when the name carries no recognized prefix.
pub fn parse_derived(name: &str) -> Option<DerivedQuery> {
    let (op, rest) = if let Some(rest) = name.strip_prefix("find_by_") {
        (DerivedOp::Find, rest)
    } else if let Some(rest) = name.strip_prefix("count_by_") {
        (DerivedOp::Count, rest)
    } else if let Some(rest) = name.strip_prefix("exists_by_") {
        (DerivedOp::Exists, rest)
    } else if let Some(rest) = name.strip_prefix("delete_by_") {
        (DerivedOp::Delete, rest)
    } else {
        return None;
    };

    let mut tokens = Vec::new();
    let mut joins = Vec::new();

    for (i, segment) in split_segments(rest).into_iter().enumerate() {
        let (segment, join) = segment;
        if i > 0 {
            joins.push(join);
        }
        push_tokens(segment, &mut tokens);
    }

    Some(DerivedQuery {
        op,
        tokens,
        joins
    })
}

/// Split on `_and_` / `_or_`, earliest occurrence first. The connective is
/// attached to the segment it precedes; the first segment's connective is
/// ignored.
fn split_segments(rest: &str) -> Vec<(&str, BooleanJoin)> {
    let mut segments = Vec::new();
    let mut remaining = rest;
    let mut pending = BooleanJoin::And;

    loop {
        let and_pos = remaining.find("_and_");
        let or_pos = remaining.find("_or_");
        match (and_pos, or_pos) {
            (Some(a), Some(o)) if a < o => {
                segments.push((&remaining[..a], pending));
                pending = BooleanJoin::And;
                remaining = &remaining[a + 5..];
            }
            (Some(a), None) => {
                segments.push((&remaining[..a], pending));
                pending = BooleanJoin::And;
                remaining = &remaining[a + 5..];
            }
            (_, Some(o)) => {
                segments.push((&remaining[..o], pending));
                pending = BooleanJoin::Or;
                remaining = &remaining[o + 4..];
            }
            (None, None) => {
                segments.push((remaining, pending));
                return segments;
            }
        }
    }
}

/// Turn one segment into its predicate token(s).
fn push_tokens(segment: &str, tokens: &mut Vec<String>) {
    let (segment, ignore_case) = match segment.strip_suffix("_ignore_case") {
        Some(stripped) => (stripped, true),
        None => (segment, false)
    };

    let token = KEYWORD_SUFFIXES
        .iter()
        .find_map(|suffix| {
            segment
                .strip_suffix(suffix)
                .filter(|property| !property.is_empty())
                .map(|property| format!("{property}:{}", suffix.to_case(Case::Pascal)))
        })
        .unwrap_or_else(|| segment.to_string());

    tokens.push(token);
    if ignore_case {
        tokens.push("IgnoreCase".to_string());
    }
}

/// Number of method parameters the derived query consumes.
pub fn parameter_count(query: &DerivedQuery) -> usize {
    query
        .tokens
        .iter()
        .map(|token| match token.split_once(':') {
            Some((_, keyword)) => PredicateKeyword::parse(keyword)
                .map(|k| k.parameter_count())
                .unwrap_or(1),
            None => match PredicateKeyword::parse(token) {
                Some(PredicateKeyword::IgnoreCase) => 0,
                _ => 1
            }
        })
        .sum()
}

/// Build the SQL for a derived query, with `@name` placeholders taken from
/// the method's parameter names.
pub fn derived_sql(
    query: &DerivedQuery,
    columns: &str,
    table: &str,
    params: &[&str],
    entity: &EntityMetadata
) -> String {
    let tokens: Vec<&str> = query.tokens.iter().map(String::as_str).collect();
    let predicate = build_predicate(&tokens, &query.joins, params, Some(entity));

    match query.op {
        DerivedOp::Find => format!("SELECT {columns} FROM {table} WHERE {predicate}"),
        DerivedOp::Count | DerivedOp::Exists => {
            format!("SELECT COUNT(*) FROM {table} WHERE {predicate}")
        }
        DerivedOp::Delete => format!("DELETE FROM {table} WHERE {predicate}")
    }
}
