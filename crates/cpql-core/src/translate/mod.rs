// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CPQL-to-SQL translation engine.
//!
//! The translator is a fixed pipeline of pure `&str -> String` rewrite
//! passes. Parameter conversion and alias extraction run first, then a
//! query-kind-dependent converter sequence, then optional cosmetic
//! formatting:
//!
//! | kind | converter sequence |
//! |------|--------------------|
//! | INSERT | insert clause |
//! | UPDATE | update clause, alias stripping |
//! | DELETE | delete-from clause, alias stripping |
//! | SELECT | select clause, from/join clause, alias stripping |
//!
//! There is no error path. A malformed query matches no patterns, passes
//! through each converter unchanged and comes back near-verbatim:
//! translation is best-effort by design because its output feeds code
//! generation, where a hard failure would block the whole build.
//! Unresolvable entity, alias and property references degrade to the
//! snake_case / pluralization conventions in [`naming`].
//!
//! Determinism is a hard requirement: identical query and metadata inputs
//! must produce byte-identical SQL, since the output is embedded in
//! generated source that must not churn between builds.

pub mod alias;
pub mod dml;
pub mod format;
pub mod from;
pub mod keywords;
pub mod naming;
pub mod params;
pub mod select;
pub mod strip;

pub use alias::EntityAliasMap;
pub use format::format_sql;
pub use keywords::{BooleanJoin, PredicateKeyword, build_predicate};
pub use params::{collect_named_params, convert_named_params, to_positional};

use crate::meta::EntityMetadataMap;

/// The four statement kinds the translator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// SELECT — also the default for anything unrecognized.
    Select,

    /// INSERT statement.
    Insert,

    /// UPDATE statement.
    Update,

    /// DELETE statement.
    Delete
}

impl QueryKind {
    /// Classify a CPQL string by its leading keyword.
    ///
    /// The test is a case-insensitive prefix match on the trimmed string;
    /// anything that is not INSERT, UPDATE or DELETE counts as SELECT.
    #[must_use]
    pub fn detect(query: &str) -> Self {
        let trimmed = query.trim_start();
        if starts_with_keyword(trimmed, "INSERT") {
            Self::Insert
        } else if starts_with_keyword(trimmed, "UPDATE") {
            Self::Update
        } else if starts_with_keyword(trimmed, "DELETE") {
            Self::Delete
        } else {
            Self::Select
        }
    }
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

/// Translate a CPQL string into dialect-neutral SQL.
///
/// `metadata` drives every table and column resolution; an empty map sends
/// each converter down its naming-convention fallback path. Parameters come
/// in as `:name` and go out as `@name`.
///
/// # Example
///
/// ```rust
/// use cpql_core::meta::EntityMetadataMap;
/// use cpql_core::translate::translate;
///
/// let sql = translate(
///     "SELECT e FROM Widget e WHERE e.Name = :n",
///     &EntityMetadataMap::new(),
/// );
/// assert_eq!(sql, "SELECT * FROM widgets WHERE name = @n");
/// ```
#[must_use]
pub fn translate(cpql: &str, metadata: &EntityMetadataMap) -> String {
    let query = params::convert_named_params(cpql);
    let aliases = EntityAliasMap::extract(&query);

    match QueryKind::detect(&query) {
        QueryKind::Insert => dml::convert_insert_clause(&query, metadata),
        QueryKind::Update => {
            let query = dml::convert_update_clause(&query, metadata);
            strip::remove_entity_aliases(&query, metadata, &aliases)
        }
        QueryKind::Delete => {
            let query = dml::convert_delete_from_clause(&query, metadata);
            strip::remove_entity_aliases(&query, metadata, &aliases)
        }
        QueryKind::Select => {
            let query = select::convert_select_clause(&query, metadata, &aliases);
            let query = from::convert_from_clause(&query, metadata);
            strip::remove_entity_aliases(&query, metadata, &aliases)
        }
    }
}

/// [`translate`] plus the cosmetic clause formatter.
#[must_use]
pub fn translate_formatted(cpql: &str, metadata: &EntityMetadataMap) -> String {
    format_sql(&translate(cpql, metadata))
}
