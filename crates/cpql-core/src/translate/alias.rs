// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity alias resolution.
//!
//! Scans a CPQL string for `FROM Entity alias`, `UPDATE Entity alias SET`
//! and `JOIN Entity alias` occurrences and records which alias token stands
//! for which entity within that one query. The map is rebuilt for every
//! query string and consulted by all downstream rewrite passes.
//!
//! A later occurrence of an entity name overwrites the earlier alias for
//! that name (last-match-wins). For self-joins this silently drops the
//! first alias; the behavior is kept for compatibility and pinned by a
//! test.

use std::sync::LazyLock;

use regex::Regex;

use super::strip::is_sql_keyword;

static FROM_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFROM\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w*)").expect("valid regex")
});

static UPDATE_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bUPDATE\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w*)\s+SET\b").expect("valid regex")
});

static JOIN_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:INNER\s+|LEFT\s+|RIGHT\s+|FULL\s+)?JOIN\s+([A-Za-z_]\w*)\s+([A-Za-z_]\w*)")
        .expect("valid regex")
});

/// Map from logical entity name to the alias token used in one query.
///
/// Entity names preserve source casing; lookups in either direction are
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct EntityAliasMap {
    entries: Vec<(String, String)>
}

impl EntityAliasMap {
    /// Build the alias map for one CPQL string.
    ///
    /// Scan order is fixed: the first `FROM Entity alias` pair, then the
    /// first `UPDATE Entity alias SET` pair, then every `JOIN Entity alias`
    /// pair. Keyword tokens are never accepted as aliases, so `FROM widgets
    /// WHERE ...` contributes no mapping.
    #[must_use]
    pub fn extract(query: &str) -> Self {
        let mut map = Self::default();

        if let Some(caps) = FROM_ALIAS.captures(query)
            && !is_sql_keyword(&caps[2])
        {
            map.insert(&caps[1], &caps[2]);
        }

        if let Some(caps) = UPDATE_ALIAS.captures(query) {
            map.insert(&caps[1], &caps[2]);
        }

        for caps in JOIN_ALIAS.captures_iter(query) {
            if !is_sql_keyword(&caps[2]) {
                map.insert(&caps[1], &caps[2]);
            }
        }

        map
    }

    fn insert(&mut self, entity: &str, alias: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(entity))
        {
            entry.1 = alias.to_string();
        } else {
            self.entries.push((entity.to_string(), alias.to_string()));
        }
    }

    /// Alias bound to an entity name, if any.
    #[must_use]
    pub fn alias_for(&self, entity: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(entity))
            .map(|(_, alias)| alias.as_str())
    }

    /// Entity name bound to an alias token, if any.
    #[must_use]
    pub fn entity_for(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, a)| a.eq_ignore_ascii_case(alias))
            .map(|(name, _)| name.as_str())
    }

    /// Whether any alias was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct entities with an alias.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
