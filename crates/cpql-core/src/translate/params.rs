// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter placeholder conversion.
//!
//! CPQL strings carry `:name` placeholders; translated SQL carries `@name`.
//! The rewrite is purely textual and does not understand string literals, so
//! a quoted literal containing `:word` is rewritten too. That limitation is
//! part of the contract and pinned by a test — do not "fix" it here.
//!
//! The `@name` → `$n` positionalization helpers are consumed by the
//! method-body generator, which binds arguments in first-appearance order.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static COLON_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\w+)").expect("valid regex"));

static AT_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid regex"));

/// Rewrite every `:identifier` placeholder to `@identifier`.
///
/// # Example
///
/// ```rust
/// use cpql_core::translate::params::convert_named_params;
///
/// assert_eq!(
///     convert_named_params("WHERE age > :min AND age < :max"),
///     "WHERE age > @min AND age < @max"
/// );
/// ```
#[must_use]
pub fn convert_named_params(query: &str) -> String {
    COLON_PARAM.replace_all(query, "@${1}").into_owned()
}

/// Collect `@name` placeholders in first-appearance order, deduplicated.
#[must_use]
pub fn collect_named_params(sql: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in AT_PARAM.captures_iter(sql) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Rewrite `@name` placeholders to positional `$n` placeholders.
///
/// Numbering follows first appearance; repeated names share one ordinal, so
/// the caller binds each distinct parameter exactly once.
#[must_use]
pub fn to_positional(sql: &str) -> (String, Vec<String>) {
    let names = collect_named_params(sql);
    let rewritten = AT_PARAM.replace_all(sql, |caps: &Captures<'_>| {
        match names.iter().position(|n| n == &caps[1]) {
            Some(idx) => format!("${}", idx + 1),
            None => caps[0].to_string()
        }
    });
    (rewritten.into_owned(), names)
}
