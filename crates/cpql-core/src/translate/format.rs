// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cosmetic SQL formatter.
//!
//! Breaks a single-line statement before each major clause so generated SQL
//! reads well in source form. Purely whitespace-level: token content is
//! never changed, and running the formatter on its own output is a no-op.

use std::sync::LazyLock;

use regex::Regex;

static CLAUSE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(FROM\b|WHERE\b|GROUP\s+BY\b|ORDER\s+BY\b|HAVING\b|LIMIT\b|OFFSET\b|VALUES\b|SET\b|(?:INNER\s+|LEFT\s+|RIGHT\s+|FULL\s+)?JOIN\b)",
    )
    .expect("valid regex")
});

/// Insert a line break before each major clause keyword.
///
/// # Example
///
/// ```rust
/// use cpql_core::translate::format::format_sql;
///
/// let sql = "SELECT id FROM users WHERE id = $1";
/// assert_eq!(format_sql(sql), "SELECT id\nFROM users\nWHERE id = $1");
/// assert_eq!(format_sql(&format_sql(sql)), format_sql(sql));
/// ```
#[must_use]
pub fn format_sql(sql: &str) -> String {
    CLAUSE_BREAK.replace_all(sql.trim(), "\n${1}").into_owned()
}
