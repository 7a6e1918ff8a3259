// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming-convention fallbacks.
//!
//! Used wherever entity or property metadata is absent and a physical name
//! must be synthesized. Explicit column mappings always win over these
//! conventions. Both functions are pure and total, with no locale
//! sensitivity beyond ASCII case folding.

/// Convert a name to snake_case.
///
/// Inserts `_` before every uppercase letter except the first character and
/// lowercases the result. Already snake_case input passes through unchanged,
/// which makes the function idempotent.
///
/// # Example
///
/// ```rust
/// use cpql_core::translate::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("firstName"), "first_name");
/// assert_eq!(to_snake_case("OrderItem"), "order_item");
/// assert_eq!(to_snake_case("email"), "email");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Pluralize a table-name candidate.
///
/// Suffix rules only: `y` becomes `ies`, sibilant endings (`s`, `x`, `z`,
/// `ch`, `sh`) get `es`, everything else gets `s`.
///
/// # Example
///
/// ```rust
/// use cpql_core::translate::naming::pluralize;
///
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("user"), "users");
/// ```
#[must_use]
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Fallback table name for an entity with no metadata.
#[must_use]
pub fn fallback_table_name(entity_name: &str) -> String {
    pluralize(&to_snake_case(entity_name))
}
