// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Predicate keyword builder.
//!
//! Translates `"Property"` / `"Property:Keyword"` tokens into a single SQL
//! boolean expression. Consecutive clauses are joined left-to-right with the
//! supplied separators, defaulting to `AND` when the separator list is
//! exhausted.
//!
//! Parameter consumption is positional and sequential: keywords that take no
//! parameter (IsNull, True, ...) must not advance the parameter index or
//! every following binding misaligns. `IgnoreCase` is retroactive — it wraps
//! the previous clause's column and parameters in `LOWER(...)`.

use super::naming::to_snake_case;
use crate::meta::EntityMetadata;

/// Boolean connective between two predicate clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanJoin {
    /// Both clauses must hold.
    #[default]
    And,

    /// Either clause may hold.
    Or
}

impl BooleanJoin {
    /// SQL spelling of the connective.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR"
        }
    }
}

/// Comparison keyword recognized after `Property:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKeyword {
    /// `col > @p`
    GreaterThan,
    /// `col >= @p`
    GreaterThanEqual,
    /// `col < @p`
    LessThan,
    /// `col <= @p`
    LessThanEqual,
    /// `col BETWEEN @p1 AND @p2`
    Between,
    /// `col LIKE CONCAT('%',@p,'%')`
    Like,
    /// `col NOT LIKE CONCAT('%',@p,'%')`
    NotLike,
    /// `col LIKE CONCAT(@p,'%')`
    StartingWith,
    /// `col LIKE CONCAT('%',@p)`
    EndingWith,
    /// `col REGEXP @p`
    Regex,
    /// `col IN @p`
    In,
    /// `col NOT IN @p`
    NotIn,
    /// `col IS NULL`
    IsNull,
    /// `col IS NOT NULL`
    IsNotNull,
    /// `col = @p`
    Is,
    /// `col <> @p`
    Not,
    /// `col = TRUE`
    True,
    /// `col = FALSE`
    False,
    /// `col < @p`
    Before,
    /// `col > @p`
    After,
    /// Wraps the previous clause's column and parameters in `LOWER(...)`.
    IgnoreCase
}

impl PredicateKeyword {
    /// Parse a keyword, accepting PascalCase and snake_case spellings and
    /// every alias in the keyword table. Returns `None` for unknown text.
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        let normalized: String = keyword
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "greaterthan" => Some(Self::GreaterThan),
            "greaterthanequal" => Some(Self::GreaterThanEqual),
            "lessthan" => Some(Self::LessThan),
            "lessthanequal" => Some(Self::LessThanEqual),
            "between" => Some(Self::Between),
            "like" | "containing" | "contains" => Some(Self::Like),
            "notlike" | "notcontaining" => Some(Self::NotLike),
            "startingwith" | "startswith" => Some(Self::StartingWith),
            "endingwith" | "endswith" => Some(Self::EndingWith),
            "regex" | "matches" => Some(Self::Regex),
            "in" => Some(Self::In),
            "notin" => Some(Self::NotIn),
            "isnull" | "null" => Some(Self::IsNull),
            "isnotnull" | "notnull" => Some(Self::IsNotNull),
            "is" | "equals" => Some(Self::Is),
            "not" | "isnot" => Some(Self::Not),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "ignorecase" => Some(Self::IgnoreCase),
            _ => None
        }
    }

    /// Number of parameters the keyword consumes.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        match self {
            Self::Between => 2,
            Self::IsNull | Self::IsNotNull | Self::True | Self::False | Self::IgnoreCase => 0,
            _ => 1
        }
    }
}

struct Clause {
    sql: String,
    column: String,
    params: Vec<String>
}

/// Build a WHERE-clause boolean expression from predicate tokens.
///
/// `tokens` holds `"Property"` or `"Property:Keyword"` entries (a missing
/// keyword means equality); `joins` holds the connective between consecutive
/// clauses; `params` is the already-bound parameter name list, consumed
/// sequentially. When the parameter list runs out, positional `p{n}` names
/// are synthesized rather than failing.
///
/// # Example
///
/// ```rust
/// use cpql_core::translate::keywords::{build_predicate, BooleanJoin};
///
/// let sql = build_predicate(
///     &["Age:GreaterThan", "Email:IsNull"],
///     &[BooleanJoin::And],
///     &["min_age"],
///     None,
/// );
/// assert_eq!(sql, "age > @min_age AND email IS NULL");
/// ```
#[must_use]
pub fn build_predicate(
    tokens: &[&str],
    joins: &[BooleanJoin],
    params: &[&str],
    metadata: Option<&EntityMetadata>
) -> String {
    let mut clauses: Vec<Clause> = Vec::new();
    let mut next_param = 0usize;

    for token in tokens {
        let (property, keyword) = split_token(token);

        // A bare IgnoreCase token retroactively wraps the previous clause.
        // Without a previous clause there is nothing to do.
        if keyword.is_none()
            && PredicateKeyword::parse(property) == Some(PredicateKeyword::IgnoreCase)
        {
            if let Some(last) = clauses.last_mut() {
                apply_ignore_case(last);
            }
            continue;
        }

        let keyword = keyword.unwrap_or(PredicateKeyword::Is);
        let column = resolve_column(property, metadata);
        let mut taken = Vec::new();
        let mut take = |taken: &mut Vec<String>| {
            let name = match params.get(next_param) {
                Some(name) => format!("@{name}"),
                None => format!("@p{}", next_param + 1)
            };
            next_param += 1;
            taken.push(name.clone());
            name
        };

        let sql = match keyword {
            PredicateKeyword::GreaterThan | PredicateKeyword::After => {
                format!("{column} > {}", take(&mut taken))
            }
            PredicateKeyword::GreaterThanEqual => {
                format!("{column} >= {}", take(&mut taken))
            }
            PredicateKeyword::LessThan | PredicateKeyword::Before => {
                format!("{column} < {}", take(&mut taken))
            }
            PredicateKeyword::LessThanEqual => format!("{column} <= {}", take(&mut taken)),
            PredicateKeyword::Between => {
                let low = take(&mut taken);
                let high = take(&mut taken);
                format!("{column} BETWEEN {low} AND {high}")
            }
            PredicateKeyword::Like => {
                format!("{column} LIKE CONCAT('%',{},'%')", take(&mut taken))
            }
            PredicateKeyword::NotLike => {
                format!("{column} NOT LIKE CONCAT('%',{},'%')", take(&mut taken))
            }
            PredicateKeyword::StartingWith => {
                format!("{column} LIKE CONCAT({},'%')", take(&mut taken))
            }
            PredicateKeyword::EndingWith => {
                format!("{column} LIKE CONCAT('%',{})", take(&mut taken))
            }
            PredicateKeyword::Regex => format!("{column} REGEXP {}", take(&mut taken)),
            PredicateKeyword::In => format!("{column} IN {}", take(&mut taken)),
            PredicateKeyword::NotIn => format!("{column} NOT IN {}", take(&mut taken)),
            PredicateKeyword::IsNull => format!("{column} IS NULL"),
            PredicateKeyword::IsNotNull => format!("{column} IS NOT NULL"),
            PredicateKeyword::Is => format!("{column} = {}", take(&mut taken)),
            PredicateKeyword::Not => format!("{column} <> {}", take(&mut taken)),
            PredicateKeyword::True => format!("{column} = TRUE"),
            PredicateKeyword::False => format!("{column} = FALSE"),
            // `Property:IgnoreCase` is case-folded equality.
            PredicateKeyword::IgnoreCase => format!("{column} = {}", take(&mut taken))
        };

        let mut clause = Clause {
            sql,
            column,
            params: taken
        };
        if keyword == PredicateKeyword::IgnoreCase {
            apply_ignore_case(&mut clause);
        }
        clauses.push(clause);
    }

    let mut out = String::new();
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            let join = joins.get(i - 1).copied().unwrap_or_default();
            out.push(' ');
            out.push_str(join.as_sql());
            out.push(' ');
        }
        out.push_str(&clause.sql);
    }
    out
}

fn split_token(token: &str) -> (&str, Option<PredicateKeyword>) {
    match token.split_once(':') {
        Some((property, keyword)) => (property.trim(), PredicateKeyword::parse(keyword.trim())),
        None => (token.trim(), None)
    }
}

fn resolve_column(property: &str, metadata: Option<&EntityMetadata>) -> String {
    match metadata {
        Some(meta) => meta.resolve_column(property),
        None => to_snake_case(property)
    }
}

fn apply_ignore_case(clause: &mut Clause) {
    let wrapped_column = format!("LOWER({})", clause.column);
    clause.sql = clause.sql.replacen(&clause.column, &wrapped_column, 1);
    for param in &clause.params {
        let wrapped = format!("LOWER({param})");
        clause.sql = clause.sql.replacen(param.as_str(), &wrapped, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{EntityMetadata, PropertyMetadata};

    fn person() -> EntityMetadata {
        let mut entity = EntityMetadata::new("Person", "people");
        entity
            .properties
            .push(PropertyMetadata::new("Age").with_column("age_years"));
        entity.properties.push(PropertyMetadata::new("Email"));
        entity
    }

    #[test]
    fn default_keyword_is_equality() {
        let sql = build_predicate(&["Name"], &[], &["name"], None);
        assert_eq!(sql, "name = @name");
    }

    #[test]
    fn greater_than_with_metadata_column() {
        let sql = build_predicate(&["Age:GreaterThan"], &[], &["age"], Some(&person()));
        assert_eq!(sql, "age_years > @age");
    }

    #[test]
    fn between_consumes_two_parameters() {
        let sql = build_predicate(
            &["Age:Between", "Email"],
            &[BooleanJoin::And],
            &["low", "high", "mail"],
            None,
        );
        assert_eq!(sql, "age BETWEEN @low AND @high AND email = @mail");
    }

    #[test]
    fn null_keyword_does_not_advance_parameters() {
        // The parameter after IsNull must still bind to the next clause.
        let sql = build_predicate(
            &["Email:IsNull", "Name"],
            &[BooleanJoin::And],
            &["name"],
            None,
        );
        assert_eq!(sql, "email IS NULL AND name = @name");
    }

    #[test]
    fn containing_builds_concat_like() {
        let sql = build_predicate(&["Name:Containing"], &[], &["part"], None);
        assert_eq!(sql, "name LIKE CONCAT('%',@part,'%')");
    }

    #[test]
    fn starting_and_ending_with() {
        assert_eq!(
            build_predicate(&["Name:StartingWith"], &[], &["prefix"], None),
            "name LIKE CONCAT(@prefix,'%')"
        );
        assert_eq!(
            build_predicate(&["Name:EndsWith"], &[], &["suffix"], None),
            "name LIKE CONCAT('%',@suffix)"
        );
    }

    #[test]
    fn boolean_keywords_take_no_parameters() {
        let sql = build_predicate(
            &["Active:True", "Deleted:False"],
            &[BooleanJoin::And],
            &[],
            None,
        );
        assert_eq!(sql, "active = TRUE AND deleted = FALSE");
    }

    #[test]
    fn or_separator_and_default_and() {
        let sql = build_predicate(
            &["A", "B", "C"],
            &[BooleanJoin::Or],
            &["a", "b", "c"],
            None,
        );
        assert_eq!(sql, "a = @a OR b = @b AND c = @c");
    }

    #[test]
    fn ignore_case_wraps_previous_clause() {
        let sql = build_predicate(
            &["Email", "IgnoreCase"],
            &[],
            &["mail"],
            Some(&person()),
        );
        assert_eq!(sql, "LOWER(email) = LOWER(@mail)");
    }

    #[test]
    fn ignore_case_leaves_following_bindings_aligned() {
        let sql = build_predicate(
            &["Email", "IgnoreCase", "Age:LessThan"],
            &[BooleanJoin::And, BooleanJoin::And],
            &["mail", "max_age"],
            Some(&person()),
        );
        assert_eq!(sql, "LOWER(email) = LOWER(@mail) AND age_years < @max_age");
    }

    #[test]
    fn property_ignore_case_suffix_folds_both_sides() {
        let sql = build_predicate(&["Email:IgnoreCase"], &[], &["mail"], None);
        assert_eq!(sql, "LOWER(email) = LOWER(@mail)");
    }

    #[test]
    fn parameter_underflow_synthesizes_names() {
        let sql = build_predicate(&["A", "B"], &[BooleanJoin::And], &["a"], None);
        assert_eq!(sql, "a = @a AND b = @p2");
    }

    #[test]
    fn unknown_keyword_degrades_to_equality() {
        let sql = build_predicate(&["Name:Wibbles"], &[], &["n"], None);
        assert_eq!(sql, "name = @n");
    }

    #[test]
    fn keyword_aliases_parse() {
        assert_eq!(
            PredicateKeyword::parse("greater_than"),
            Some(PredicateKeyword::GreaterThan)
        );
        assert_eq!(PredicateKeyword::parse("Matches"), Some(PredicateKeyword::Regex));
        assert_eq!(PredicateKeyword::parse("NotNull"), Some(PredicateKeyword::IsNotNull));
        assert_eq!(PredicateKeyword::parse("equals"), Some(PredicateKeyword::Is));
        assert_eq!(PredicateKeyword::parse("IsNot"), Some(PredicateKeyword::Not));
        assert_eq!(PredicateKeyword::parse("frobnicate"), None);
    }

    #[test]
    fn parameter_counts() {
        assert_eq!(PredicateKeyword::Between.parameter_count(), 2);
        assert_eq!(PredicateKeyword::IsNull.parameter_count(), 0);
        assert_eq!(PredicateKeyword::IgnoreCase.parameter_count(), 0);
        assert_eq!(PredicateKeyword::Like.parameter_count(), 1);
    }
}
