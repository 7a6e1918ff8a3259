// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro implementation for cpql-derive.
//!
//! # Overview
//!
//! The [`schema`] attribute macro turns a module of `#[entity]` structs and
//! `#[repository]` traits into a complete data-access layer: entity structs
//! gain row-mapping derives, repository traits are implemented for
//! `sqlx::PgPool`, and every `#[query]` string is translated from CPQL to
//! SQL at compile time using the metadata collected from the module.
//!
//! One macro invocation is one generation pass: entities and repositories
//! that share metadata must live in the same `#[schema]` module, because a
//! procedural macro cannot see items outside its own input.
//!
//! ```rust,ignore
//! use cpql_derive::schema;
//!
//! #[schema]
//! mod store {
//!     #[entity(table = "users", schema = "core")]
//!     pub struct User {
//!         #[id]
//!         pub id: i64,
//!         #[column(name = "user_name")]
//!         pub name: String,
//!         pub email: Option<String>,
//!     }
//!
//!     #[repository(entity = "User")]
//!     pub trait UserRepository {
//!         #[query("SELECT u FROM User u WHERE u.email = :email")]
//!         async fn with_email(&self, email: &str) -> Result<Vec<User>, sqlx::Error>;
//!
//!         async fn find_by_name_containing(&self, part: &str) -> Result<Vec<User>, sqlx::Error>;
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod schema;

use proc_macro::TokenStream;

/// Attribute macro generating repository implementations for a module.
///
/// # Recognized Items
///
/// | Item | Attribute | Effect |
/// |------|-----------|--------|
/// | struct | `#[entity(table = "...", schema = "...")]` | Entity: contributes metadata, gains `sqlx::FromRow` |
/// | struct field | `#[id]` | Primary key |
/// | struct field | `#[column(name = "...", unique, nullable)]` | Column overrides |
/// | struct | `#[relation(name, kind, target, join_column)]` | Relationship metadata for joins |
/// | trait | `#[repository(entity = "...")]` | Repository: implemented for `sqlx::PgPool` |
/// | trait method | `#[query("...")]` | CPQL query, translated at compile time |
/// | trait method | `#[query(native = "...")]` | Raw SQL, emitted verbatim |
/// | trait method | `find_by_*` / `count_by_*` / `exists_by_*` / `delete_by_*` | Derived query from the method name |
///
/// Every repository trait also receives the built-in methods `save`,
/// `find_by_id`, `find_all`, `list`, `delete_by_id` and `count` unless a
/// method of that name is already declared.
///
/// Items without these attributes pass through unchanged.
#[proc_macro_attribute]
pub fn schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    schema::expand(attr.into(), item.into()).into()
}
