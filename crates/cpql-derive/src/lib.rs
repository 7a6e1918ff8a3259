// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # cpql-derive
//!
//! One crate, all features. Re-exports:
//! - [`schema`] attribute macro from `cpql-derive-impl`
//! - All types from `cpql-core` ([`meta`], [`translate`], [`Pagination`],
//!   [`Repository`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cpql_derive::schema;
//!
//! #[schema]
//! mod store {
//!     #[entity(table = "users")]
//!     pub struct User {
//!         #[id]
//!         pub id: i64,
//!         pub email: String,
//!     }
//!
//!     #[repository(entity = "User")]
//!     pub trait UserRepository {
//!         #[query("SELECT u FROM User u WHERE u.email = :email")]
//!         async fn with_email(&self, email: &str) -> Result<Vec<User>, sqlx::Error>;
//!     }
//! }
//!
//! // impl UserRepository for sqlx::PgPool is generated; a pool is a repository.
//! ```

// Re-export the attribute macro
// Re-export all core types
pub use cpql_core::*;
pub use cpql_derive_impl::schema;
