// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core types for cpql-derive: the entity metadata model, the CPQL-to-SQL
//! translation engine and the runtime traits used by generated repositories.
//!
//! # Overview
//!
//! - [`meta`] — compile-time entity metadata (tables, columns, relationships)
//! - [`translate`] — the CPQL-to-SQL translator and its helper passes
//! - [`Repository`] — base trait for all generated repository traits
//! - [`Pagination`] — common pagination parameters
//! - [`prelude`] — convenient re-exports
//!
//! # Usage
//!
//! Most users should use `cpql-derive` directly, which re-exports this crate.
//! The translator can also be driven by hand:
//!
//! ```rust
//! use cpql_core::meta::{EntityMetadata, EntityMetadataMap, PropertyMetadata};
//! use cpql_core::translate::translate;
//!
//! let mut entity = EntityMetadata::new("User", "users");
//! entity.properties.push(PropertyMetadata::new("id"));
//! entity.properties.push(PropertyMetadata::new("name"));
//!
//! let mut map = EntityMetadataMap::new();
//! map.insert(entity);
//!
//! let sql = translate("SELECT u FROM User u WHERE u.name = :name", &map);
//! assert_eq!(sql, "SELECT u.id AS id, u.name AS name FROM users u WHERE name = @name");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod meta;
pub mod prelude;
pub mod translate;

/// Re-export async_trait for generated code.
pub use async_trait::async_trait;

/// Base repository trait.
///
/// All generated `{Entity}Repository` traits include these associated types
/// and methods. This trait is not directly extended but serves as
/// documentation for the common interface.
///
/// # Associated Types
///
/// - `Error` — Error type for repository operations
/// - `Pool` — Underlying database pool type
///
/// # Example
///
/// Generated traits follow this pattern:
///
/// ```rust,ignore
/// #[async_trait]
/// pub trait UserRepository: Send + Sync {
///     async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error>;
///     async fn save(&self, entity: &User) -> Result<User, sqlx::Error>;
///     // ...
/// }
/// ```
pub trait Repository: Send + Sync {
    /// Error type for repository operations.
    ///
    /// Must implement `std::error::Error + Send + Sync` for async
    /// compatibility.
    type Error: std::error::Error + Send + Sync;

    /// Underlying database pool type.
    ///
    /// Enables access to the pool for transactions and custom queries.
    type Pool;

    /// Get reference to the underlying database pool.
    fn pool(&self) -> &Self::Pool;
}

/// A PostgreSQL pool is a repository in its own right; generated trait
/// implementations target it directly.
#[cfg(feature = "postgres")]
impl Repository for sqlx::PgPool {
    type Error = sqlx::Error;
    type Pool = sqlx::PgPool;

    fn pool(&self) -> &Self::Pool {
        self
    }
}

/// Pagination parameters for list operations.
///
/// # Example
///
/// ```rust
/// use cpql_core::Pagination;
///
/// let page = Pagination::new(10, 0); // First 10 items
/// let next = Pagination::new(10, 10); // Next 10 items
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of results to return.
    pub limit: i64,

    /// Number of results to skip.
    pub offset: i64
}

impl Pagination {
    /// Create new pagination parameters.
    pub const fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset
        }
    }

    /// Create pagination for a specific page.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cpql_core::Pagination;
    ///
    /// let page_0 = Pagination::page(0, 25); // offset=0, limit=25
    /// let page_2 = Pagination::page(2, 25); // offset=50, limit=25
    /// ```
    pub const fn page(page: i64, per_page: i64) -> Self {
        Self {
            limit:  per_page,
            offset: page * per_page
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit:  100,
            offset: 0
        }
    }
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }
}
