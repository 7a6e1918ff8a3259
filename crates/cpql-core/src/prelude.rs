// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cpql_core::prelude::*;
//! ```

pub use crate::{
    Pagination, Repository, SortDirection, async_trait,
    meta::{
        EntityMetadata, EntityMetadataMap, PropertyMetadata, RelationshipKind,
        RelationshipMetadata
    },
    translate::{translate, translate_formatted}
};
