// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Read contracts for the two metadata caches.
//!
//! Refresh and eviction are the implementor's concern; the core only calls
//! `get`/`get_or_refresh`.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::StoreError;

/// Type-marker characters registered for an internal field key.
#[async_trait]
pub trait FieldTypeCache: Send + Sync {
    async fn get(&self, internal_key: &str) -> Result<BTreeSet<char>, StoreError>;
}

/// The set of currently-indexed, type-mangled field names.
#[async_trait]
pub trait IndexMappingsCache: Send + Sync {
    async fn get_or_refresh(&self) -> Result<BTreeSet<String>, StoreError>;
}
