// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! External collaborator contracts: the namespace metadata store, the
//! field-type and index-mappings caches, and the bounded-retry utility.
//!
//! The core never owns these collaborators' refresh or eviction policy; it
//! only reads through the contracts defined here.

pub mod caches;
pub mod retry;
pub mod store;

pub use caches::{FieldTypeCache, IndexMappingsCache};
pub use retry::{retry, RetryPolicy};
pub use store::{NamespaceDocument, NamespaceStore};

use std::sync::Arc;

use crate::config::Config;

/// Everything field resolution and query compilation need from the outside
/// world, passed explicitly through every operation.
#[derive(Clone)]
pub struct QueryEnv {
    pub store: Arc<dyn NamespaceStore>,
    pub field_types: Arc<dyn FieldTypeCache>,
    pub index_mappings: Arc<dyn IndexMappingsCache>,
    pub retry: RetryPolicy,
}

impl QueryEnv {
    pub fn new(
        store: Arc<dyn NamespaceStore>,
        field_types: Arc<dyn FieldTypeCache>,
        index_mappings: Arc<dyn IndexMappingsCache>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            field_types,
            index_mappings,
            retry: RetryPolicy::from(config),
        }
    }
}
