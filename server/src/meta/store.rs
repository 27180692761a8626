// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Namespace metadata store contract.

use async_trait::async_trait;

use crate::error::StoreError;

/// A namespace metadata document: the registered namespace URL, the document
/// path under `/meta/ns/`, and any explicitly recorded prefix values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDocument {
    pub url: String,
    pub path: String,
    /// Values of the document's explicit `prefix` field. Zero or several
    /// values is a known data-quality condition, not an error.
    pub prefixes: Vec<String>,
}

impl NamespaceDocument {
    /// Last segment of the document path, i.e. the namespace identifier the
    /// document is stored under.
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }
}

/// The metadata/namespace store consumed by the resolver.
#[async_trait]
pub trait NamespaceStore: Send + Sync {
    /// Look up a namespace document by its hash identifier. `Ok(None)` means
    /// the hash is not a known namespace.
    async fn lookup_document_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<NamespaceDocument>, StoreError>;

    /// Resolve a registered prefix to `(url, lastSegment)` under the
    /// URI-addressing scheme. `allow_fallback` permits the store to consult
    /// a secondary consistency level on a miss.
    async fn resolve_prefix_to_url(
        &self,
        prefix: &str,
        allow_fallback: bool,
    ) -> Result<(String, String), StoreError>;

    /// Canonical hash identifier for a namespace URL, if the namespace is
    /// known.
    async fn url_to_hash(&self, url: &str) -> Result<Option<String>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_is_the_identifier() {
        let doc = NamespaceDocument {
            url: "http://example.org/ontology#".to_string(),
            path: "/meta/ns/h91f2".to_string(),
            prefixes: vec![],
        };
        assert_eq!(doc.last_segment(), "h91f2");
    }
}
