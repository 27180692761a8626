// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Field keys: the closed set of external reference forms and their
//! canonical internal, display, and metadata-path renderings.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::{FieldError, Result};
use crate::fields::resolver;
use crate::meta::QueryEnv;

/// Key prefixes that address fixed platform fields directly, with no
/// namespace resolution.
pub const RESERVED_PREFIXES: [&str; 3] = ["system.", "content.", "link."];

/// True when `key` names a reserved platform field.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// The four ways a caller can reference a field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldRef {
    /// Full predicate URI.
    Uri(String),
    /// Local name qualified by a prefix token.
    Prefix { local: String, prefix: String },
    /// Unqualified external key, including reserved platform fields.
    Direct(String),
    /// Local name qualified by a namespace hash; already canonical.
    Hashed { local: String, hash: String },
}

/// A user-supplied field reference plus its per-instance resolution state.
///
/// Namespace resolution runs at most once per key: the first call that needs
/// the `(localName, namespaceHash)` pair populates the cell, and every later
/// call (on this key or any clone of it) reuses the same outcome, success
/// or failure.
#[derive(Debug, Clone)]
pub struct FieldKey {
    reference: FieldRef,
    resolved: Arc<OnceCell<Result<(String, String)>>>,
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for FieldKey {}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.external_key())
    }
}

impl FieldKey {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::from_ref(FieldRef::Uri(uri.into()))
    }

    pub fn prefix(local: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::from_ref(FieldRef::Prefix {
            local: local.into(),
            prefix: prefix.into(),
        })
    }

    pub fn direct(key: impl Into<String>) -> Self {
        Self::from_ref(FieldRef::Direct(key.into()))
    }

    pub fn hashed(local: impl Into<String>, hash: impl Into<String>) -> Self {
        Self::from_ref(FieldRef::Hashed {
            local: local.into(),
            hash: hash.into(),
        })
    }

    fn from_ref(reference: FieldRef) -> Self {
        Self {
            reference,
            resolved: Arc::new(OnceCell::new()),
        }
    }

    /// Classify an external field reference.
    ///
    /// A full URI contains `://`; a reserved or dotless key is direct; a
    /// qualifier after the first dot starting with `$` is a namespace hash;
    /// anything else is a prefix token.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.contains("://") {
            return Ok(Self::uri(raw));
        }
        if is_reserved(raw) {
            return Ok(Self::direct(raw));
        }
        match raw.split_once('.') {
            None => Ok(Self::direct(raw)),
            Some((local, qualifier)) => {
                if local.is_empty() || qualifier.is_empty() {
                    return Err(FieldError::UnresolvableIdentifier {
                        identifier: raw.to_string(),
                        cause: "empty local name or qualifier".to_string(),
                    });
                }
                match qualifier.strip_prefix('$') {
                    Some("") => Err(FieldError::UnresolvableIdentifier {
                        identifier: raw.to_string(),
                        cause: "empty namespace hash".to_string(),
                    }),
                    Some(hash) => Ok(Self::hashed(local, hash)),
                    None => Ok(Self::prefix(local, qualifier)),
                }
            }
        }
    }

    /// True when this key is a reserved platform field, indexed as-is.
    pub fn is_reserved_direct(&self) -> bool {
        matches!(&self.reference, FieldRef::Direct(key) if is_reserved(key))
    }

    /// Best-effort synchronous display form.
    ///
    /// URI keys render as `local.$hash` once resolution has completed
    /// successfully; before that (or after a failure) they fall back to an
    /// unresolved placeholder naming the namespace URL.
    pub fn external_key(&self) -> String {
        match &self.reference {
            FieldRef::Direct(key) => key.clone(),
            FieldRef::Prefix { local, prefix } => format!("{local}.{prefix}"),
            FieldRef::Hashed { local, hash } => format!("{local}.${hash}"),
            FieldRef::Uri(uri) => match self.resolved.get() {
                Some(Ok((local, hash))) => format!("{local}.${hash}"),
                _ => match resolver::split_uri(uri) {
                    Ok((ns_url, local)) => format!("{local}.$[{ns_url}]"),
                    Err(_) => uri.clone(),
                },
            },
        }
    }

    /// The `(localName, namespaceHash)` pair this key resolves to, memoized
    /// per instance.
    pub async fn first_last(&self, env: &QueryEnv) -> Result<(String, String)> {
        match &self.reference {
            FieldRef::Hashed { local, hash } => Ok((local.clone(), hash.clone())),
            FieldRef::Direct(key) => Err(FieldError::InvariantViolation(format!(
                "direct field key \"{key}\" carries no namespace to resolve"
            ))),
            FieldRef::Uri(uri) => self
                .resolved
                .get_or_init(|| resolver::resolve_uri(env, uri))
                .await
                .clone(),
            FieldRef::Prefix { local, prefix } => self
                .resolved
                .get_or_init(|| resolver::resolve_prefix(env, local, prefix))
                .await
                .clone(),
        }
    }

    /// Canonical `local.namespaceHash` form used by the index.
    ///
    /// Direct keys are already canonical and never touch the store.
    pub async fn internal_key(&self, env: &QueryEnv) -> Result<String> {
        match &self.reference {
            FieldRef::Direct(key) => Ok(key.clone()),
            _ => {
                let (local, hash) = self.first_last(env).await?;
                Ok(format!("{local}.{hash}"))
            }
        }
    }

    /// Path of the metadata document describing this field.
    pub async fn meta_path(&self, env: &QueryEnv) -> Result<String> {
        match &self.reference {
            FieldRef::Direct(key) => match key.split_once('.') {
                Some((_, suffix)) if is_reserved(key) => Ok(format!("/meta/sys/{suffix}")),
                _ => Ok(format!("/meta/nn/{key}")),
            },
            _ => {
                let (local, hash) = self.first_last(env).await?;
                Ok(format!("/meta/ns/{hash}/{local}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_reference_forms() {
        assert_eq!(FieldKey::parse("title").unwrap(), FieldKey::direct("title"));
        assert_eq!(
            FieldKey::parse("system.lastModified").unwrap(),
            FieldKey::direct("system.lastModified")
        );
        assert_eq!(
            FieldKey::parse("title.dc").unwrap(),
            FieldKey::prefix("title", "dc")
        );
        assert_eq!(
            FieldKey::parse("title.$h91f2").unwrap(),
            FieldKey::hashed("title", "h91f2")
        );
        assert_eq!(
            FieldKey::parse("http://purl.org/dc/terms/#title").unwrap(),
            FieldKey::uri("http://purl.org/dc/terms/#title")
        );
    }

    #[test]
    fn parse_rejects_degenerate_references() {
        assert!(FieldKey::parse("title.$").is_err());
        assert!(FieldKey::parse(".dc").is_err());
        assert!(FieldKey::parse("title.").is_err());
    }

    #[test]
    fn external_key_renders_each_form() {
        assert_eq!(FieldKey::direct("system.path").external_key(), "system.path");
        assert_eq!(FieldKey::prefix("title", "dc").external_key(), "title.dc");
        assert_eq!(
            FieldKey::hashed("title", "h91f2").external_key(),
            "title.$h91f2"
        );
        // Unresolved URI keys fall back to the placeholder form.
        assert_eq!(
            FieldKey::uri("http://example.org/onto#title").external_key(),
            "title.$[http://example.org/onto#]"
        );
    }

    #[tokio::test]
    async fn meta_path_for_direct_keys() {
        let env = crate::meta::QueryEnv {
            store: Arc::new(NoStore),
            field_types: Arc::new(NoTypes),
            index_mappings: Arc::new(NoMappings),
            retry: crate::meta::RetryPolicy::default(),
        };
        assert_eq!(
            FieldKey::direct("system.path").meta_path(&env).await.unwrap(),
            "/meta/sys/path"
        );
        assert_eq!(
            FieldKey::direct("content.mimeType")
                .meta_path(&env)
                .await
                .unwrap(),
            "/meta/sys/mimeType"
        );
        assert_eq!(
            FieldKey::direct("title").meta_path(&env).await.unwrap(),
            "/meta/nn/title"
        );
        assert_eq!(
            FieldKey::hashed("title", "h91f2")
                .meta_path(&env)
                .await
                .unwrap(),
            "/meta/ns/h91f2/title"
        );
    }

    struct NoStore;
    struct NoTypes;
    struct NoMappings;

    #[async_trait::async_trait]
    impl crate::meta::NamespaceStore for NoStore {
        async fn lookup_document_by_hash(
            &self,
            _hash: &str,
        ) -> std::result::Result<Option<crate::meta::NamespaceDocument>, crate::error::StoreError>
        {
            Ok(None)
        }

        async fn resolve_prefix_to_url(
            &self,
            prefix: &str,
            _allow_fallback: bool,
        ) -> std::result::Result<(String, String), crate::error::StoreError> {
            Err(crate::error::StoreError::NotFound(prefix.to_string()))
        }

        async fn url_to_hash(
            &self,
            _url: &str,
        ) -> std::result::Result<Option<String>, crate::error::StoreError> {
            Ok(None)
        }
    }

    #[async_trait::async_trait]
    impl crate::meta::FieldTypeCache for NoTypes {
        async fn get(
            &self,
            _internal_key: &str,
        ) -> std::result::Result<std::collections::BTreeSet<char>, crate::error::StoreError>
        {
            Ok(std::collections::BTreeSet::new())
        }
    }

    #[async_trait::async_trait]
    impl crate::meta::IndexMappingsCache for NoMappings {
        async fn get_or_refresh(
            &self,
        ) -> std::result::Result<std::collections::BTreeSet<String>, crate::error::StoreError>
        {
            Ok(std::collections::BTreeSet::new())
        }
    }
}
