// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Namespace and prefix resolution.
//!
//! A prefix token may address a namespace under two historical schemes: the
//! legacy scheme keys namespaces by their hash identifier, the newer scheme
//! by an explicitly registered prefix. Both are consulted in parallel;
//! genuine disagreement between them is reported as an ambiguity the caller
//! must resolve with an explicit hash-qualified reference, never guessed
//! away.

use tracing::warn;

use crate::error::{FieldError, Result, StoreError};
use crate::meta::{retry, NamespaceDocument, QueryEnv};

/// Resolve `local` qualified by `token` to the canonical
/// `(localName, namespaceHash)` pair.
///
/// `token` is tried as a legacy namespace hash and as a registered prefix at
/// the same time. When only one scheme knows it, that scheme wins; when both
/// do, the recorded URL, document path, and explicit prefix are reconciled
/// per [`reconcile`]. Store calls are retried under the env's policy.
pub async fn resolve_prefix(env: &QueryEnv, local: &str, token: &str) -> Result<(String, String)> {
    let legacy = retry(env.retry, || env.store.lookup_document_by_hash(token));
    let by_prefix = retry(env.retry, || env.store.resolve_prefix_to_url(token, true));
    let (legacy, by_prefix) = tokio::join!(legacy, by_prefix);

    match legacy {
        Ok(None) => match by_prefix {
            Ok((_url, last)) => Ok((local.to_string(), last)),
            Err(cause) => Err(unresolvable(token, cause)),
        },
        Ok(Some(doc)) => match by_prefix {
            Ok((url, last)) => reconcile(local, token, &doc, &url, &last),
            Err(cause) => {
                // The hash-keyed document alone is still a usable answer.
                warn!(
                    token,
                    error = %cause,
                    "prefix lookup failed under the URI scheme, using the hash-keyed document"
                );
                Ok((local.to_string(), doc.last_segment().to_string()))
            }
        },
        Err(StoreError::Malformed(cause)) => Err(FieldError::UnresolvableIdentifier {
            identifier: token.to_string(),
            cause,
        }),
        Err(cause) => Err(FieldError::Store(cause)),
    }
}

/// Resolve a full predicate URI to `(localName, namespaceHash)`.
pub async fn resolve_uri(env: &QueryEnv, uri: &str) -> Result<(String, String)> {
    let (ns_url, local) = split_uri(uri)?;
    match retry(env.retry, || env.store.url_to_hash(&ns_url)).await {
        Ok(Some(hash)) => Ok((local, hash)),
        Ok(None) => Err(FieldError::UnresolvableIdentifier {
            identifier: uri.to_string(),
            cause: format!("namespace \"{ns_url}\" is not registered"),
        }),
        Err(StoreError::Malformed(cause)) => Err(FieldError::UnresolvableIdentifier {
            identifier: uri.to_string(),
            cause,
        }),
        Err(cause) => Err(FieldError::Store(cause)),
    }
}

/// Split a predicate URI into `(namespaceUrl, localName)`.
///
/// The fragment separator wins when present; otherwise the local name is the
/// segment after the last slash. The separator stays on the namespace side,
/// matching how namespace URLs are registered.
pub fn split_uri(uri: &str) -> Result<(String, String)> {
    let parsed = url::Url::parse(uri).map_err(|e| FieldError::UnresolvableIdentifier {
        identifier: uri.to_string(),
        cause: e.to_string(),
    })?;
    if let Some(fragment) = parsed.fragment() {
        if fragment.is_empty() {
            return Err(FieldError::UnresolvableIdentifier {
                identifier: uri.to_string(),
                cause: "empty fragment".to_string(),
            });
        }
        let ns_url = &uri[..uri.len() - fragment.len()];
        return Ok((ns_url.to_string(), fragment.to_string()));
    }
    if parsed.path().len() > 1 {
        if let Some((ns_url, local)) = uri.rsplit_once('/') {
            if !local.is_empty() {
                return Ok((format!("{ns_url}/"), local.to_string()));
            }
        }
    }
    Err(FieldError::UnresolvableIdentifier {
        identifier: uri.to_string(),
        cause: "no local name component".to_string(),
    })
}

/// Both schemes know `token`; decide between agreement, benign overlap, and
/// the three genuine ambiguity causes.
fn reconcile(
    local: &str,
    token: &str,
    doc: &NamespaceDocument,
    url: &str,
    last: &str,
) -> Result<(String, String)> {
    let hash_form = format!("{local}.${last}");
    let prefix_form = format!("{local}.${token}");

    if doc.url != url {
        return Err(FieldError::PrefixAmbiguity {
            detail: format!(
                "\"{token}\" names two different namespaces: \"{}\" under the hash scheme and \"{url}\" under the prefix scheme",
                doc.url
            ),
            hash_form,
            prefix_form,
        });
    }
    if doc.last_segment() != last {
        return Err(FieldError::PrefixAmbiguity {
            detail: format!(
                "\"{token}\" is backed by both addressing schemes inconsistently: hash-keyed document at \"{}\", prefix registered under \"{last}\"",
                doc.path
            ),
            hash_form,
            prefix_form,
        });
    }
    match explicit_prefix(doc) {
        Some(prefix) if prefix != token => Err(FieldError::PrefixAmbiguity {
            detail: format!(
                "\"{token}\" is the hash of a namespace whose registered prefix is \"{prefix}\""
            ),
            hash_form,
            prefix_form,
        }),
        Some(_) => Ok((local.to_string(), token.to_string())),
        None => {
            warn!(
                token,
                path = %doc.path,
                prefix_values = doc.prefixes.len(),
                "namespace document lacks a single explicit prefix, resolving the overlap as benign"
            );
            Ok((local.to_string(), token.to_string()))
        }
    }
}

/// The document's explicit prefix, when it records exactly one. Zero or
/// several values is a known data-quality condition treated as benign.
fn explicit_prefix(doc: &NamespaceDocument) -> Option<&str> {
    match doc.prefixes.as_slice() {
        [single] => Some(single.as_str()),
        _ => None,
    }
}

fn unresolvable(identifier: &str, cause: StoreError) -> FieldError {
    FieldError::UnresolvableIdentifier {
        identifier: identifier.to_string(),
        cause: cause.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_uri_prefers_the_fragment() {
        let (ns, local) = split_uri("http://purl.org/dc/terms/#title").unwrap();
        assert_eq!(ns, "http://purl.org/dc/terms/#");
        assert_eq!(local, "title");
    }

    #[test]
    fn split_uri_falls_back_to_the_last_slash() {
        let (ns, local) = split_uri("http://purl.org/dc/terms/title").unwrap();
        assert_eq!(ns, "http://purl.org/dc/terms/");
        assert_eq!(local, "title");
    }

    #[test]
    fn split_uri_rejects_uris_without_a_local_name() {
        assert!(split_uri("http://purl.org").is_err());
        assert!(split_uri("http://purl.org/").is_err());
        assert!(split_uri("not a uri").is_err());
    }

    #[test]
    fn explicit_prefix_requires_exactly_one_value() {
        let mut doc = NamespaceDocument {
            url: "http://example.org/onto#".to_string(),
            path: "/meta/ns/h91f2".to_string(),
            prefixes: vec![],
        };
        assert_eq!(explicit_prefix(&doc), None);
        doc.prefixes = vec!["dc".to_string()];
        assert_eq!(explicit_prefix(&doc), Some("dc"));
        doc.prefixes = vec!["dc".to_string(), "dcterms".to_string()];
        assert_eq!(explicit_prefix(&doc), None);
    }
}
