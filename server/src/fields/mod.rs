// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Field-Reference Resolution Module
//!
//! A field in a query can be referenced in several external forms:
//!
//! | Form | Example | Resolution |
//! |------|---------|------------|
//! | short name | `title` | none, indexed as-is |
//! | reserved name | `system.lastModified` | none, fixed platform field |
//! | prefix-qualified | `title.dc` | prefix token disambiguated against the namespace store |
//! | hash-qualified | `title.$h91f2` | none, the hash is already canonical |
//! | URI-qualified | `http://purl.org/dc/terms/#title` | namespace URL mapped to its hash |
//!
//! Resolution produces the canonical internal form `localName.namespaceHash`.
//! A prefix token may be valid under two historical addressing schemes (the
//! legacy scheme keys namespaces by hash, the newer one by registered
//! prefix); when the schemes genuinely disagree the resolver reports an
//! ambiguity instead of guessing, and the error names the explicit
//! hash-qualified forms that disambiguate.

pub mod evaluator;
pub mod key;
pub mod resolver;

pub use evaluator::expand;
pub use key::FieldKey;
pub use resolver::{resolve_prefix, resolve_uri};
