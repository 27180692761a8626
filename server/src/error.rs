// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Failure reported by an external metadata collaborator (the namespace
/// store or one of the caches).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed identifier: {0}")]
    Malformed(String),
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

/// Failure produced by field resolution or query compilation.
///
/// `Clone` because a field key memoizes its resolution outcome and hands the
/// same result to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A namespace, prefix, or URI could not be mapped to a canonical
    /// namespace identifier.
    #[error("unresolvable field identifier \"{identifier}\": {cause}")]
    UnresolvableIdentifier { identifier: String, cause: String },

    /// A prefix token is consistent with more than one namespace
    /// interpretation. Never auto-resolved; the message always carries both
    /// explicit disambiguating forms.
    #[error("ambiguous field identifier: {detail}; use \"{hash_form}\" or \"{prefix_form}\" to disambiguate")]
    PrefixAmbiguity {
        detail: String,
        hash_form: String,
        prefix_form: String,
    },

    /// An internal assumption was violated; a defect, not a recoverable
    /// condition.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A metadata lookup failed after exhausting its retry budget.
    #[error("metadata lookup failed: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, FieldError>;
