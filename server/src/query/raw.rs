// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Raw filter and sort trees as produced by the query parser, prior to
//! field-reference resolution.

use serde::{Deserialize, Serialize};

use crate::fields::FieldKey;

/// How a predicate or group combines with its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOperator {
    Must,
    Should,
}

/// Comparison applied to a leaf predicate's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOperator {
    Equals,
    Contains,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
    Like,
}

/// Direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A raw filter tree over unresolved field keys.
#[derive(Debug, Clone)]
pub enum RawFieldFilter {
    /// A leaf predicate.
    Single {
        field_op: FieldOperator,
        value_op: ValueOperator,
        key: FieldKey,
        value: Option<String>,
    },
    /// A boolean group; child order is significant.
    Multi {
        field_op: FieldOperator,
        filters: Vec<RawFieldFilter>,
    },
}

/// A raw sort request over unresolved field keys; list order is significant
/// and survives compilation.
#[derive(Debug, Clone)]
pub enum RawSortParam {
    NullSort,
    Fields(Vec<(FieldKey, SortDirection)>),
}
