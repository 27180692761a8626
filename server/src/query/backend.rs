// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Backend-ready filter and sort structures.
//!
//! These types mirror the search backend's native query shapes for JSON
//! serialization; the backend consumes them verbatim.

use serde::{Deserialize, Serialize};

use super::raw::{FieldOperator, SortDirection, ValueOperator};

/// A compiled filter tree over physically-indexed field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldFilter {
    Single {
        field_op: FieldOperator,
        value_op: ValueOperator,
        field: String,
        value: Option<String>,
    },
    Multi {
        field_op: FieldOperator,
        filters: Vec<FieldFilter>,
    },
}

/// A compiled sort request over physically-indexed field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SortParam {
    NoSort,
    Fields { keys: Vec<(String, SortDirection)> },
}
