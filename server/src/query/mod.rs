// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Query Compilation Module
//!
//! Compiles raw filter and sort trees, produced by the query parser over
//! unresolved field keys, into the structures the search index backend
//! executes:
//!
//! - a filter tree of leaf predicates (operator + field name + value
//!   operator + optional value) under boolean combinators, with one logical
//!   field distributed into an OR-group over its type-mangled variants;
//! - a sort structure that keeps every requested key, prefers mangled
//!   variants, and restricts candidates to currently-indexed names where
//!   possible.

pub mod backend;
pub mod filter;
pub mod raw;
pub mod sort;

pub use backend::{FieldFilter, SortParam};
pub use raw::{FieldOperator, RawFieldFilter, RawSortParam, SortDirection, ValueOperator};
