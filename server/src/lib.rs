// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Library crate for the ldsearch query-compilation layer.
//!
//! Turns user-supplied field references (short names, URI-qualified names,
//! prefix-qualified names, hash-qualified names) into the internal field
//! identifiers and filter/sort structures consumed by the search index
//! backend.

pub mod config;
pub mod error;
pub mod fields;
pub mod meta;
pub mod query;
