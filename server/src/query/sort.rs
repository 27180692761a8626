// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Sort compilation: raw sort keys into the backend sort structure.

use std::collections::BTreeSet;

use futures::future::try_join_all;
use tracing::warn;

use crate::error::Result;
use crate::fields::{self, evaluator, key};
use crate::meta::{retry, QueryEnv};
use crate::query::backend::SortParam;
use crate::query::raw::{RawSortParam, SortDirection};

/// Compile a raw sort request into its backend form.
///
/// Every key keeps its position in the output. Within one key's expansion,
/// candidates are restricted to names that are mangled, reserved, or
/// currently indexed, unless that would leave nothing, in which case the
/// unfiltered expansion is kept (a sort key is never dropped). Mangled
/// variants sort ahead of unmangled ones inside each key's block.
pub async fn compile(raw: &RawSortParam, env: &QueryEnv) -> Result<SortParam> {
    let keys = match raw {
        RawSortParam::NullSort => return Ok(SortParam::NoSort),
        RawSortParam::Fields(keys) => keys,
    };

    let mappings = retry(env.retry, || env.index_mappings.get_or_refresh()).await?;
    let indexed: BTreeSet<&str> = mappings
        .iter()
        .map(|name| evaluator::strip_type_marker(name))
        .collect();

    let groups = try_join_all(keys.iter().map(|(key, direction)| async move {
        fields::expand(key, env)
            .await
            .map(|candidates| (candidates, *direction))
    }))
    .await?;

    let mut compiled: Vec<(String, SortDirection)> = Vec::new();
    for (candidates, direction) in groups {
        let filtered: Vec<String> = candidates
            .iter()
            .filter(|name| {
                evaluator::is_mangled(name)
                    || key::is_reserved(name)
                    || indexed.contains(name.as_str())
            })
            .cloned()
            .collect();
        let group: Vec<String> = if filtered.is_empty() {
            warn!(
                candidates = ?candidates,
                "no sort candidate is currently indexed, keeping the unfiltered set"
            );
            candidates.into_iter().collect()
        } else {
            filtered
        };
        let (mangled, unmangled): (Vec<String>, Vec<String>) =
            group.into_iter().partition(|name| evaluator::is_mangled(name));
        compiled.extend(
            mangled
                .into_iter()
                .chain(unmangled)
                .map(|name| (name, direction)),
        );
    }
    Ok(SortParam::Fields { keys: compiled })
}
