// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Expansion of a logical field key into the set of physically-indexed
//! field names.
//!
//! A field indexed under several storage types exists once per type, under a
//! mangled name carrying a one-character type marker: `c$local.hash`. The
//! default string type is the unmarked form.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::fields::key::FieldKey;
use crate::meta::{retry, QueryEnv};

/// Marker for the default string type; its storage uses the unmarked name.
const STRING_TYPE_MARKER: char = 's';

/// True when `name` carries a type-mangling marker (`c$rest`).
pub fn is_mangled(name: &str) -> bool {
    name.as_bytes().get(1) == Some(&b'$')
}

/// `name` without its type marker, if it has one.
pub fn strip_type_marker(name: &str) -> &str {
    if is_mangled(name) {
        &name[2..]
    } else {
        name
    }
}

/// Expand `key` into every concrete field name it may be indexed under.
///
/// Reserved platform fields are indexed as-is. Any other key yields its bare
/// internal form plus one mangled variant per registered non-string type
/// marker.
pub async fn expand(key: &FieldKey, env: &QueryEnv) -> Result<BTreeSet<String>> {
    if key.is_reserved_direct() {
        return Ok(BTreeSet::from([key.external_key()]));
    }
    let internal = key.internal_key(env).await?;
    let markers = retry(env.retry, || env.field_types.get(&internal)).await?;
    let mut names = BTreeSet::new();
    for marker in markers {
        if marker != STRING_TYPE_MARKER {
            names.insert(format!("{marker}${internal}"));
        }
    }
    names.insert(internal);
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangling_marker_is_the_second_character() {
        assert!(is_mangled("i$title.h91f2"));
        assert!(is_mangled("d$active.h7"));
        assert!(!is_mangled("title.h91f2"));
        assert!(!is_mangled("system.path"));
        assert!(!is_mangled("i"));
        assert!(!is_mangled(""));
    }

    #[test]
    fn strip_type_marker_only_touches_mangled_names() {
        assert_eq!(strip_type_marker("i$title.h91f2"), "title.h91f2");
        assert_eq!(strip_type_marker("title.h91f2"), "title.h91f2");
    }
}
