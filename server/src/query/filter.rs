// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Filter compilation: raw filter trees into backend filter trees.

use futures::future::{try_join_all, BoxFuture, FutureExt};

use crate::error::{FieldError, Result};
use crate::fields::{self, evaluator};
use crate::meta::QueryEnv;
use crate::query::backend::FieldFilter;
use crate::query::raw::{FieldOperator, RawFieldFilter, ValueOperator};

/// Compile a raw filter tree into its backend form.
///
/// Children of a group compile concurrently; output order follows input
/// order structurally, independent of completion order. A leaf whose key
/// expands to several type-mangled names becomes a `Should` group, one leaf
/// per name.
pub fn compile<'a>(
    raw: &'a RawFieldFilter,
    env: &'a QueryEnv,
) -> BoxFuture<'a, Result<FieldFilter>> {
    async move {
        match raw {
            RawFieldFilter::Multi { field_op, filters } => {
                let children = try_join_all(filters.iter().map(|f| compile(f, env))).await?;
                Ok(FieldFilter::Multi {
                    field_op: *field_op,
                    filters: children,
                })
            }
            RawFieldFilter::Single {
                field_op,
                value_op,
                key,
                value,
            } => {
                let names: Vec<String> = fields::expand(key, env).await?.into_iter().collect();
                match names.as_slice() {
                    [] => Err(FieldError::InvariantViolation(format!(
                        "field key \"{}\" expanded to no indexed names",
                        key.external_key()
                    ))),
                    [name] => Ok(FieldFilter::Single {
                        field_op: *field_op,
                        value_op: normalize_value_op(*value_op, name),
                        field: name.clone(),
                        value: value.clone(),
                    }),
                    many => Ok(FieldFilter::Multi {
                        field_op: *field_op,
                        filters: many
                            .iter()
                            .map(|name| FieldFilter::Single {
                                field_op: FieldOperator::Should,
                                value_op: *value_op,
                                field: name.clone(),
                                value: value.clone(),
                            })
                            .collect(),
                    }),
                }
            }
        }
    }
    .boxed()
}

/// Mangled and reserved platform fields are not exact-match comparable the
/// way plain fields are; an `Equals` against one is downgraded to
/// `Contains`.
fn normalize_value_op(value_op: ValueOperator, field: &str) -> ValueOperator {
    let exact_unsafe = evaluator::is_mangled(field)
        || field.starts_with("system.")
        || field.starts_with("content.");
    if value_op == ValueOperator::Equals && exact_unsafe {
        ValueOperator::Contains
    } else {
        value_op
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_downgrades_on_mangled_and_reserved_names() {
        assert_eq!(
            normalize_value_op(ValueOperator::Equals, "i$title.h91f2"),
            ValueOperator::Contains
        );
        assert_eq!(
            normalize_value_op(ValueOperator::Equals, "system.path"),
            ValueOperator::Contains
        );
        assert_eq!(
            normalize_value_op(ValueOperator::Equals, "content.mimeType"),
            ValueOperator::Contains
        );
        assert_eq!(
            normalize_value_op(ValueOperator::Equals, "title.h91f2"),
            ValueOperator::Equals
        );
    }

    #[test]
    fn non_equals_operators_pass_through() {
        assert_eq!(
            normalize_value_op(ValueOperator::GreaterThan, "i$title.h91f2"),
            ValueOperator::GreaterThan
        );
        assert_eq!(
            normalize_value_op(ValueOperator::Contains, "system.path"),
            ValueOperator::Contains
        );
    }
}
