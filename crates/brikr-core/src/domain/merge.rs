//! Deep-merge engine over `serde_json::Value`.
//!
//! This is the single merge implementation used by every other
//! component: config layering, option cascades, and data-export
//! merging all fold through [`merge`] / [`merge_all`].
//!
//! # Rules
//!
//! - A non-mergeable source (scalar, null) replaces the target entirely.
//! - Two objects merge recursively key-by-key; existing keys keep their
//!   position, new keys are appended (key order is observable — see
//!   [`crate::domain::json`]).
//! - Two arrays combine per [`ArrayStrategy`].
//! - Mergeable values of different kinds (object vs array) do not
//!   partially merge: the source replaces the target.

use serde_json::Value;

/// How two arrays combine during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayStrategy {
    /// Concatenate, then deduplicate by value equality, preserving
    /// first-seen order.
    #[default]
    Unique,
    /// Simple concatenation, duplicates retained.
    Concat,
    /// The source array fully replaces the target.
    Overwrite,
}

/// Options threaded through a recursive merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    pub array_strategy: ArrayStrategy,
}

/// Merge `source` into `target`, source winning on conflict.
pub fn merge(target: Value, source: Value, options: &MergeOptions) -> Value {
    match (target, source) {
        (Value::Object(mut target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(slot) => {
                        let existing = slot.take();
                        *slot = merge(existing, value, options);
                    }
                    None => {
                        target.insert(key, value);
                    }
                }
            }
            Value::Object(target)
        }
        (Value::Array(target), Value::Array(source)) => {
            Value::Array(merge_arrays(target, source, options))
        }
        // Scalars, nulls, and kind mismatches: the source replaces.
        (_, source) => source,
    }
}

/// Fold a sequence of values left-to-right: `merge(merge(a, b), c)`.
///
/// An empty input yields `Value::Null`; a single value is returned
/// unchanged.
pub fn merge_all(values: impl IntoIterator<Item = Value>, options: &MergeOptions) -> Value {
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return Value::Null;
    };
    iter.fold(first, |acc, value| merge(acc, value, options))
}

/// Shallow merge of two objects: top-level keys from `source` replace
/// keys in `target` without recursing. Non-objects fall back to the
/// source value. Used by the default data-export merge hook when
/// overwrite is authorized.
pub fn shallow_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(slot) => *slot = value,
                    None => {
                        target.insert(key, value);
                    }
                }
            }
            Value::Object(target)
        }
        (_, source) => source,
    }
}

fn merge_arrays(target: Vec<Value>, source: Vec<Value>, options: &MergeOptions) -> Vec<Value> {
    match options.array_strategy {
        ArrayStrategy::Overwrite => source,
        ArrayStrategy::Concat => {
            let mut merged = target;
            merged.extend(source);
            merged
        }
        ArrayStrategy::Unique => {
            let mut merged: Vec<Value> = Vec::with_capacity(target.len() + source.len());
            for item in target.into_iter().chain(source) {
                if !merged.contains(&item) {
                    merged.push(item);
                }
            }
            merged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> MergeOptions {
        MergeOptions::default()
    }

    #[test]
    fn source_scalar_replaces_target() {
        assert_eq!(merge(json!({"a": 1}), json!(2), &defaults()), json!(2));
        assert_eq!(merge(json!(1), json!("x"), &defaults()), json!("x"));
    }

    #[test]
    fn objects_merge_with_source_precedence() {
        let merged = merge(json!({"a": 1, "b": 2}), json!({"b": 3, "c": 5}), &defaults());
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 5}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let merged = merge(
            json!({"outer": {"a": 1, "b": 2}, "keep": true}),
            json!({"outer": {"b": 3}}),
            &defaults(),
        );
        assert_eq!(merged, json!({"outer": {"a": 1, "b": 3}, "keep": true}));
    }

    #[test]
    fn kind_mismatch_replaces_without_partial_merge() {
        let merged = merge(json!({"a": 1}), json!([1, 2]), &defaults());
        assert_eq!(merged, json!([1, 2]));

        let merged = merge(json!([1, 2]), json!({"a": 1}), &defaults());
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn arrays_unique_strategy() {
        let merged = merge(json!([1, 2, 3]), json!([2, 3, 4]), &defaults());
        assert_eq!(merged, json!([1, 2, 3, 4]));
    }

    #[test]
    fn arrays_concat_strategy() {
        let options = MergeOptions {
            array_strategy: ArrayStrategy::Concat,
        };
        let merged = merge(json!([1, 2, 3]), json!([2, 3, 4]), &options);
        assert_eq!(merged, json!([1, 2, 3, 2, 3, 4]));
    }

    #[test]
    fn arrays_overwrite_strategy() {
        let options = MergeOptions {
            array_strategy: ArrayStrategy::Overwrite,
        };
        let merged = merge(json!([1, 2, 3]), json!([2, 3, 4]), &options);
        assert_eq!(merged, json!([2, 3, 4]));
    }

    #[test]
    fn merge_all_folds_left_to_right() {
        let merged = merge_all(
            [json!({"a": 1, "b": 1}), json!({"b": 2, "c": 2}), json!({"c": 3})],
            &defaults(),
        );
        assert_eq!(merged, json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn merge_all_empty_and_single() {
        assert_eq!(merge_all([], &defaults()), Value::Null);
        assert_eq!(merge_all([json!(42)], &defaults()), json!(42));
    }

    #[test]
    fn object_merge_preserves_key_order() {
        let merged = merge(
            json!({"one": 1, "two": 2}),
            json!({"two": 22, "zero": 0}),
            &defaults(),
        );
        let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["one", "two", "zero"]);
    }

    #[test]
    fn shallow_merge_replaces_top_level_only() {
        let merged = shallow_merge(
            json!({"deep": {"a": 1, "b": 2}, "keep": 1}),
            json!({"deep": {"b": 3}}),
        );
        // No recursion: the nested object is replaced wholesale.
        assert_eq!(merged, json!({"deep": {"b": 3}, "keep": 1}));
    }
}
