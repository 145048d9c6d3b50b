//! JSON key ordering and serialization helpers.
//!
//! Data-export outputs are user-owned JSON files, so key order matters:
//! a regenerated `package.json` should keep the user's ordering. These
//! helpers back the default `json_sort` hook. Requires serde_json's
//! `preserve_order` feature.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BrikrError, BrikrResult};

/// Dependency-category keys of a package manifest that are sorted
/// alphabetically by the default `json_sort` hook.
pub const MANIFEST_DEPENDENCY_KEYS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "bundledDependencies",
];

/// Reorder an object's keys to follow `reference` order, then append any
/// keys not in the reference in their original order.
pub fn reorder_keys<'a>(
    map: Map<String, Value>,
    reference: impl IntoIterator<Item = &'a str>,
) -> Map<String, Value> {
    let mut source = map;
    let mut ordered = Map::with_capacity(source.len());
    for key in reference {
        if let Some(value) = source.shift_remove(key) {
            ordered.insert(key.to_string(), value);
        }
    }
    for (key, value) in source {
        ordered.insert(key, value);
    }
    ordered
}

/// Sort an object's keys alphabetically.
pub fn sort_keys(map: Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<(String, Value)> = map.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries.into_iter().collect()
}

/// Alphabetically sort each dependency-category sub-object of a package
/// manifest, in place. Non-object categories are left alone.
pub fn sort_manifest_dependencies(map: &mut Map<String, Value>) {
    for key in MANIFEST_DEPENDENCY_KEYS {
        if let Some(Value::Object(deps)) = map.get(key) {
            let sorted = sort_keys(deps.clone());
            map.insert(key.to_string(), Value::Object(sorted));
        }
    }
}

/// Serialize a value as pretty-printed JSON with tab indentation, the
/// on-disk format for every generated JSON file.
pub fn to_pretty_tabs(value: &Value) -> BrikrResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| BrikrError::Internal {
            message: format!("json serialization failed: {e}"),
        })?;
    String::from_utf8(buf).map_err(|e| BrikrError::Internal {
        message: format!("json serializer produced invalid utf-8: {e}"),
    })
}
