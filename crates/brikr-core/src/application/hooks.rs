//! Lifecycle hooks: the caller-overridable seams of the compiler.
//!
//! Hooks are a strategy trait with default implementations rather than
//! ad hoc callables. Callers override behavior by implementing the
//! trait (usually deferring to the defaults for everything they don't
//! care about) and handing the implementation to `BootService`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::file::FileRecord;
use crate::domain::json::{reorder_keys, sort_manifest_dependencies};
use crate::domain::merge::{MergeOptions, merge, shallow_merge};
use crate::domain::options::BootOptions;

/// Read-only context handed to every hook.
pub struct HookContext<'a> {
    pub options: &'a BootOptions,
    pub data: &'a Value,
}

/// The fixed set of lifecycle hooks.
#[allow(unused_variables)]
pub trait Hooks: Send + Sync {
    /// Compute a brik's root from its first file entry. Returning
    /// `None` falls back to the nearest-existing-ancestor walk.
    fn brik_root(&self, first_entry: &Path, ctx: &HookContext<'_>) -> Option<PathBuf> {
        None
    }

    /// Per-file overwrite decision; ORed with the global `overwrite`
    /// option (the global option short-circuits to true when set).
    fn overwrite_file(&self, file: &FileRecord, ctx: &HookContext<'_>) -> bool {
        false
    }

    /// Redirect the output path. Runs after the extension remap; the
    /// return value becomes the final `out`.
    fn rename(&self, file: &FileRecord, ctx: &HookContext<'_>) -> PathBuf {
        file.out_path.clone()
    }

    /// Final say on whether to compile (`true`) or skip (`false`),
    /// regardless of export kind.
    fn compile_or_skip(&self, file: &FileRecord, ctx: &HookContext<'_>) -> bool {
        true
    }

    /// Combine an existing data-export output with freshly loaded
    /// content. Default: shallow replace when overwriting, deep merge
    /// with fresh values winning otherwise.
    fn json_merge(&self, file: &FileRecord, existing: &Value, fresh: Value) -> Value {
        if file.overwrite {
            shallow_merge(existing.clone(), fresh)
        } else {
            merge(existing.clone(), fresh, &MergeOptions::default())
        }
    }

    /// Reorder the merged mapping's keys. Default: the existing file's
    /// key order followed by any new keys; package manifests get their
    /// dependency categories sorted alphabetically.
    fn json_sort(&self, file: &FileRecord, existing: &Value, content: Value) -> Value {
        let Value::Object(content_map) = content else {
            return content;
        };

        let existing_keys: Vec<&str> = existing
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        let content_keys: Vec<String> = content_map.keys().cloned().collect();
        let reference = existing_keys
            .into_iter()
            .chain(content_keys.iter().map(String::as_str));

        let mut sorted = reorder_keys(content_map, reference);
        if file.out_path.file_name().is_some_and(|n| n == "package.json") {
            sort_manifest_dependencies(&mut sorted);
        }
        Value::Object(sorted)
    }
}

/// The built-in hook set: every method at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl Hooks for DefaultHooks {}
