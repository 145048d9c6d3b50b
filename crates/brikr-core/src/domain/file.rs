//! Per-file compile records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How a matched input file is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    /// Rendered through the template engine against the data context.
    Template,
    /// A content provider whose value is serialized to the output file.
    ScriptExport,
    /// A script export specialized to JSON, merged with any existing
    /// output file.
    DataExport,
}

impl ExportKind {
    pub fn is_data_export(self) -> bool {
        matches!(self, ExportKind::DataExport)
    }
}

/// One matched input path and the outcome of compiling it.
///
/// A record is immutable once `success` is set; no file is compiled
/// twice within one pipeline run. Content is never retained here.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// The files entry this path was matched from.
    pub source: String,
    /// Absolute input path.
    #[serde(rename = "in")]
    pub in_path: PathBuf,
    /// Absolute output path: `output + relative(in, root)`, then the
    /// extension remap, then whatever the rename hook returns.
    #[serde(rename = "out")]
    pub out_path: PathBuf,
    /// Compilation mode.
    pub kind: ExportKind,
    /// Whether this file was authorized to overwrite its output.
    pub overwrite: bool,
    /// Whether the output path existed before compiling.
    pub out_path_exists: bool,
    /// Intentionally left unwritten because the output already existed.
    pub skip: bool,
    /// Terminal state reached without error.
    pub success: bool,
}

impl FileRecord {
    /// A fresh record for an input path, before classification.
    pub fn new(source: impl Into<String>, in_path: PathBuf, out_path: PathBuf) -> Self {
        Self {
            source: source.into(),
            in_path,
            out_path,
            kind: ExportKind::Template,
            overwrite: false,
            out_path_exists: false,
            skip: false,
            success: false,
        }
    }

    /// Input path relative to the working directory.
    pub fn relative_in(&self, cwd: &Path) -> PathBuf {
        relative_to(&self.in_path, cwd)
    }

    /// Output path relative to the output directory; this is the key
    /// the `jsons` base mapping is looked up by.
    pub fn relative_out(&self, output: &Path) -> PathBuf {
        relative_to(&self.out_path, output)
    }
}

/// Lexically normalize a path: resolve `.` and `..` components without
/// touching the filesystem. Used to key visited-sets and staging paths
/// where two spellings of the same file must compare equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Lexical relative path from `base` to `path`, walking up with `..`
/// where needed. Falls back to `path` when the two share no root.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let mut base_components: Vec<_> = base.components().collect();
    let mut path_components: Vec<_> = path.components().collect();

    let shared = base_components
        .iter()
        .zip(path_components.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if shared == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in base_components.split_off(shared) {
        relative.push("..");
    }
    for component in path_components.split_off(shared) {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
