//! The brik model: one independently-resolved unit of template files.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::file::FileRecord;
use crate::domain::options::BootOptions;

/// One entry of the `files` option: a single path/glob/repository
/// reference, or a list of paths and globs forming one brik.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileGroup {
    Single(String),
    Many(Vec<String>),
}

impl FileGroup {
    /// The entries of this group, in order.
    pub fn entries(&self) -> Vec<String> {
        match self {
            FileGroup::Single(entry) => vec![entry.clone()],
            FileGroup::Many(entries) => entries.clone(),
        }
    }

    /// The first entry, used for default root computation.
    pub fn first(&self) -> Option<&str> {
        match self {
            FileGroup::Single(entry) => Some(entry),
            FileGroup::Many(entries) => entries.first().map(String::as_str),
        }
    }

    /// A display label for logs and the brik's `source` field.
    pub fn label(&self) -> String {
        match self {
            FileGroup::Single(entry) => entry.clone(),
            FileGroup::Many(entries) => entries.join(", "),
        }
    }
}

impl fmt::Display for FileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A remote brik repository reference, recognized by prefix convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    /// Clone URL handed to the repo fetcher.
    pub url: String,
    /// `owner/repo`-style path used for the local staging directory.
    pub slug: String,
}

impl RemoteRef {
    /// Parse a files entry as a remote reference.
    ///
    /// Recognized forms:
    /// - `gh:owner/repo`  → `https://github.com/owner/repo.git`
    /// - `gh@owner/repo`  → `git@github.com:owner/repo.git`
    /// - `git@...` / `https://...` → used verbatim
    ///
    /// Anything else is a local path or glob and yields `None`.
    pub fn parse(entry: &str) -> Option<RemoteRef> {
        if let Some(short) = entry.strip_prefix("gh:") {
            return Some(RemoteRef {
                url: format!("https://github.com/{short}.git"),
                slug: short.to_string(),
            });
        }
        if let Some(short) = entry.strip_prefix("gh@") {
            return Some(RemoteRef {
                url: format!("git@github.com:{short}.git"),
                slug: short.to_string(),
            });
        }
        if entry.starts_with("git@") || entry.starts_with("https://") {
            let slug = entry
                .trim_start_matches("git@")
                .trim_start_matches("https://")
                .replace("github.com", "");
            let slug = slug
                .trim_start_matches([':', '/'])
                .trim_end_matches(".git")
                .to_string();
            return Some(RemoteRef {
                url: entry.to_string(),
                slug,
            });
        }
        None
    }
}

/// One unit of compilation: a root directory, resolved options, and the
/// per-file results produced under that root.
#[derive(Debug, Clone, Serialize)]
pub struct Brik {
    /// Directory all output paths are computed relative to. Always an
    /// ancestor of every file this brik compiles.
    pub root: PathBuf,
    /// The files entry this brik came from, as written by the caller.
    pub source: String,
    /// Options after brik-local config and named overrides merged in.
    pub options: BootOptions,
    /// Per-file compile results, filled once compilation finishes.
    pub files: Vec<FileRecord>,
}
