//! Application ports (traits) for external dependencies.
//!
//! These are driven ports: the pipeline calls them, infrastructure in
//! `brikr-adapters` implements them. Everything the pipeline does to
//! the outside world — filesystem access, template rendering, export
//! loading, glob expansion, repository cloning — goes through here.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::options::MatcherOptions;
use crate::error::{BrikrError, BrikrResult};

/// Filesystem operations the pipeline needs.
pub trait Filesystem: Send + Sync {
    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> BrikrResult<String>;

    /// Write a file, creating parent directories as needed.
    ///
    /// When `overwrite` is false the write must fail if the target
    /// already exists — the compiler never silently clobbers outside
    /// its explicit rules.
    fn write_file(&self, path: &Path, content: &str, overwrite: bool) -> BrikrResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn remove_dir_all(&self, path: &Path) -> BrikrResult<()>;

    /// Read and parse a JSON file.
    fn read_json(&self, path: &Path) -> BrikrResult<Value> {
        let text = self.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| BrikrError::Config {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {e}"),
        })
    }
}

// A shared adapter can be handed to several consumers.
impl<T: Filesystem + ?Sized> Filesystem for std::sync::Arc<T> {
    fn read_to_string(&self, path: &Path) -> BrikrResult<String> {
        (**self).read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str, overwrite: bool) -> BrikrResult<()> {
        (**self).write_file(path, content, overwrite)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> BrikrResult<()> {
        (**self).remove_dir_all(path)
    }

    fn read_json(&self, path: &Path) -> BrikrResult<Value> {
        (**self).read_json(path)
    }
}

/// Renders a template string against a data context.
///
/// The templating language itself is a black box; the pipeline only
/// requires that rendering is deterministic for a given input pair.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> BrikrResult<String>;
}

/// Loads a script/data-export source as a value.
///
/// Implementations must load fresh on every call — the same logical
/// file may be compiled again within one process lifetime, and a stale
/// cached value must never be reused.
#[cfg_attr(test, mockall::automock)]
pub trait ExportSource: Send + Sync {
    fn load(&self, path: &Path, context: &Value) -> BrikrResult<Value>;
}

/// Glob expansion and matching.
#[cfg_attr(test, mockall::automock)]
pub trait GlobMatcher: Send + Sync {
    /// Expand patterns (relative to `cwd`) into absolute file paths,
    /// filtering anything matched by `ignore`.
    fn expand(
        &self,
        patterns: &[String],
        cwd: &Path,
        ignore: &[String],
        options: &MatcherOptions,
    ) -> BrikrResult<Vec<PathBuf>>;

    /// Case-sensitive match of one path against a pattern set.
    fn is_match(&self, path: &Path, patterns: &[String], options: &MatcherOptions) -> bool;
}

/// Clones a remote brik repository into a local staging directory.
#[cfg_attr(test, mockall::automock)]
pub trait RepoFetcher: Send + Sync {
    /// Clone `url` (including submodules) into `dest`.
    fn fetch(&self, url: &str, dest: &Path) -> BrikrResult<()>;
}
