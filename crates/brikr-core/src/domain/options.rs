//! The cascading options model.
//!
//! Options are layered: built-in defaults → config-file options →
//! directly-supplied options, later layers winning except arrays, which
//! are unioned (the merge engine's `Unique` strategy). Layering happens
//! on the generic `Value` representation; these typed structs exist at
//! the boundary and round-trip through `Value` via serde.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::brik::FileGroup;
use crate::domain::file::normalize_path;
use crate::domain::merge::{MergeOptions, merge_all};
use crate::error::{BrikrError, BrikrResult};

/// The namespace key configs use to scope brikr-specific settings
/// (`{"_brikr": {"boot": {...}, "extends": [...]}}`).
pub const OPTIONS_NAMESPACE: &str = "_brikr";

/// Key under the namespace that holds boot options in a config file.
pub const BOOT_OPTIONS_KEY: &str = "boot";

/// Key in the caller data that holds per-brik named overrides.
pub const BRIK_OVERRIDES_KEY: &str = "_briks";

/// Boot options for one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BootOptions {
    /// File groups to compile. Each entry is one brik: a path, glob,
    /// repository reference, or list of paths/globs.
    pub files: Vec<FileGroup>,
    /// Where and how to find the cascading config file.
    pub config: ConfigSpec,
    /// Globs of files to ignore, relative to `cwd`.
    pub ignore: Vec<String>,
    /// Directory compiled files are written to, relative to `cwd`.
    pub output: Option<PathBuf>,
    /// Working directory all relative paths resolve against.
    pub cwd: Option<PathBuf>,
    /// Overrides the computed brik root. Rarely needed.
    pub root: Option<PathBuf>,
    /// Overwrite existing files. Per-file decisions go through the
    /// `overwrite_file` hook instead.
    pub overwrite: bool,
    /// Treat every files/ignore entry as a literal path, not a glob.
    pub disable_globs: bool,
    /// Report paths relative to `cwd` instead of absolute.
    pub relative_paths: bool,
    /// Globs marking script-export sources.
    pub js_exports: Vec<String>,
    /// Globs marking data-export sources.
    pub json_exports: Vec<String>,
    /// Base objects for data-export outputs, keyed by output path
    /// relative to `output`.
    pub jsons: BTreeMap<String, JsonBase>,
    /// Pass-through settings for the glob matcher.
    pub matcher: MatcherOptions,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            config: ConfigSpec::default(),
            ignore: vec![
                "**/brik.config.json".into(),
                "**/.brikrc*".into(),
                "**/brikr.config.json".into(),
                "**/.brikrrc*".into(),
                "**/.git/**/*".into(),
            ],
            output: None,
            cwd: None,
            root: None,
            overwrite: false,
            disable_globs: false,
            relative_paths: false,
            js_exports: vec!["*.xjs".into()],
            json_exports: vec!["*.xjson".into()],
            jsons: BTreeMap::new(),
            matcher: MatcherOptions::default(),
        }
    }
}

impl BootOptions {
    /// Effective working directory, absolute and lexically normalized.
    /// Glob patterns are built from this path, so it must never carry a
    /// `.` component.
    pub fn cwd(&self) -> PathBuf {
        match &self.cwd {
            Some(cwd) => normalize_path(&absolutize(cwd, &current_dir())),
            None => current_dir(),
        }
    }

    /// Effective output directory, absolute (defaults to `cwd`).
    pub fn output(&self) -> PathBuf {
        let cwd = self.cwd();
        match &self.output {
            Some(output) => absolutize(output, &cwd),
            None => cwd,
        }
    }

    /// Serialize to the generic `Value` representation for layering.
    pub fn to_value(&self) -> BrikrResult<Value> {
        serde_json::to_value(self).map_err(|e| BrikrError::Internal {
            message: format!("options serialization failed: {e}"),
        })
    }

    /// Deserialize from the generic `Value` representation after
    /// layering. Unknown keys are retained by the merge but dropped
    /// here; they stay visible to templates via the `_brik` context.
    pub fn from_value(value: Value) -> BrikrResult<Self> {
        serde_json::from_value(value).map_err(|e| BrikrError::Usage {
            message: format!("invalid options: {e}"),
        })
    }

    /// Layer option objects lowest-precedence first and deserialize the
    /// result. Arrays union per the default `Unique` strategy.
    pub fn layered(layers: impl IntoIterator<Item = Value>) -> BrikrResult<Self> {
        let merged = merge_all(layers, &MergeOptions::default());
        Self::from_value(merged)
    }

    /// Serialize only the fields that differ from the built-in
    /// defaults. The directly-supplied layer must be sparse, otherwise
    /// untouched defaults would mask config-file options underneath.
    pub fn to_sparse_value(&self) -> BrikrResult<Value> {
        let (Value::Object(full), Value::Object(defaults)) =
            (self.to_value()?, Self::default().to_value()?)
        else {
            return Ok(Value::Object(Map::new()));
        };
        let sparse = full
            .into_iter()
            .filter(|(key, value)| defaults.get(key) != Some(value))
            .collect();
        Ok(Value::Object(sparse))
    }
}

/// Resolve `path` against `base` unless already absolute.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Where to find a cascading config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigSpec {
    /// Module name the filename variants derive from
    /// (`.{name}rc`, `.{name}rc.json`, `{name}.config.json`).
    pub name: String,
    /// Directory the upward search starts from. Ignored when `entry`
    /// is set. Defaults to the effective cwd.
    pub start_path: Option<PathBuf>,
    /// Load this exact file, bypassing the search.
    pub entry: Option<PathBuf>,
    /// Directory the upward search stops at (inclusive).
    pub stop_dir: Option<PathBuf>,
    /// Whether and where to honor an `extends` declaration.
    pub extend: Extend,
}

impl Default for ConfigSpec {
    fn default() -> Self {
        Self {
            name: "brikr".into(),
            start_path: None,
            entry: None,
            stop_dir: None,
            extend: Extend::default(),
        }
    }
}

impl ConfigSpec {
    /// A spec that searches from `start_path` with all other settings
    /// at their defaults (the "bare string" input normalization).
    pub fn from_start_path(start_path: impl Into<PathBuf>) -> Self {
        Self {
            start_path: Some(start_path.into()),
            ..Self::default()
        }
    }

    /// Candidate config filenames for this spec's module name, nearest
    /// variant first.
    pub fn filename_variants(&self) -> Vec<String> {
        vec![
            format!(".{}rc", self.name),
            format!(".{}rc.json", self.name),
            format!("{}.config.json", self.name),
        ]
    }
}

/// Whether the config loader follows an `extends` chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extend {
    /// `false` disables extending entirely; `true` reads a top-level
    /// `extends` key.
    Flag(bool),
    /// Read `extends` nested under this namespace key.
    Scoped(String),
}

impl Default for Extend {
    fn default() -> Self {
        Extend::Scoped(OPTIONS_NAMESPACE.into())
    }
}

impl Extend {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Extend::Flag(false))
    }

    /// Pull the declared `extends` list out of a loaded config's data.
    pub fn extends_of(&self, data: &Value) -> Vec<String> {
        let declared = match self {
            Extend::Flag(false) => return Vec::new(),
            Extend::Flag(true) => data.get("extends"),
            Extend::Scoped(key) => data.get(key).and_then(|scope| scope.get("extends")),
        };
        match declared {
            Some(Value::String(path)) => vec![path.clone()],
            Some(Value::Array(paths)) => paths
                .iter()
                .filter_map(|p| p.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A `jsons` base: inline object or path to a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonBase {
    Path(String),
    Inline(Map<String, Value>),
}

/// Pass-through settings for the glob matcher port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatcherOptions {
    /// Match dotfiles.
    pub dot: bool,
    /// Expansion yields files only, never directories.
    pub files_only: bool,
    /// A pattern without a separator matches against the basename.
    pub match_base: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            dot: true,
            files_only: true,
            match_base: true,
        }
    }
}
