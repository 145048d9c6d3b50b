//! Cascading config loading.
//!
//! Finds the nearest config file walking upward from a start path,
//! follows its `extends` chain, and folds every discovered layer into
//! a single configuration map with the nearest file winning.
//!
//! Loading never fails the pipeline: an absent config resolves to an
//! empty `success: false` configuration and the pipeline proceeds with
//! defaults. The one exception is an explicitly requested `entry` file
//! that exists but is malformed — that is a hard error, because the
//! caller named the file directly.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::ports::Filesystem;
use crate::domain::file::normalize_path;
use crate::domain::merge::{MergeOptions, merge};
use crate::domain::options::{ConfigSpec, absolutize};
use crate::error::BrikrResult;

/// Provenance of a resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMeta {
    /// Module name the search used.
    pub name: String,
    /// Where the upward search started (or would have, when an explicit
    /// entry bypassed it).
    pub start_path: PathBuf,
    /// The nearest config file found, absent when none was.
    pub entry: Option<PathBuf>,
    /// Every extended file that contributed, in discovery order,
    /// excluding the entry itself. Each file is loaded at most once.
    pub extends: Vec<PathBuf>,
    /// False when no config was found (or the found one was unreadable).
    pub success: bool,
}

/// The result of a config load: provenance plus the merged data.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub meta: ConfigMeta,
    pub data: Value,
}

/// Finds and loads a cascading config file through the filesystem port.
pub struct ConfigLoader<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Load the configuration described by `spec`.
    pub fn load(&self, spec: &ConfigSpec) -> BrikrResult<ResolvedConfig> {
        let start_path = spec
            .start_path
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let entry = match &spec.entry {
            Some(entry) => {
                let entry = normalize_path(&absolutize(entry, &start_path));
                if !self.fs.exists(&entry) {
                    debug!(entry = %entry.display(), "config entry not found");
                    return Ok(Self::empty(spec, &start_path));
                }
                // An explicit entry must parse; search results are lenient.
                let data = self.fs.read_json(&entry)?;
                Some((entry, data))
            }
            None => match self.search(spec, &start_path) {
                Some(found) => match self.fs.read_json(&found) {
                    Ok(data) => Some((found, data)),
                    Err(e) => {
                        warn!(error = %e, "discovered config failed to load");
                        return Ok(Self::empty(spec, &start_path));
                    }
                },
                None => None,
            },
        };

        let Some((entry_path, entry_data)) = entry else {
            debug!(start = %start_path.display(), name = %spec.name, "no config found");
            return Ok(Self::empty(spec, &start_path));
        };

        // Walk the extends chain depth-first, entry first. The visited
        // set guards against cycles and duplicate loads.
        let mut visited = vec![entry_path.clone()];
        let mut layers = vec![(entry_path.clone(), entry_data)];
        let mut index = 0;
        while index < layers.len() {
            let (layer_path, layer_data) = layers[index].clone();
            index += 1;
            if !spec.extend.is_enabled() {
                break;
            }
            let declaring_dir = layer_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/"));
            let mut inserted = 0;
            for extended in spec.extend.extends_of(&layer_data) {
                let resolved = normalize_path(&absolutize(Path::new(&extended), &declaring_dir));
                if visited.contains(&resolved) {
                    continue;
                }
                visited.push(resolved.clone());
                match self.fs.read_json(&resolved) {
                    // siblings land in declaration order, ahead of
                    // anything they themselves extend
                    Ok(data) => {
                        layers.insert(index + inserted, (resolved, data));
                        inserted += 1;
                    }
                    Err(e) => warn!(error = %e, "extended config failed to load"),
                }
            }
        }

        // Each newly discovered config is the merge target with the
        // accumulated (nearer) result on top, so the entry wins over
        // everything it extends.
        let mut data = Value::Object(Map::new());
        let mut extends = Vec::new();
        for (i, (path, layer)) in layers.into_iter().enumerate() {
            if i > 0 {
                extends.push(path);
            }
            data = merge(layer, data, &MergeOptions::default());
        }

        Ok(ResolvedConfig {
            meta: ConfigMeta {
                name: spec.name.clone(),
                start_path,
                entry: Some(entry_path),
                extends,
                success: true,
            },
            data,
        })
    }

    /// Walk upward from `start` looking for a filename variant, bounded
    /// by `stop_dir` when set.
    fn search(&self, spec: &ConfigSpec, start: &Path) -> Option<PathBuf> {
        let mut dir = normalize_path(start);
        loop {
            for variant in spec.filename_variants() {
                let candidate = dir.join(&variant);
                if self.fs.exists(&candidate) {
                    debug!(config = %candidate.display(), "config found");
                    return Some(candidate);
                }
            }
            if spec.stop_dir.as_deref() == Some(dir.as_path()) {
                return None;
            }
            dir = dir.parent()?.to_path_buf();
        }
    }

    fn empty(spec: &ConfigSpec, start_path: &Path) -> ResolvedConfig {
        ResolvedConfig {
            meta: ConfigMeta {
                name: spec.name.clone(),
                start_path: start_path.to_path_buf(),
                entry: None,
                extends: Vec::new(),
                success: false,
            },
            data: Value::Object(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::Extend;
    use crate::testutil::MapFs;
    use serde_json::json;

    fn spec_at(start: &str) -> ConfigSpec {
        ConfigSpec::from_start_path(start)
    }

    #[test]
    fn absent_config_resolves_empty_not_error() {
        let fs = MapFs::with_dirs(["/proj"]);
        let config = ConfigLoader::new(&fs).load(&spec_at("/proj")).unwrap();
        assert!(!config.meta.success);
        assert!(config.meta.entry.is_none());
        assert_eq!(config.data, json!({}));
    }

    #[test]
    fn nearest_config_found_walking_upward() {
        let fs = MapFs::new();
        fs.add_file("/proj/.brikrrc.json", r#"{"who": "project"}"#);
        let config = ConfigLoader::new(&fs)
            .load(&spec_at("/proj/deep/nested"))
            .unwrap();
        assert!(config.meta.success);
        assert_eq!(
            config.meta.entry,
            Some(PathBuf::from("/proj/.brikrrc.json"))
        );
        assert_eq!(config.data["who"], "project");
    }

    #[test]
    fn stop_dir_bounds_the_search() {
        let fs = MapFs::new();
        fs.add_file("/proj/.brikrrc.json", r#"{"who": "project"}"#);
        let mut spec = spec_at("/proj/sub");
        spec.stop_dir = Some(PathBuf::from("/proj/sub"));
        let config = ConfigLoader::new(&fs).load(&spec).unwrap();
        assert!(!config.meta.success);
    }

    #[test]
    fn entry_bypasses_search() {
        let fs = MapFs::new();
        fs.add_file("/elsewhere/custom.json", r#"{"who": "custom"}"#);
        fs.add_file("/proj/.brikrrc.json", r#"{"who": "nearest"}"#);
        let mut spec = spec_at("/proj");
        spec.entry = Some(PathBuf::from("/elsewhere/custom.json"));
        let config = ConfigLoader::new(&fs).load(&spec).unwrap();
        assert_eq!(config.data["who"], "custom");
    }

    #[test]
    fn entry_does_not_replace_the_start_path() {
        let fs = MapFs::new();
        fs.add_file("/elsewhere/custom.json", r#"{"who": "custom"}"#);
        let mut spec = spec_at("/proj");
        spec.entry = Some(PathBuf::from("/elsewhere/custom.json"));
        let config = ConfigLoader::new(&fs).load(&spec).unwrap();
        assert_eq!(config.meta.start_path, PathBuf::from("/proj"));
        assert_eq!(
            config.meta.entry,
            Some(PathBuf::from("/elsewhere/custom.json"))
        );
    }

    #[test]
    fn malformed_explicit_entry_is_an_error() {
        let fs = MapFs::new();
        fs.add_file("/proj/custom.json", "not json {");
        let mut spec = spec_at("/proj");
        spec.entry = Some(PathBuf::from("/proj/custom.json"));
        assert!(ConfigLoader::new(&fs).load(&spec).is_err());
    }

    #[test]
    fn malformed_discovered_config_is_lenient() {
        let fs = MapFs::new();
        fs.add_file("/proj/.brikrrc.json", "not json {");
        let config = ConfigLoader::new(&fs).load(&spec_at("/proj")).unwrap();
        assert!(!config.meta.success);
        assert_eq!(config.data, json!({}));
    }

    #[test]
    fn extends_chain_dedups_and_nearest_wins() {
        let fs = MapFs::new();
        // E extends F and G; F also extends G. G must load only once.
        fs.add_file(
            "/proj/.brikrrc.json",
            r#"{"_brikr": {"extends": ["./f/.brikrrc.json", "./g/.brikrrc.json"]},
                "key": "from-entry", "only_e": true}"#,
        );
        fs.add_file(
            "/proj/f/.brikrrc.json",
            r#"{"_brikr": {"extends": ["../g/.brikrrc.json"]},
                "key": "from-f", "only_f": true}"#,
        );
        fs.add_file(
            "/proj/g/.brikrrc.json",
            r#"{"key": "from-g", "only_f": "g-version", "only_g": true}"#,
        );

        let config = ConfigLoader::new(&fs).load(&spec_at("/proj")).unwrap();
        assert!(config.meta.success);
        assert_eq!(
            config.meta.extends,
            vec![
                PathBuf::from("/proj/f/.brikrrc.json"),
                PathBuf::from("/proj/g/.brikrrc.json"),
            ]
        );
        // entry wins over extended layers
        assert_eq!(config.data["key"], "from-entry");
        // F wins over G for keys E doesn't set
        assert_eq!(config.data["only_f"], true);
        // everything contributes keys only it defines
        assert_eq!(config.data["only_e"], true);
        assert_eq!(config.data["only_g"], true);
    }

    #[test]
    fn extends_cycle_terminates() {
        let fs = MapFs::new();
        fs.add_file(
            "/proj/.brikrrc.json",
            r#"{"_brikr": {"extends": ["./other.json"]}, "a": 1}"#,
        );
        fs.add_file(
            "/proj/other.json",
            r#"{"_brikr": {"extends": ["./.brikrrc.json"]}, "b": 2}"#,
        );
        let config = ConfigLoader::new(&fs).load(&spec_at("/proj")).unwrap();
        assert_eq!(config.data["a"], 1);
        assert_eq!(config.data["b"], 2);
        assert_eq!(config.meta.extends, vec![PathBuf::from("/proj/other.json")]);
    }

    #[test]
    fn extend_disabled_skips_extends() {
        let fs = MapFs::new();
        fs.add_file(
            "/proj/.brikrrc.json",
            r#"{"_brikr": {"extends": ["./other.json"]}, "a": 1}"#,
        );
        fs.add_file("/proj/other.json", r#"{"b": 2}"#);
        let mut spec = spec_at("/proj");
        spec.extend = Extend::Flag(false);
        let config = ConfigLoader::new(&fs).load(&spec).unwrap();
        assert_eq!(config.data["a"], 1);
        assert!(config.data.get("b").is_none());
    }
}
