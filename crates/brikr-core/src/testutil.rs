//! Map-backed filesystem stub for unit tests.
//!
//! The core crate cannot depend on `brikr-adapters` (that would be a
//! dependency cycle), so unit tests that need a filesystem use this
//! stub instead of the real `MemoryFilesystem` adapter.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::application::ports::{ExportSource, Filesystem, GlobMatcher, TemplateRenderer};
use crate::domain::options::{MatcherOptions, absolutize};
use crate::error::{BrikrError, BrikrResult};

#[derive(Debug, Default)]
pub struct MapFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl MapFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dirs<'a>(dirs: impl IntoIterator<Item = &'a str>) -> Self {
        let fs = Self::new();
        for dir in dirs {
            fs.dirs.lock().unwrap().insert(PathBuf::from(dir));
        }
        fs
    }

    pub fn add_file(&self, path: &str, content: &str) {
        let path = PathBuf::from(path);
        let mut ancestor = path.parent();
        while let Some(dir) = ancestor {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.lock().unwrap().insert(dir.to_path_buf());
            ancestor = dir.parent();
        }
        self.files.lock().unwrap().insert(path, content.to_string());
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn files_under(&self, prefix: &Path) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl Filesystem for MapFs {
    fn read_to_string(&self, path: &Path) -> BrikrResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| BrikrError::Filesystem {
                path: path.to_path_buf(),
                reason: "not found".into(),
            })
    }

    fn write_file(&self, path: &Path, content: &str, overwrite: bool) -> BrikrResult<()> {
        let mut files = self.files.lock().unwrap();
        if !overwrite && files.contains_key(path) {
            return Err(BrikrError::Filesystem {
                path: path.to_path_buf(),
                reason: "file exists".into(),
            });
        }
        files.insert(path.to_path_buf(), content.to_string());
        drop(files);
        let mut ancestor = path.parent();
        while let Some(dir) = ancestor {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.lock().unwrap().insert(dir.to_path_buf());
            ancestor = dir.parent();
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> BrikrResult<()> {
        self.files
            .lock()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }
}

/// Renderer stub: substitutes `{{key}}` for string values in the
/// context, leaves everything else alone.
pub struct TinyRenderer;

impl TemplateRenderer for TinyRenderer {
    fn render(&self, template: &str, context: &Value) -> BrikrResult<String> {
        let mut rendered = template.to_string();
        if let Some(map) = context.as_object() {
            for (key, value) in map {
                if let Some(text) = value.as_str() {
                    rendered = rendered.replace(&format!("{{{{{key}}}}}"), text);
                }
            }
        }
        Ok(rendered)
    }
}

/// Export-source stub: parses the file at `path` as a JSON document.
pub struct MapExports(pub Arc<MapFs>);

impl ExportSource for MapExports {
    fn load(&self, path: &Path, _context: &Value) -> BrikrResult<Value> {
        self.0
            .read_json(path)
            .map_err(|e| BrikrError::Export {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

/// Glob-matcher stub good enough for pipeline tests: expansion lists
/// map entries under the pattern's literal prefix; matching handles
/// `*.ext`-style basename patterns.
pub struct SuffixGlobs(pub Arc<MapFs>);

impl GlobMatcher for SuffixGlobs {
    fn expand(
        &self,
        patterns: &[String],
        cwd: &Path,
        ignore: &[String],
        _options: &MatcherOptions,
    ) -> BrikrResult<Vec<PathBuf>> {
        let ignore_needles: Vec<String> = ignore
            .iter()
            .map(|g| g.trim_matches(['*', '/']).to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let mut expanded = Vec::new();
        for pattern in patterns {
            let absolute = absolutize(Path::new(pattern), cwd);
            let prefix: PathBuf = absolute
                .components()
                .take_while(|c| !c.as_os_str().to_string_lossy().contains('*'))
                .collect();
            for file in self.0.files_under(&prefix) {
                let text = file.to_string_lossy();
                if ignore_needles.iter().any(|needle| text.contains(needle.as_str())) {
                    continue;
                }
                if !expanded.contains(&file) {
                    expanded.push(file);
                }
            }
        }
        Ok(expanded)
    }

    fn is_match(&self, path: &Path, patterns: &[String], _options: &MatcherOptions) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return false;
        };
        patterns.iter().any(|pattern| {
            pattern
                .strip_prefix('*')
                .is_some_and(|suffix| name.ends_with(suffix))
        })
    }
}
