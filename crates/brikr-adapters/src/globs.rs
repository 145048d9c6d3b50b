//! Glob expansion and matching built on globset + walkdir.

use std::path::{Path, PathBuf};

use brikr_core::{
    application::ports::GlobMatcher,
    domain::options::{MatcherOptions, absolutize},
    error::{BrikrError, BrikrResult},
};
use globset::{GlobBuilder, GlobMatcher as CompiledGlob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

/// Production glob matcher: expansion walks the pattern's literal
/// prefix directory and matches case-sensitively.
#[derive(Debug, Clone, Copy)]
pub struct GlobWalker;

impl GlobWalker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GlobWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobMatcher for GlobWalker {
    fn expand(
        &self,
        patterns: &[String],
        cwd: &Path,
        ignore: &[String],
        options: &MatcherOptions,
    ) -> BrikrResult<Vec<PathBuf>> {
        let ignore_set = build_set(ignore)?;
        let mut expanded: Vec<PathBuf> = Vec::new();

        for pattern in patterns {
            let absolute = absolutize(Path::new(pattern), cwd);
            let text = absolute.to_string_lossy();

            // Literal entry: no walking, just an existence check.
            if !has_glob_meta(&text) {
                if absolute.is_file() && !ignore_set.is_match(&absolute) {
                    push_unique(&mut expanded, absolute);
                }
                continue;
            }

            let matcher = compile(&text)?;
            let prefix = literal_prefix(&absolute);
            for entry in WalkDir::new(&prefix).into_iter().filter_map(Result::ok) {
                if options.files_only && !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if !options.dot && is_hidden_under(path, &prefix) {
                    continue;
                }
                if matcher.is_match(path) && !ignore_set.is_match(path) {
                    push_unique(&mut expanded, path.to_path_buf());
                }
            }
        }

        debug!(patterns = patterns.len(), files = expanded.len(), "globs expanded");
        Ok(expanded)
    }

    fn is_match(&self, path: &Path, patterns: &[String], options: &MatcherOptions) -> bool {
        patterns.iter().any(|pattern| {
            // A separator-free pattern matches against the basename.
            let candidate = if options.match_base && !pattern.contains('/') {
                path.file_name().map(Path::new)
            } else {
                Some(path)
            };
            match (candidate, compile(pattern)) {
                (Some(candidate), Ok(matcher)) => matcher.is_match(candidate),
                _ => false,
            }
        })
    }
}

fn compile(pattern: &str) -> BrikrResult<CompiledGlob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| BrikrError::Usage {
            message: format!("invalid glob `{pattern}`: {e}"),
        })
}

fn build_set(patterns: &[String]) -> BrikrResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| BrikrError::Usage {
                message: format!("invalid ignore glob `{pattern}`: {e}"),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| BrikrError::Usage {
        message: format!("invalid ignore globs: {e}"),
    })
}

fn has_glob_meta(text: &str) -> bool {
    text.contains(['*', '?', '[', '{'])
}

/// The deepest directory named by the pattern before any glob syntax.
fn literal_prefix(pattern: &Path) -> PathBuf {
    let mut prefix = PathBuf::new();
    for component in pattern.components() {
        if has_glob_meta(&component.as_os_str().to_string_lossy()) {
            break;
        }
        prefix.push(component);
    }
    prefix
}

/// Whether any component of `path` below `prefix` is a dotfile.
fn is_hidden_under(path: &Path, prefix: &Path) -> bool {
    path.strip_prefix(prefix)
        .map(|rest| {
            rest.components().any(|c| {
                c.as_os_str()
                    .to_string_lossy()
                    .starts_with('.')
            })
        })
        .unwrap_or(false)
}

fn push_unique(expanded: &mut Vec<PathBuf>, path: PathBuf) {
    if !expanded.contains(&path) {
        expanded.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(dir: &tempfile::TempDir, relative: &str, content: &str) {
        let path = dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn expands_recursive_globs_to_files_only() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, "templates/readme.md", "a");
        seed(&dir, "templates/src/main.txt", "b");

        let files = GlobWalker::new()
            .expand(
                &["templates/**/*".into()],
                dir.path(),
                &[],
                &MatcherOptions::default(),
            )
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn ignore_globs_filter_matches() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, "templates/readme.md", "a");
        seed(&dir, "templates/.brikrc.json", "{}");
        seed(&dir, "templates/.git/refs/heads/main", "ref");

        let files = GlobWalker::new()
            .expand(
                &["templates/**/*".into()],
                dir.path(),
                &["**/.brikrc*".into(), "**/.git/**/*".into()],
                &MatcherOptions::default(),
            )
            .unwrap();

        assert_eq!(files, vec![dir.path().join("templates/readme.md")]);
    }

    #[test]
    fn dot_option_controls_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, "templates/.editorconfig", "a");
        seed(&dir, "templates/readme.md", "b");

        let no_dot = MatcherOptions {
            dot: false,
            ..Default::default()
        };
        let files = GlobWalker::new()
            .expand(&["templates/**/*".into()], dir.path(), &[], &no_dot)
            .unwrap();
        assert_eq!(files, vec![dir.path().join("templates/readme.md")]);

        let files = GlobWalker::new()
            .expand(
                &["templates/**/*".into()],
                dir.path(),
                &[],
                &MatcherOptions::default(),
            )
            .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn literal_entries_pass_through_without_walking() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, "exact.md", "a");

        let files = GlobWalker::new()
            .expand(
                &["exact.md".into(), "missing.md".into()],
                dir.path(),
                &[],
                &MatcherOptions::default(),
            )
            .unwrap();
        assert_eq!(files, vec![dir.path().join("exact.md")]);
    }

    #[test]
    fn match_base_matches_basename_patterns() {
        let globs = GlobWalker::new();
        let options = MatcherOptions::default();
        assert!(globs.is_match(Path::new("/a/b/pkg.xjson"), &["*.xjson".into()], &options));
        assert!(!globs.is_match(Path::new("/a/b/pkg.json"), &["*.xjson".into()], &options));

        let no_base = MatcherOptions {
            match_base: false,
            ..Default::default()
        };
        assert!(!globs.is_match(Path::new("/a/b/pkg.xjson"), &["*.xjson".into()], &no_base));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let globs = GlobWalker::new();
        let options = MatcherOptions::default();
        assert!(!globs.is_match(Path::new("/a/PKG.XJSON"), &["*.xjson".into()], &options));
    }
}
