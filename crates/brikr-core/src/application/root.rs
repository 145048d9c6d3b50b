//! Root resolution: the nearest existing ancestor directory of a path.

use std::path::{Path, PathBuf};

use crate::application::ports::Filesystem;

/// Find the nearest existing directory for a path, which may be a glob
/// or a path that does not exist yet.
///
/// If `path` exists and is a directory it is returned as-is; otherwise
/// the last segment is stripped and the walk repeats. When no segment
/// separator remains the root is absent — a nonexistent top-level path
/// never resolves to the filesystem root.
///
/// Used to anchor a brik's relative output paths, and exposed on the
/// CLI as `brikr root`.
pub fn get_root(fs: &dyn Filesystem, path: &Path) -> Option<PathBuf> {
    // The walk is textual on '/' segments so glob components like
    // `**` strip cleanly.
    let mut current = path.to_string_lossy().replace('\\', "/");
    loop {
        if !current.is_empty() && fs.is_dir(Path::new(&current)) {
            return Some(PathBuf::from(current));
        }
        match current.rfind('/') {
            Some(index) => current.truncate(index),
            None => return None,
        }
    }
}
