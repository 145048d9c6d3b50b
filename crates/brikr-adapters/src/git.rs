//! Remote brik fetching via the git CLI.

use std::path::Path;
use std::process::Command;

use brikr_core::{
    application::ports::RepoFetcher,
    error::{BrikrError, BrikrResult},
};
use tracing::debug;

/// Clones remote briks by shelling out to `git`.
#[derive(Debug, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoFetcher for GitCli {
    fn fetch(&self, url: &str, dest: &Path) -> BrikrResult<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BrikrError::Filesystem {
                path: parent.to_path_buf(),
                reason: format!("Failed to create staging directory: {e}"),
            })?;
        }

        debug!(url, dest = %dest.display(), "git clone");
        let output = Command::new("git")
            .arg("clone")
            .arg("--recursive")
            .arg(url)
            .arg(dest)
            .output()
            .map_err(|e| BrikrError::CloneFailed {
                url: url.to_string(),
                reason: format!("failed to run git: {e}"),
            })?;

        if !output.status.success() {
            return Err(BrikrError::CloneFailed {
                url: url.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
