//! `brikr root` — print the root directory a path resolves to.

use std::path::Path;

use brikr_adapters::LocalFilesystem;
use brikr_core::{application::get_root, domain::options::absolutize};

use crate::{
    cli::{RootArgs, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `brikr root` command.
///
/// Globs are fine as input: glob segments never exist on disk, so the
/// walk lands on the deepest real directory before them.
pub fn execute(args: RootArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let cwd = match global.cwd {
        Some(cwd) => cwd,
        None => std::env::current_dir()?,
    };
    let path = absolutize(Path::new(&args.path), &cwd);

    let fs = LocalFilesystem::new();
    match get_root(&fs, &path) {
        Some(root) => {
            output.print(&root.display().to_string())?;
            Ok(())
        }
        None => Err(CliError::RootNotFound { path: args.path }),
    }
}
