//! `brikr config` — print the resolved configuration cascade.

use brikr_adapters::LocalFilesystem;
use brikr_core::{
    application::ConfigLoader,
    domain::{ConfigSpec, json::to_pretty_tabs, options::absolutize},
};

use crate::{
    cli::{ConfigArgs, global::GlobalArgs},
    error::CliResult,
    output::OutputManager,
};

/// Execute the `brikr config` command.
pub fn execute(args: ConfigArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let cwd = match &global.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir()?,
    };
    let start_path = match args.from {
        Some(from) => absolutize(&from, &cwd),
        None => cwd,
    };

    let spec = ConfigSpec {
        start_path: Some(start_path),
        entry: global.config.clone(),
        ..Default::default()
    };

    let fs = LocalFilesystem::new();
    let config = ConfigLoader::new(&fs).load(&spec)?;

    if !config.meta.success {
        output.warning("No configuration file found")?;
        return Ok(());
    }

    if let Some(entry) = &config.meta.entry {
        output.header(&format!("Config: {}", entry.display()))?;
    }
    for extended in &config.meta.extends {
        output.print(&format!("  extends {}", extended.display()))?;
    }
    output.print(&to_pretty_tabs(&config.data)?)?;

    Ok(())
}
