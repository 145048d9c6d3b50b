//! Implementation of the `brikr boot` command.
//!
//! Responsibility: translate CLI arguments into `BootOptions`, call the
//! core boot service, and display results. No business logic lives here.

use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use brikr_adapters::{GitCli, GlobWalker, JsonExportSource, LocalFilesystem, SimpleRenderer};
use brikr_core::{
    application::BootService,
    domain::{BootOptions, FileGroup},
};

use crate::{
    cli::{BootArgs, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `brikr boot` command.
///
/// Dispatch sequence:
/// 1. Parse the `--data` payload
/// 2. Convert CLI args to `BootOptions`
/// 3. Wire the production adapters into a `BootService`
/// 4. Run the pipeline on a current-thread runtime
/// 5. Print the summary
#[instrument(skip_all, fields(briks = args.files.len()))]
pub fn execute(args: BootArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    // 1. Data context
    let data = parse_data(args.data.as_deref())?;

    // 2. Options
    let mut options = BootOptions {
        files: args.files.into_iter().map(FileGroup::Single).collect(),
        output: args.output,
        cwd: global.cwd.clone(),
        overwrite: args.overwrite,
        disable_globs: args.disable_globs,
        relative_paths: args.relative_paths,
        ..Default::default()
    };
    options.ignore.extend(args.ignore);
    if let Some(entry) = &global.config {
        options.config.entry = Some(entry.clone());
    }

    debug!(
        output = ?options.output,
        overwrite = options.overwrite,
        disable_globs = options.disable_globs,
        "Options resolved"
    );

    // 3. Create adapters and the service
    let service = BootService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SimpleRenderer::new()),
        Box::new(JsonExportSource::new(SimpleRenderer::new())),
        Box::new(GlobWalker::new()),
        Box::new(GitCli::new()),
    );

    output.header("Booting briks...")?;
    info!("Boot started");

    // 4. The pipeline is async; briks fan out as concurrent tasks on a
    //    single thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(CliError::from)?;
    let report = runtime.block_on(service.boot(options, data))?;

    info!(files = report.files.len(), "Boot completed");

    // 5. Summary
    output.success(&format!("Done! Compiled {} file(s)", report.compiled_count()))?;
    let skipped = report.skipped_count();
    if skipped > 0 {
        output.warning(&format!(
            "{skipped} file(s) already existed and were skipped (use --overwrite to replace)"
        ))?;
    }

    if global.verbose > 0 {
        for file in &report.files {
            let marker = if file.skip { " (skipped)" } else { "" };
            output.print(&format!(
                "  {} -> {}{marker}",
                file.in_path.display(),
                file.out_path.display()
            ))?;
        }
    }

    Ok(())
}

/// Parse the inline `--data` JSON object (defaults to `{}`).
fn parse_data(raw: Option<&str>) -> CliResult<Value> {
    let Some(raw) = raw else {
        return Ok(json!({}));
    };
    let value: Value = serde_json::from_str(raw).map_err(|e| CliError::InvalidData {
        reason: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(CliError::InvalidData {
            reason: "expected a JSON object".into(),
        });
    }
    Ok(value)
}
