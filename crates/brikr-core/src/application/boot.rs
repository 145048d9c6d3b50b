//! Boot Service - main application orchestrator.
//!
//! This service coordinates the entire boot workflow:
//! 1. Load the cascading config and layer the effective options
//! 2. Resolve each files entry into a brik (concurrently)
//! 3. Compile every matched file under each brik
//! 4. Aggregate per-brik results into the final report
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        config::ConfigLoader,
        hooks::{DefaultHooks, Hooks},
        ports::{ExportSource, Filesystem, GlobMatcher, RepoFetcher, TemplateRenderer},
        report::Report,
    },
    domain::{
        merge::{MergeOptions, merge},
        options::{BOOT_OPTIONS_KEY, BootOptions, OPTIONS_NAMESPACE},
    },
    error::{BrikrError, BrikrResult},
};

/// Directory under cwd where remote briks are staged, removed at the
/// end of every run.
pub(crate) const STAGING_DIR: &str = ".briks";

/// Main boot service.
///
/// Orchestrates config loading, brik resolution, file compilation, and
/// result aggregation.
pub struct BootService {
    pub(crate) fs: Box<dyn Filesystem>,
    pub(crate) renderer: Box<dyn TemplateRenderer>,
    pub(crate) exports: Box<dyn ExportSource>,
    pub(crate) globs: Box<dyn GlobMatcher>,
    pub(crate) fetcher: Box<dyn RepoFetcher>,
    pub(crate) hooks: Box<dyn Hooks>,
}

impl BootService {
    /// Create a new boot service with the given adapters and the
    /// default hook set.
    pub fn new(
        fs: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        exports: Box<dyn ExportSource>,
        globs: Box<dyn GlobMatcher>,
        fetcher: Box<dyn RepoFetcher>,
    ) -> Self {
        Self {
            fs,
            renderer,
            exports,
            globs,
            fetcher,
            hooks: Box::new(DefaultHooks),
        }
    }

    /// Replace the hook set.
    pub fn with_hooks(mut self, hooks: Box<dyn Hooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Boot a set of briks.
    ///
    /// This is the main use case - resolves every `files` entry into a
    /// brik, compiles each brik's files, and reports what happened. A
    /// brik that fails is logged and omitted from the report; its
    /// siblings still complete. Failures before the fan-out (missing
    /// `files`, an unreadable explicit config entry) return `Err`.
    #[instrument(skip_all, fields(briks = options.files.len()))]
    pub async fn boot(&self, options: BootOptions, data: Value) -> BrikrResult<Report> {
        if options.files.is_empty() {
            return Err(BrikrError::Usage {
                message: "the `files` option is required and must not be empty".into(),
            });
        }

        // 1. Load config and layer options: defaults → config → direct.
        let mut spec = options.config.clone();
        if spec.start_path.is_none() && spec.entry.is_none() {
            spec.start_path = Some(options.cwd());
        }
        let config = ConfigLoader::new(self.fs.as_ref()).load(&spec)?;
        if let Some(entry) = &config.meta.entry {
            info!(config = %entry.display(), "config loaded");
        }

        let config_options = config
            .data
            .get(OPTIONS_NAMESPACE)
            .and_then(|ns| ns.get(BOOT_OPTIONS_KEY))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let options = BootOptions::layered([
            BootOptions::default().to_value()?,
            config_options,
            options.to_sparse_value()?,
        ])?;

        // 2. Config data sits under the directly-supplied data.
        let data = merge(config.data, data, &MergeOptions::default());

        // 3. Fan out briks concurrently; a failed brik doesn't abort
        //    its siblings.
        let resolutions = join_all(
            options
                .files
                .iter()
                .map(|group| self.resolve_brik(group, &options, &data)),
        )
        .await;

        let mut briks = Vec::new();
        for (group, resolution) in options.files.iter().zip(resolutions) {
            match resolution {
                Ok(brik) => briks.push(brik),
                Err(e) => error!(brik = %group, error = %e, "brik failed, continuing"),
            }
        }

        // 4. Remote staging never survives a run, whatever happened.
        let staging = options.cwd().join(STAGING_DIR);
        if self.fs.exists(&staging) {
            if let Err(e) = self.fs.remove_dir_all(&staging) {
                warn!(path = %staging.display(), error = %e, "failed to remove staging directory");
            }
        }

        let report = Report::aggregate(briks, options, data);

        info!("Done! Compiled {} file(s)", report.compiled_count());
        let skipped = report.skipped_count();
        if skipped > 0 {
            warn!(
                "{skipped} file(s) already existed and were skipped; \
                 set the `overwrite` option to replace them"
            );
        }
        debug!(
            briks = report.briks.len(),
            files = report.files.len(),
            "boot finished"
        );

        Ok(report)
    }
}
