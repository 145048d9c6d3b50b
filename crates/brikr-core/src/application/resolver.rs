//! Brik resolution: one `files` entry → one compiled brik.
//!
//! A brik is resolved in isolation: remote references are staged
//! locally, the brik's root is computed, its local config and any named
//! override are merged into the options, and every matched file is
//! compiled concurrently. One file failing fails the whole brik.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
    application::{
        boot::{BootService, STAGING_DIR},
        config::ConfigLoader,
        hooks::HookContext,
        root::get_root,
    },
    domain::{
        brik::{Brik, FileGroup, RemoteRef},
        file::normalize_path,
        merge::{MergeOptions, merge},
        options::{BRIK_OVERRIDES_KEY, BootOptions, ConfigSpec, Extend, absolutize},
    },
    error::{BrikrError, BrikrResult},
};

impl BootService {
    /// Resolve one files entry into a fully compiled brik.
    pub(crate) async fn resolve_brik(
        &self,
        group: &FileGroup,
        inherited: &BootOptions,
        data: &Value,
    ) -> BrikrResult<Brik> {
        let cwd = inherited.cwd();
        let source = group.label();

        // A single-entry group may be a remote repository reference;
        // stage it under `.briks/<owner/repo>` and compile from there.
        let mut entries = group.entries();
        let remote = match group {
            FileGroup::Single(entry) => RemoteRef::parse(entry),
            FileGroup::Many(_) => None,
        };
        if let Some(remote) = &remote {
            let staging = cwd.join(STAGING_DIR).join(&remote.slug);
            if !self.fs.exists(&staging) {
                info!(url = %remote.url, dest = %staging.display(), "cloning remote brik");
                self.fetcher.fetch(&remote.url, &staging)?;
            }
            entries = vec![staging.to_string_lossy().into_owned()];
        }

        let first = entries.first().ok_or_else(|| BrikrError::Usage {
            message: format!("brik `{source}` has no file entries"),
        })?;
        let first = normalize_path(&absolutize(Path::new(first), &cwd));

        // Root: explicit option, then the hook, then the nearest
        // existing ancestor of the first entry.
        let ctx = HookContext {
            options: inherited,
            data,
        };
        let root = match &inherited.root {
            Some(root) => normalize_path(&absolutize(root, &cwd)),
            None => self
                .hooks
                .brik_root(&first, &ctx)
                .or_else(|| get_root(self.fs.as_ref(), &first))
                .ok_or_else(|| BrikrError::Usage {
                    message: format!("could not resolve a root directory for brik `{source}`"),
                })?,
        };

        // Brik-local config: exactly the root directory, no cascading.
        let brik_spec = ConfigSpec {
            name: "brik".into(),
            start_path: Some(root.clone()),
            stop_dir: Some(root.clone()),
            entry: None,
            extend: Extend::Flag(false),
        };
        let brik_config = ConfigLoader::new(self.fs.as_ref()).load(&brik_spec)?;
        let mut brik_layer = brik_config.data;

        // A named brik can be overridden from the caller's data.
        let name = brik_layer
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(name) = name {
            if let Some(overrides) = data.get(BRIK_OVERRIDES_KEY).and_then(|b| b.get(&name)) {
                debug!(brik = %name, "applying named override");
                brik_layer = merge(brik_layer, overrides.clone(), &MergeOptions::default());
            }
        }

        // The inherited layer carries every option except `files`:
        // sibling groups must not leak into this brik, whose file list
        // is exactly its own entries.
        let mut inherited_layer = inherited.to_value()?;
        if let Some(map) = inherited_layer.as_object_mut() {
            map.shift_remove("files");
        }
        let options = BootOptions::layered([
            BootOptions::default().to_value()?,
            inherited_layer,
            json!({ "files": entries, "root": root }),
            brik_layer,
        ])?;

        let entries: Vec<String> = options.files.iter().flat_map(FileGroup::entries).collect();
        if entries.is_empty() {
            return Err(BrikrError::Usage {
                message: format!("brik `{source}` resolved to an empty file list"),
            });
        }

        let paths = self.expand_entries(&entries, &cwd, &options)?;

        let brik = Brik {
            root,
            source: source.clone(),
            options,
            files: Vec::new(),
        };
        let files = try_join_all(
            paths
                .into_iter()
                .map(|path| self.compile_file(path, &brik, data)),
        )
        .await?;

        debug!(brik = %source, files = files.len(), "brik resolved");
        Ok(Brik { files, ..brik })
    }

    /// Turn files entries into concrete input paths, honoring
    /// `disable_globs`. A directory entry (a staged clone, typically)
    /// is expanded recursively.
    fn expand_entries(
        &self,
        entries: &[String],
        cwd: &Path,
        options: &BootOptions,
    ) -> BrikrResult<Vec<PathBuf>> {
        if options.disable_globs {
            return Ok(entries
                .iter()
                .map(|entry| normalize_path(&absolutize(Path::new(entry), cwd)))
                .collect());
        }

        let patterns: Vec<String> = entries
            .iter()
            .map(|entry| {
                let absolute = absolutize(Path::new(entry), cwd);
                if self.fs.is_dir(&absolute) {
                    format!("{}/**/*", entry.trim_end_matches('/'))
                } else {
                    entry.clone()
                }
            })
            .collect();
        self.globs
            .expand(&patterns, cwd, &options.ignore, &options.matcher)
    }
}
