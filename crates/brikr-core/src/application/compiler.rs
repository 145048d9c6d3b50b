//! The per-file compile state machine.
//!
//! Every matched input runs through the same sequence: compute the
//! output path, classify the export kind, remap the marker extension,
//! run the rename/overwrite/skip hooks, then produce content per kind
//! and write it. Content is never retained after the write; only the
//! `FileRecord` survives.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    application::{boot::BootService, hooks::HookContext},
    domain::{
        brik::Brik,
        file::{ExportKind, FileRecord, relative_to},
        json::to_pretty_tabs,
        merge::{MergeOptions, merge, shallow_merge},
        options::{BootOptions, JsonBase, absolutize},
    },
    error::{BrikrError, BrikrResult},
};

impl BootService {
    /// Compile one input file under a brik.
    ///
    /// Skipping is a success: the record comes back with `skip: true`
    /// and `success: true`, and nothing is written.
    pub(crate) async fn compile_file(
        &self,
        in_path: PathBuf,
        brik: &Brik,
        data: &Value,
    ) -> BrikrResult<FileRecord> {
        let options = &brik.options;
        let output = options.output();

        // 1. Output mirrors the input's position under the brik root.
        let out_path = output.join(relative_to(&in_path, &brik.root));
        let mut file = FileRecord::new(brik.source.clone(), in_path, out_path);

        // 2-3. Classify, then strip the marker extension from the out
        // path. Script-export globs take precedence over data-export.
        if self
            .globs
            .is_match(&file.in_path, &options.js_exports, &options.matcher)
        {
            file.kind = ExportKind::ScriptExport;
            if file.out_path.extension().is_some_and(|e| e == "xjs") {
                file.out_path.set_extension("");
            }
        } else if self
            .globs
            .is_match(&file.in_path, &options.json_exports, &options.matcher)
        {
            file.kind = ExportKind::DataExport;
            if file.out_path.extension().is_some_and(|e| e == "xjson") {
                file.out_path.set_extension("json");
            }
        }

        // 4-6. Rename hook, existence, overwrite decision.
        let ctx = HookContext { options, data };
        file.out_path = self.hooks.rename(&file, &ctx);
        file.out_path_exists = self.fs.exists(&file.out_path);
        file.overwrite = options.overwrite || self.hooks.overwrite_file(&file, &ctx);

        // 7. Skip when the target exists and nothing authorizes the
        // write. Data-exports never skip on existence: merging with the
        // existing file is their whole point.
        let existence_skip =
            !file.kind.is_data_export() && file.out_path_exists && !file.overwrite;
        if existence_skip || !self.hooks.compile_or_skip(&file, &ctx) {
            file.skip = true;
            file.success = true;
            debug!(file = %file.in_path.display(), "skipped");
            return Ok(file);
        }

        // 8. Produce and write content.
        let context = render_context(options, data)?;
        match file.kind {
            ExportKind::Template => {
                let raw = self.fs.read_to_string(&file.in_path)?;
                let rendered = self.renderer.render(&raw, &context).map_err(|e| match e {
                    BrikrError::Render { .. } => e,
                    other => BrikrError::Render {
                        path: file.in_path.clone(),
                        reason: other.to_string(),
                    },
                })?;
                self.fs.write_file(&file.out_path, &rendered, file.overwrite)?;
            }
            ExportKind::ScriptExport => {
                let value = self.exports.load(&file.in_path, &context)?;
                let content = match value {
                    Value::String(text) => text,
                    other => pretty(&other)?,
                };
                self.fs.write_file(&file.out_path, &content, file.overwrite)?;
            }
            ExportKind::DataExport => {
                let content = self.compile_data_export(&file, options, &context)?;
                // the merge already incorporated the existing file
                self.fs.write_file(&file.out_path, &content, true)?;
            }
        }

        // 9. Terminal state; content is gone, only the record remains.
        file.success = true;
        trace!(
            file = %file.in_path.display(),
            out = %file.out_path.display(),
            kind = ?file.kind,
            "compiled"
        );
        Ok(file)
    }

    /// Data-export content: fresh load merged into the existing output
    /// (json_merge hook), reordered (json_sort hook), then combined
    /// with any configured `jsons` base for this output path.
    fn compile_data_export(
        &self,
        file: &FileRecord,
        options: &BootOptions,
        context: &Value,
    ) -> BrikrResult<String> {
        let fresh = self.exports.load(&file.in_path, context)?;
        let existing = if file.out_path_exists {
            self.fs.read_json(&file.out_path)?
        } else {
            Value::Object(Map::new())
        };

        let merged = self.hooks.json_merge(file, &existing, fresh);
        let mut content = self.hooks.json_sort(file, &existing, merged);

        let key = file
            .relative_out(&options.output())
            .to_string_lossy()
            .into_owned();
        if let Some(base) = options.jsons.get(&key) {
            let base = match base {
                JsonBase::Inline(map) => Value::Object(map.clone()),
                JsonBase::Path(path) => {
                    let path = absolutize(path.as_ref(), &options.cwd());
                    self.fs
                        .read_json(&path)
                        .map_err(|_| BrikrError::MergeBase { key: key.clone() })?
                }
            };
            content = if file.overwrite {
                // overwriting resets to the base at the top level
                shallow_merge(content, base)
            } else {
                merge(base, content, &MergeOptions::default())
            };
        }

        pretty(&content)
    }
}

fn render_context(options: &BootOptions, data: &Value) -> BrikrResult<Value> {
    let mut context = match data {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    context.insert("_brik".into(), options.to_value()?);
    Ok(Value::Object(context))
}

fn pretty(value: &Value) -> BrikrResult<String> {
    let mut text = to_pretty_tabs(value)?;
    text.push('\n');
    Ok(text)
}
