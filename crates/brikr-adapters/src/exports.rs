//! Export-source adapter: declarative JSON documents.
//!
//! A script/data export file is a JSON document whose text may contain
//! renderer placeholders. Loading reads the file, renders it against
//! the data context, and parses the result. Every load reads the file
//! fresh; nothing is cached between calls.

use std::path::Path;

use brikr_core::{
    application::ports::{ExportSource, TemplateRenderer},
    error::{BrikrError, BrikrResult},
};
use serde_json::Value;
use tracing::trace;

/// Loads export sources as rendered JSON documents.
pub struct JsonExportSource<R: TemplateRenderer> {
    renderer: R,
}

impl<R: TemplateRenderer> JsonExportSource<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }
}

impl<R: TemplateRenderer> ExportSource for JsonExportSource<R> {
    fn load(&self, path: &Path, context: &Value) -> BrikrResult<Value> {
        let raw = std::fs::read_to_string(path).map_err(|e| BrikrError::Export {
            path: path.to_path_buf(),
            reason: format!("Failed to read: {e}"),
        })?;
        let rendered = self.renderer.render(&raw, context)?;
        trace!(path = %path.display(), "export source loaded");
        serde_json::from_str(&rendered).map_err(|e| BrikrError::Export {
            path: path.to_path_buf(),
            reason: format!("invalid JSON after rendering: {e}"),
        })
    }
}
