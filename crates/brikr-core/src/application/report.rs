//! Aggregation of per-brik results into the final report.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::domain::brik::Brik;
use crate::domain::file::{FileRecord, relative_to};
use crate::domain::options::BootOptions;

/// Flat input/output path lists across every brik.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Filepaths {
    /// Every compiled input path, in brik order.
    #[serde(rename = "in")]
    pub in_paths: Vec<PathBuf>,
    /// Every output path, deduplicated (several inputs may merge into
    /// one data-export output).
    pub out: Vec<PathBuf>,
}

/// The final result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub filepaths: Filepaths,
    /// Every file record across every brik, in brik order.
    pub files: Vec<FileRecord>,
    pub briks: Vec<Brik>,
    /// Every input and output path → the root of the brik that
    /// produced it.
    pub files_map: BTreeMap<PathBuf, PathBuf>,
    /// Brik root → brik.
    pub briks_map: BTreeMap<PathBuf, Brik>,
    /// The fully layered global options the run used.
    pub options: BootOptions,
    /// The merged data context the run used.
    pub data: Value,
}

impl Report {
    /// Fold per-brik results into the flat report shape.
    ///
    /// When `relative_paths` is set, every reported path (including the
    /// ones inside brik records) is rewritten relative to the working
    /// directory here, in one place, so the pipeline itself only ever
    /// deals in absolute paths.
    pub fn aggregate(mut briks: Vec<Brik>, options: BootOptions, data: Value) -> Self {
        if options.relative_paths {
            let cwd = options.cwd();
            for brik in &mut briks {
                for file in &mut brik.files {
                    file.in_path = relative_to(&file.in_path, &cwd);
                    file.out_path = relative_to(&file.out_path, &cwd);
                }
                brik.root = relative_to(&brik.root, &cwd);
            }
        }

        let mut filepaths = Filepaths::default();
        let mut files = Vec::new();
        let mut files_map = BTreeMap::new();
        let mut briks_map = BTreeMap::new();
        for brik in &briks {
            for file in &brik.files {
                filepaths.in_paths.push(file.in_path.clone());
                if !filepaths.out.contains(&file.out_path) {
                    filepaths.out.push(file.out_path.clone());
                }
                files_map.insert(file.in_path.clone(), brik.root.clone());
                files_map.insert(file.out_path.clone(), brik.root.clone());
                files.push(file.clone());
            }
            briks_map.insert(brik.root.clone(), brik.clone());
        }

        Self {
            filepaths,
            files,
            briks,
            files_map,
            briks_map,
            options,
            data,
        }
    }

    /// Count of files actually written.
    pub fn compiled_count(&self) -> usize {
        self.files.iter().filter(|f| f.success && !f.skip).count()
    }

    /// Count of files left untouched because their output existed.
    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| f.skip).count()
    }
}
