//! Core domain layer for brikr.
//!
//! Pure business logic with no I/O: the deep-merge engine, JSON key
//! ordering, the options model, and the brik/file-record data types.
//! All filesystem, rendering, and git concerns live behind ports
//! (traits) defined in the application layer.

pub mod brik;
pub mod file;
pub mod json;
pub mod merge;
pub mod options;

// Re-exports for convenience
pub use brik::{Brik, FileGroup, RemoteRef};
pub use file::{ExportKind, FileRecord, normalize_path, relative_to};
pub use json::{reorder_keys, sort_keys, sort_manifest_dependencies, to_pretty_tabs};
pub use merge::{ArrayStrategy, MergeOptions, merge, merge_all, shallow_merge};
pub use options::{BootOptions, ConfigSpec, Extend, JsonBase, MatcherOptions};
