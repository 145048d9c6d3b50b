//! Infrastructure adapters for brikr.
//!
//! This crate implements the ports defined in `brikr_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod exports;
pub mod filesystem;
pub mod git;
pub mod globs;
pub mod renderer;

// Re-export commonly used adapters
pub use exports::JsonExportSource;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::GitCli;
pub use globs::GlobWalker;
pub use renderer::SimpleRenderer;
