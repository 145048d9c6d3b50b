//! Brikr Core - template-resolution and file-compilation pipeline.
//!
//! This crate provides the domain and application layers for the brikr
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           brikr-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           BootService                   │
//! │  (config load → brik resolve → compile  │
//! │        → aggregate report)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, Renderer, ExportSource,   │
//! │     GlobMatcher, RepoFetcher)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     brikr-adapters (Infrastructure)     │
//! │  (LocalFilesystem, SimpleRenderer, …)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (merge engine, json sorting, options,  │
//! │     brik and file-record model)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brikr_core::{application::BootService, domain::{BootOptions, FileGroup}};
//! use serde_json::json;
//!
//! # async fn demo(service: BootService) -> brikr_core::error::BrikrResult<()> {
//! let mut options = BootOptions::default();
//! options.files = vec![FileGroup::Single("templates/**/*".into())];
//!
//! let report = service.boot(options, json!({"name": "My Project"})).await?;
//! println!("compiled {} files", report.files.len());
//! # Ok(())
//! # }
//! ```

// Domain layer (pure merge/sort logic and the options model)
pub mod domain;

// Application layer (pipeline services and ports)
pub mod application;

// Error types
pub mod error;

// Shared test fixtures (map-backed filesystem stub)
#[cfg(test)]
pub(crate) mod testutil;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BootService, ConfigLoader, ResolvedConfig, Report, get_root,
        hooks::{DefaultHooks, HookContext, Hooks},
        ports::{ExportSource, Filesystem, GlobMatcher, RepoFetcher, TemplateRenderer},
    };
    pub use crate::domain::{
        ArrayStrategy, BootOptions, Brik, ConfigSpec, ExportKind, FileGroup, FileRecord,
        MatcherOptions, MergeOptions, merge, merge_all,
    };
    pub use crate::error::{BrikrError, BrikrResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
