//! Application layer: pipeline services and the ports they drive.
//!
//! The pipeline runs in five stages, each in its own module:
//! config load ([`config`]) → brik resolution ([`resolver`]) → file
//! compilation ([`compiler`]) → aggregation ([`report`]), orchestrated
//! by [`boot::BootService`]. The root resolver ([`root`]) anchors
//! relative output paths and doubles as a public lookup.

pub mod boot;
pub mod compiler;
pub mod config;
pub mod hooks;
pub mod ports;
pub mod report;
pub mod resolver;
pub mod root;

pub use boot::BootService;
pub use config::{ConfigLoader, ConfigMeta, ResolvedConfig};
pub use report::{Filepaths, Report};
pub use root::get_root;
