//! Command handlers: one module per subcommand.

pub mod boot;
pub mod config;
pub mod root;
