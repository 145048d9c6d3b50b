//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "brikr",
    bin_name = "brikr",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f9f1} Boot boilerplate files from shared template briks",
    long_about = "Brikr compiles template files (briks) into your project: \
                  plain templates are rendered, JSON exports are merged into \
                  existing files, and whole briks can come from git repositories.",
    after_help = "EXAMPLES:\n\
        \x20 brikr boot 'templates/**/*' --data '{\"name\": \"my-project\"}'\n\
        \x20 brikr boot gh:brikr/linters --output .\n\
        \x20 brikr boot 'briks/node/**' --overwrite -v\n\
        \x20 brikr root templates/readme.md\n\
        \x20 brikr config",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile briks into the output directory.
    #[command(
        visible_alias = "b",
        about = "Boot briks into your project",
        after_help = "EXAMPLES:\n\
            \x20 brikr boot 'templates/**/*'\n\
            \x20 brikr boot gh:brikr/linters gh:brikr/ci\n\
            \x20 brikr boot 'templates/**' --output dist --overwrite\n\
            \x20 brikr boot 'templates/**' --data '{\"name\": \"demo\"}'"
    )]
    Boot(BootArgs),

    /// Print the root directory a path resolves to.
    #[command(
        about = "Resolve a path's brik root",
        after_help = "EXAMPLES:\n\
            \x20 brikr root templates/readme.md\n\
            \x20 brikr root 'templates/**/*'"
    )]
    Root(RootArgs),

    /// Print the resolved configuration cascade.
    #[command(
        about = "Show the resolved configuration",
        after_help = "EXAMPLES:\n\
            \x20 brikr config\n\
            \x20 brikr config --from packages/app\n\
            \x20 brikr config -c ./custom.brikrrc.json"
    )]
    Config(ConfigArgs),
}

// ── boot ──────────────────────────────────────────────────────────────────────

/// Arguments for `brikr boot`.
#[derive(Debug, Args)]
pub struct BootArgs {
    /// Briks to compile: paths, globs, or repository references
    /// (`gh:owner/repo`, `gh@owner/repo`, full git URLs).
    #[arg(value_name = "FILES", required = true, help = "Paths, globs, or repo references")]
    pub files: Vec<String>,

    /// Directory compiled files are written to.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Data context for template rendering, as inline JSON.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "JSON",
        help = "Template data as a JSON object"
    )]
    pub data: Option<String>,

    /// Additional globs to ignore.
    #[arg(long = "ignore", value_name = "GLOB", help = "Extra ignore globs")]
    pub ignore: Vec<String>,

    /// Overwrite existing output files (destructive).
    #[arg(long = "overwrite", help = "Overwrite existing files")]
    pub overwrite: bool,

    /// Treat files entries as literal paths, not globs.
    #[arg(long = "disable-globs", help = "Treat entries as literal paths")]
    pub disable_globs: bool,

    /// Report paths relative to the working directory.
    #[arg(long = "relative-paths", help = "Report relative paths")]
    pub relative_paths: bool,
}

// ── root ──────────────────────────────────────────────────────────────────────

/// Arguments for `brikr root`.
#[derive(Debug, Args)]
pub struct RootArgs {
    /// Path or glob to resolve.
    #[arg(value_name = "PATH", help = "Path or glob to resolve")]
    pub path: String,
}

// ── config ────────────────────────────────────────────────────────────────────

/// Arguments for `brikr config`.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Directory the upward config search starts from.
    #[arg(
        long = "from",
        value_name = "DIR",
        help = "Start the search here (default: cwd)"
    )]
    pub from: Option<PathBuf>,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_boot_command() {
        let cli = Cli::parse_from([
            "brikr",
            "boot",
            "templates/**/*",
            "--output",
            "dist",
            "--overwrite",
        ]);
        let Commands::Boot(args) = cli.command else {
            panic!("expected boot command");
        };
        assert_eq!(args.files, vec!["templates/**/*"]);
        assert_eq!(args.output, Some(PathBuf::from("dist")));
        assert!(args.overwrite);
    }

    #[test]
    fn boot_accepts_multiple_briks() {
        let cli = Cli::parse_from(["brikr", "boot", "gh:brikr/linters", "templates/**"]);
        let Commands::Boot(args) = cli.command else {
            panic!("expected boot command");
        };
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn boot_requires_files() {
        assert!(Cli::try_parse_from(["brikr", "boot"]).is_err());
    }

    #[test]
    fn boot_alias() {
        let cli = Cli::parse_from(["brikr", "b", "templates/**"]);
        assert!(matches!(cli.command, Commands::Boot(_)));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["brikr", "--quiet", "--verbose", "config"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_root_command() {
        let cli = Cli::parse_from(["brikr", "root", "templates/readme.md"]);
        let Commands::Root(args) = cli.command else {
            panic!("expected root command");
        };
        assert_eq!(args.path, "templates/readme.md");
    }
}
