//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// coremeta - Render and parse versioned package core metadata
#[derive(Parser, Debug)]
#[command(name = "coremeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if coremeta was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render core metadata for a project
    #[command(
        name = "render",
        long_about = "Render core metadata for a project.\n\n\
            Reads the [project] table of a pyproject.toml and writes the core metadata \
            document for the requested metadata version. Header order, sorting and \
            quoting are fixed per version, so the output is byte-for-byte reproducible.\n\n\
            The version defaults to the configured metadata_version, or the latest \
            supported version when none is configured.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Render PKG-INFO for the project in the current directory
    coremeta render

    # Render an older metadata version into a file
    coremeta render --metadata-version 2.1 --output PKG-INFO

    # Inject a build-time runtime dependency
    coremeta render --extra-dependency 'editables~=0.3'

    # Render for another project
    coremeta render --project ../other/pyproject.toml"
    )]
    Render {
        /// Path to pyproject.toml (default: ./pyproject.toml)
        #[arg(long, value_name = "PATH")]
        project: Option<PathBuf>,

        /// Metadata version to render (1.2, 2.1, 2.2, 2.3, 2.4)
        #[arg(long, value_name = "VERSION")]
        metadata_version: Option<String>,

        /// Additional runtime requirement, appended after dependencies
        #[arg(long = "extra-dependency", value_name = "REQUIREMENT")]
        extra_dependencies: Vec<String>,

        /// Warn instead of failing when a license-files pattern matches nothing
        #[arg(long)]
        allow_missing_license_files: bool,

        /// Write the document to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Parse a core metadata document into JSON
    #[command(
        name = "parse",
        long_about = "Parse a core metadata document into JSON.\n\n\
            Reads a PKG-INFO or METADATA document and prints the reconstructed \
            project fields as JSON, using the same keys as the [project] table. \
            Only fields present in the document are included.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Inspect a PKG-INFO file
    coremeta parse PKG-INFO --pretty

    # Read from stdin
    coremeta render | coremeta parse -"
    )]
    Parse {
        /// Document to parse, or '-' for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List supported metadata versions and what each can express
    #[command(name = "versions")]
    Versions,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for coremeta commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    coremeta completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    coremeta completion zsh >> ~/.zshrc

    # Fish
    coremeta completion fish > ~/.config/fish/completions/coremeta.fish

    # PowerShell
    coremeta completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
