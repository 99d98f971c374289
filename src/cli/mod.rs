//! cli
//!
//! Command-line interface layer for coremeta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and apply flag overrides
//! - Delegate to the library codec and format its output
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds a
//! [`Context`], and dispatches to a handler in [`commands`]. Rendering and
//! parsing live in [`crate::core::metadata`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::ui::output::Verbosity;

/// Per-invocation settings derived from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory commands resolve relative paths against
    pub cwd: PathBuf,
    pub verbosity: Verbosity,
}

impl Context {
    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`, after logging is
/// set up from the same parsed flags.
pub fn run(cli: Cli) -> Result<()> {
    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let ctx = Context {
        cwd,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}
