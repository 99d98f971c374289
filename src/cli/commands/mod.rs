//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls into the library codec
//! 3. Formats and displays output
//!
//! Document text and JSON go to stdout; messages go through
//! [`crate::ui::output`] and respect `--quiet`.

mod completion;
mod parse;
mod render;
mod versions;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use parse::parse;
pub use render::{render, RenderOptions};
pub use versions::versions;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Render {
            project,
            metadata_version,
            extra_dependencies,
            allow_missing_license_files,
            output,
        } => render::render(
            ctx,
            &RenderOptions {
                project,
                metadata_version,
                extra_dependencies,
                allow_missing_license_files,
                output,
            },
        ),
        Command::Parse { file, pretty } => parse::parse(ctx, &file, pretty),
        Command::Versions => versions::versions(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
