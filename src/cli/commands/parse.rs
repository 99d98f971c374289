//! parse command - Parse a core metadata document into JSON

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::metadata::parse_core_metadata;
use crate::ui::output;

/// Parse the document at `file` (or stdin for `-`) and print it as JSON.
pub fn parse(ctx: &Context, file: &Path, pretty: bool) -> Result<()> {
    let text = if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        let path = ctx.resolve(file);
        fs::read_to_string(&path).with_context(|| format!("failed to read '{}'", path.display()))?
    };
    output::debug(format!("parsing {} bytes", text.len()), ctx.verbosity);

    let project = parse_core_metadata(&text)?;
    let json = if pretty {
        serde_json::to_string_pretty(&project)?
    } else {
        serde_json::to_string(&project)?
    };
    println!("{json}");

    Ok(())
}
