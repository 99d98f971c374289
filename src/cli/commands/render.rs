//! render command - Render core metadata for a project
//!
//! Flags override configuration: `--metadata-version` replaces the
//! configured version, `--extra-dependency` values are appended after the
//! configured extra dependencies, and `--allow-missing-license-files`
//! turns strictness off.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::metadata::{CoreMetadataWriter, MetadataVersion};
use crate::core::project::ProjectMetadata;
use crate::ui::output;

/// Arguments of the render command.
#[derive(Debug, Default)]
pub struct RenderOptions {
    pub project: Option<PathBuf>,
    pub metadata_version: Option<String>,
    pub extra_dependencies: Vec<String>,
    pub allow_missing_license_files: bool,
    pub output: Option<PathBuf>,
}

/// Render core metadata for the project and write it out.
pub fn render(ctx: &Context, opts: &RenderOptions) -> Result<()> {
    let pyproject = ctx.resolve(
        opts.project
            .as_deref()
            .unwrap_or_else(|| Path::new("pyproject.toml")),
    );
    let root = pyproject
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| ctx.cwd.clone());

    let config = Config::load(Some(root.as_path())).context("failed to load configuration")?;
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), ctx.verbosity);
    }
    if let Some(path) = config.project_config_loaded_from() {
        output::debug(format!("project config: {}", path.display()), ctx.verbosity);
    }

    let version = match &opts.metadata_version {
        Some(id) => id.parse::<MetadataVersion>()?,
        None => config.metadata_version(),
    };

    let project = ProjectMetadata::load(&pyproject)
        .with_context(|| format!("failed to load project from '{}'", pyproject.display()))?;
    output::debug(
        format!("rendering {} {} as {}", project.name, project.version, version),
        ctx.verbosity,
    );

    let mut extra_dependencies = config.extra_dependencies().to_vec();
    extra_dependencies.extend(opts.extra_dependencies.iter().cloned());

    let document = CoreMetadataWriter::new(&root)
        .extra_dependencies(extra_dependencies)
        .strict_license_files(config.strict_license_files() && !opts.allow_missing_license_files)
        .render_document(&project, version)?;
    let text = document.to_string();

    match &opts.output {
        Some(path) => {
            let path = ctx.resolve(path);
            fs::write(&path, &text)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            output::success(
                format!("Wrote metadata {} to {}", version, path.display()),
                ctx.verbosity,
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}
