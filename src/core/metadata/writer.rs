//! core::metadata::writer
//!
//! Renders a [`ProjectMetadata`] as a core metadata document.
//!
//! The writer looks up the requested version in the version table,
//! resolves license files, then walks the version's field plan with the
//! shared renderers. Output is a fresh document per call.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::writer::CoreMetadataWriter;
//! use coremeta::core::project::ProjectMetadata;
//!
//! let mut project = ProjectMetadata::new("My.App", "0.1.0");
//! project.keywords = vec!["foo".into(), "bar".into()];
//!
//! let text = CoreMetadataWriter::new(".").render(&project, "2.1").unwrap();
//! assert_eq!(
//!     text,
//!     "Metadata-Version: 2.1\nName: My.App\nVersion: 0.1.0\nKeywords: bar,foo\n"
//! );
//! ```

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::project::ProjectMetadata;

use super::document::CoreMetadataDocument;
use super::error::MetadataError;
use super::fields::{render_field, RenderContext};
use super::license_files::{GlobResolver, LicenseFileResolver};
use super::version::MetadataVersion;

/// Builds core metadata documents for a project root.
pub struct CoreMetadataWriter {
    root: PathBuf,
    resolver: Box<dyn LicenseFileResolver>,
    extra_dependencies: Vec<String>,
    strict_license_files: bool,
}

impl CoreMetadataWriter {
    /// Create a writer resolving license files under `root` with
    /// [`GlobResolver`]. Unmatched license-file patterns are errors.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            resolver: Box::new(GlobResolver),
            extra_dependencies: Vec::new(),
            strict_license_files: true,
        }
    }

    /// Use a different license-file resolver.
    pub fn with_resolver(mut self, resolver: Box<dyn LicenseFileResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Requirements appended after the project's own dependencies.
    pub fn extra_dependencies(mut self, requirements: Vec<String>) -> Self {
        self.extra_dependencies = requirements;
        self
    }

    /// When false, a license-file pattern with no matches is logged and
    /// skipped instead of failing the render.
    pub fn strict_license_files(mut self, strict: bool) -> Self {
        self.strict_license_files = strict;
        self
    }

    /// Render `project` for the version identified by `version`.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::UnsupportedVersion`] for an unknown identifier
    /// - [`MetadataError::MalformedField`] for an unparseable requirement
    /// - license-file resolution errors
    pub fn render(&self, project: &ProjectMetadata, version: &str) -> Result<String, MetadataError> {
        let version: MetadataVersion = version.parse()?;
        Ok(self.render_document(project, version)?.to_string())
    }

    /// Render `project` into a document for `version`.
    pub fn render_document(
        &self,
        project: &ProjectMetadata,
        version: MetadataVersion,
    ) -> Result<CoreMetadataDocument, MetadataError> {
        let spec = version.spec();
        debug!(name = %project.name, version = %version, "rendering core metadata");

        if project.name.is_empty() {
            return Err(MetadataError::MissingRequiredField("Name"));
        }
        if project.version.is_empty() {
            return Err(MetadataError::MissingRequiredField("Version"));
        }

        let license_files = if spec.capabilities.license_files {
            self.resolve_license_files(&project.license_files)?
        } else {
            Vec::new()
        };
        let ctx = RenderContext {
            spec,
            license_files: &license_files,
            extra_dependencies: &self.extra_dependencies,
        };

        let mut doc = CoreMetadataDocument::new();
        doc.push("Metadata-Version", spec.id);
        for field in spec.plan {
            render_field(*field, project, &ctx, &mut doc)?;
        }

        debug!(headers = doc.headers().count(), "rendered core metadata");
        Ok(doc)
    }

    /// Resolve every pattern, then sort and de-duplicate the union.
    fn resolve_license_files(&self, patterns: &[String]) -> Result<Vec<String>, MetadataError> {
        let mut paths = Vec::new();
        for pattern in patterns {
            let matched = self.resolver.resolve_pattern(pattern, &self.root)?;
            if matched.is_empty() {
                if self.strict_license_files {
                    return Err(MetadataError::UnresolvableLicenseFile {
                        pattern: pattern.clone(),
                    });
                }
                warn!(%pattern, "license file pattern matched no files");
                continue;
            }
            debug!(%pattern, count = matched.len(), "resolved license files");
            paths.extend(matched);
        }
        paths.sort();
        paths.dedup();
        Ok(paths)
    }
}

impl std::fmt::Debug for CoreMetadataWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreMetadataWriter")
            .field("root", &self.root)
            .field("extra_dependencies", &self.extra_dependencies)
            .field("strict_license_files", &self.strict_license_files)
            .finish_non_exhaustive()
    }
}
