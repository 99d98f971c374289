//! core::metadata::fields
//!
//! Per-attribute renderers.
//!
//! Each function turns one project attribute into zero or more headers
//! on a [`CoreMetadataDocument`]. They are pure: everything that touches
//! the filesystem (license file resolution) happens before, in the writer,
//! and arrives through [`RenderContext`].
//!
//! # Ordering
//!
//! - Keywords: sorted, joined with `,`
//! - Classifiers: sorted with numeric runs compared by value
//! - Requires-Python: clauses sorted, joined with `,`
//! - Dependencies: sorted by canonical requirement text
//! - Extras: sorted by name, each extra's requirements sorted
//!
//! Repeated values are dropped after canonicalization.

use std::cmp::Ordering;

use crate::core::project::ProjectMetadata;
use crate::core::types::{License, Person, ProjectField};

use super::document::CoreMetadataDocument;
use super::dynamic::core_headers;
use super::error::MetadataError;
use super::license::normalize_expression;
use super::person::{self, PersonHeader};
use super::requirement::{sort_clauses, Requirement};
use super::version::{Field, VersionSpec};

/// Inputs to rendering that do not come from the project model.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub spec: &'static VersionSpec,
    /// License files already resolved against the project root
    pub license_files: &'a [String],
    /// Requirements appended after the project's own dependencies
    pub extra_dependencies: &'a [String],
}

/// Render one plan slot.
pub fn render_field(
    field: Field,
    project: &ProjectMetadata,
    ctx: &RenderContext<'_>,
    doc: &mut CoreMetadataDocument,
) -> Result<(), MetadataError> {
    match field {
        Field::Name => doc.push("Name", &project.name),
        Field::Version => doc.push("Version", &project.version),
        Field::Dynamic => render_dynamic(project, ctx.spec, doc),
        Field::Summary => {
            if let Some(description) = &project.description {
                doc.push("Summary", description);
            }
        }
        Field::ProjectUrl => {
            for (label, url) in project.urls.iter() {
                doc.push("Project-URL", format!("{label}, {url}"));
            }
        }
        Field::Author => render_people(&project.authors, "Author", doc),
        Field::Maintainer => render_people(&project.maintainers, "Maintainer", doc),
        Field::License => render_license(project.license.as_ref(), ctx.spec, doc),
        Field::LicenseFile => {
            for path in ctx.license_files {
                doc.push("License-File", path);
            }
        }
        Field::Keywords => {
            let mut keywords = project.keywords.clone();
            keywords.sort();
            keywords.dedup();
            if !keywords.is_empty() {
                doc.push("Keywords", keywords.join(","));
            }
        }
        Field::Classifier => {
            let mut classifiers = project.classifiers.clone();
            classifiers.sort_by(|a, b| classifier_cmp(a, b));
            classifiers.dedup();
            for classifier in classifiers {
                doc.push("Classifier", classifier);
            }
        }
        Field::RequiresPython => {
            if let Some(spec) = &project.requires_python {
                doc.push("Requires-Python", sort_clauses(spec));
            }
        }
        Field::RequiresDist => {
            render_dependencies(&project.dependencies, ctx.extra_dependencies, doc)?
        }
        Field::OptionalDependencies => render_optional_dependencies(project, ctx.spec, doc)?,
        Field::Readme => {
            if let Some(readme) = &project.readme {
                if ctx.spec.capabilities.description_content_type {
                    doc.push("Description-Content-Type", readme.content_type_or_default());
                }
                doc.set_body(&readme.text);
            }
        }
    }
    Ok(())
}

/// `Dynamic` lines in declaration order, each field expanded in table
/// order. Headers the version cannot write are skipped, as are `name`
/// and `version`, which are always static.
fn render_dynamic(project: &ProjectMetadata, spec: &VersionSpec, doc: &mut CoreMetadataDocument) {
    let mut emitted: Vec<&str> = Vec::new();
    for field in &project.dynamic {
        if matches!(field, ProjectField::Name | ProjectField::Version) {
            continue;
        }
        for header in core_headers(*field) {
            if spec.supports_header(header) && !emitted.contains(header) {
                emitted.push(header);
                doc.push("Dynamic", *header);
            }
        }
    }
}

fn render_people(people: &[Person], header: &str, doc: &mut CoreMetadataDocument) {
    match person::encode(people) {
        Some((PersonHeader::Plain, value)) => doc.push(header, value),
        Some((PersonHeader::Email, value)) => doc.push(format!("{header}-email"), value),
        None => {}
    }
}

fn render_license(license: Option<&License>, spec: &VersionSpec, doc: &mut CoreMetadataDocument) {
    match license {
        Some(License::Text { text }) => doc.push("License", text.trim_end_matches(['\r', '\n'])),
        Some(License::Expression(expr)) => {
            let header = if spec.capabilities.license_expression {
                "License-Expression"
            } else {
                "License"
            };
            doc.push(header, normalize_expression(expr));
        }
        None => {}
    }
}

fn render_dependencies(
    dependencies: &[String],
    extra: &[String],
    doc: &mut CoreMetadataDocument,
) -> Result<(), MetadataError> {
    let mut lines = canonical_requirements(dependencies)?
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    for text in extra {
        let line = parse_requirement(text)?.to_string();
        if !lines.contains(&line) {
            lines.push(line);
        }
    }

    for line in lines {
        doc.push("Requires-Dist", line);
    }
    Ok(())
}

fn render_optional_dependencies(
    project: &ProjectMetadata,
    spec: &VersionSpec,
    doc: &mut CoreMetadataDocument,
) -> Result<(), MetadataError> {
    // BTreeMap iteration is already sorted by extra name
    for (extra, requirements) in &project.optional_dependencies {
        if spec.capabilities.provides_extra {
            doc.push("Provides-Extra", extra);
        }
        for requirement in canonical_requirements(requirements)? {
            doc.push("Requires-Dist", requirement.with_extra(extra));
        }
    }
    Ok(())
}

/// Parse, sort by canonical text, and de-duplicate.
fn canonical_requirements(texts: &[String]) -> Result<Vec<Requirement>, MetadataError> {
    let mut requirements = texts
        .iter()
        .map(|text| parse_requirement(text))
        .collect::<Result<Vec<_>, _>>()?;
    requirements.sort_by_cached_key(ToString::to_string);
    requirements.dedup();
    Ok(requirements)
}

fn parse_requirement(text: &str) -> Result<Requirement, MetadataError> {
    text.parse::<Requirement>()
        .map_err(|e| MetadataError::malformed("Requires-Dist", format!("{text} ({e})")))
}

/// Compare classifiers with digit runs ordered by numeric value, so
/// `Python :: 3.9` sorts before `Python :: 3.11`.
pub fn classifier_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks(a);
    let mut right = Chunks(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_digits(x), is_digits(y)) {
                    (true, true) => cmp_numeric(x, y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digits(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit())
}

fn cmp_numeric(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Alternating runs of ASCII digits and everything else.
struct Chunks<'a>(&'a str);

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.0.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = self
            .0
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(self.0.len());
        let (chunk, rest) = self.0.split_at(end);
        self.0 = rest;
        Some(chunk)
    }
}
