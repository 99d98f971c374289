//! core::metadata
//!
//! The versioned core metadata codec.
//!
//! # Modules
//!
//! - [`version`] - Version table: capability flags and field plans
//! - [`fields`] - Per-attribute renderers
//! - [`writer`] - Drives the version table and renderers over a project
//! - [`parser`] - Inverse: document text back to a project model
//! - [`document`] - Header document type shared by writer and parser
//! - [`person`] - Author/maintainer list encoding
//! - [`marker`] - Environment marker text and extra clauses
//! - [`requirement`] - Requirement canonicalization
//! - [`license`] - License expression casing
//! - [`license_files`] - License file glob resolution
//! - [`dynamic`] - Dynamic field ↔ header tables
//!
//! # Versions
//!
//! Supported versions are `1.2`, `2.1`, `2.2`, `2.3` and `2.4`. Each is a
//! row in [`version::VERSION_TABLE`]; nothing dispatches on version beyond
//! reading that row.
//!
//! # Round trips
//!
//! Parsing a rendered document recovers name, version, dependencies,
//! optional dependencies and readme exactly. License and dynamic fields
//! are lossy across versions: `License` vs `License-Expression` depends on
//! the version, and `Dynamic` headers contract to every field that could
//! have produced them.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::{parse_core_metadata, CoreMetadataWriter};
//! use coremeta::core::project::ProjectMetadata;
//!
//! let mut project = ProjectMetadata::new("My.App", "0.1.0");
//! project.dependencies = vec!["foo==1".into(), "bar==5".into()];
//!
//! let text = CoreMetadataWriter::new(".").render(&project, "2.1").unwrap();
//! let parsed = parse_core_metadata(&text).unwrap();
//! assert_eq!(parsed.dependencies, ["bar==5", "foo==1"]);
//! ```

pub mod document;
pub mod dynamic;
pub mod error;
pub mod fields;
pub mod license;
pub mod license_files;
pub mod marker;
pub mod parser;
pub mod person;
pub mod requirement;
pub mod version;
pub mod writer;

pub use document::CoreMetadataDocument;
pub use error::MetadataError;
pub use license_files::{GlobResolver, LicenseFileResolver};
pub use parser::{parse_core_metadata, project_from_document};
pub use version::{MetadataVersion, LATEST_METADATA_VERSION};
pub use writer::CoreMetadataWriter;
