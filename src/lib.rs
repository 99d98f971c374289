//! coremeta - Render and parse Python core metadata documents
//!
//! coremeta turns a project's `[project]` table into the `METADATA` /
//! `PKG-INFO` document of a chosen core metadata version (1.2 through
//! 2.4), and parses such documents back into the same project model.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to core)
//! - [`core`] - Project model, configuration, and the metadata codec
//! - [`ui`] - User-facing message output
//!
//! # Guarantees
//!
//! 1. Rendering is deterministic: the same project and version produce
//!    byte-identical documents
//! 2. `Metadata-Version`, `Name` and `Version` always lead the document
//! 3. Parsing a rendered document yields the project it was rendered from,
//!    up to normalization

pub mod cli;
pub mod core;
pub mod ui;
