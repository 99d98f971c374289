//! core
//!
//! Domain types, configuration, and the core metadata codec.
//!
//! # Modules
//!
//! - [`types`] - Value types: Person, License, Readme, UrlMap, ProjectField
//! - [`project`] - The project model and its `pyproject.toml` loader
//! - [`metadata`] - Versioned rendering and parsing of metadata documents
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod metadata;
pub mod project;
pub mod types;
