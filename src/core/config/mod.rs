//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! coremeta has two configuration scopes:
//! - **Global**: User-level defaults
//! - **Project**: Per-project overrides next to `pyproject.toml`
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$COREMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/coremeta/config.toml`
//! 3. `~/.coremeta/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use coremeta::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! println!("Version: {}", config.metadata_version());
//! println!("Strict: {}", config.strict_license_files());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::metadata::{MetadataVersion, LATEST_METADATA_VERSION};

/// File name of the project config, relative to the project root.
pub const PROJECT_CONFIG_FILE: &str = ".coremeta.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: project config overrides global config,
/// which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if present)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_root` is provided, also loads the project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or
    /// fail validation. Missing files are not an error.
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let global_path = Self::global_config_candidates()
            .into_iter()
            .find(|path| path.exists());
        Self::load_from(global_path.as_deref(), project_root)
    }

    /// Load configuration from an explicit global config path.
    pub fn load_from(
        global_path: Option<&Path>,
        project_root: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let global = match global_path {
            Some(path) => read_config::<GlobalConfig>(path)?,
            None => GlobalConfig::default(),
        };

        let project_path = project_root
            .map(|root| root.join(PROJECT_CONFIG_FILE))
            .filter(|path| path.exists());
        let project = project_path
            .as_deref()
            .map(read_config::<ProjectConfig>)
            .transpose()?;

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Config {
            global,
            project,
            global_path: global_path.map(Path::to_path_buf),
            project_path,
        })
    }

    /// Global config locations, most specific first.
    fn global_config_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("COREMETA_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("coremeta/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".coremeta/config.toml"));
        }
        candidates
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Version rendered when the caller does not ask for one.
    ///
    /// Defaults to the latest supported version. Values were validated on
    /// load.
    pub fn metadata_version(&self) -> MetadataVersion {
        self.project
            .as_ref()
            .and_then(|p| p.metadata_version.as_deref())
            .or(self.global.metadata_version.as_deref())
            .and_then(|v| v.parse().ok())
            .unwrap_or(LATEST_METADATA_VERSION)
    }

    /// Whether unmatched license-file patterns fail the render.
    ///
    /// Defaults to `true` if not configured.
    pub fn strict_license_files(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.strict_license_files)
            .or(self.global.strict_license_files)
            .unwrap_or(true)
    }

    /// Extra runtime dependencies from the project config.
    pub fn extra_dependencies(&self) -> &[String] {
        self.project
            .as_ref()
            .and_then(|p| p.extra_dependencies.as_deref())
            .unwrap_or(&[])
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
