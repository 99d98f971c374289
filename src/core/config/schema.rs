//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$COREMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/coremeta/config.toml`
//! 3. `~/.coremeta/config.toml`
//!
//! # Project Config
//!
//! Located at `.coremeta.toml` in the project root.
//!
//! # Validation
//!
//! Values are validated after parsing: metadata versions must be in the
//! version table and extra dependencies must be valid requirements.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::metadata::requirement::Requirement;
use crate::core::metadata::MetadataVersion;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// metadata_version = "2.4"
/// strict_license_files = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Version rendered when none is requested
    pub metadata_version: Option<String>,

    /// Fail when a license-file pattern matches nothing
    pub strict_license_files: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_version(self.metadata_version.as_deref())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// metadata_version = "2.1"
/// extra_dependencies = ["typing-extensions>=4"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Overrides the global default version
    pub metadata_version: Option<String>,

    /// Overrides the global strictness
    pub strict_license_files: Option<bool>,

    /// Requirements appended to the project's dependencies
    pub extra_dependencies: Option<Vec<String>>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_version(self.metadata_version.as_deref())?;

        for requirement in self.extra_dependencies.iter().flatten() {
            requirement.parse::<Requirement>().map_err(|e| {
                ConfigError::InvalidValue(format!(
                    "invalid extra dependency '{requirement}': {e}"
                ))
            })?;
        }
        Ok(())
    }
}

fn validate_version(version: Option<&str>) -> Result<(), ConfigError> {
    if let Some(version) = version {
        version
            .parse::<MetadataVersion>()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.metadata_version.is_none());
            assert!(config.strict_license_files.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn valid_version() {
            let config = GlobalConfig {
                metadata_version: Some("2.2".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn invalid_version() {
            let config = GlobalConfig {
                metadata_version: Some("1.0".to_string()),
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("unsupported metadata version '1.0'"));
        }

        #[test]
        fn roundtrip() {
            let config = GlobalConfig {
                metadata_version: Some("2.4".to_string()),
                strict_license_files: Some(false),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: GlobalConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }
    }

    mod project_config {
        use super::*;

        #[test]
        fn valid_extra_dependencies() {
            let config = ProjectConfig {
                extra_dependencies: Some(vec!["baz==9".to_string()]),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn invalid_extra_dependency() {
            let config = ProjectConfig {
                extra_dependencies: Some(vec!["baz nine".to_string()]),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                metadata_version = "2.1"
                unknown_field = true
            "#;

            let result: Result<ProjectConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }
}
