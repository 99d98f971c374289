//! core::metadata::license_files
//!
//! Resolution of `license-files` glob patterns.
//!
//! The writer depends only on [`LicenseFileResolver`]; [`GlobResolver`]
//! is the filesystem-backed implementation. Results are paths relative
//! to the project root using `/` separators.

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use super::error::MetadataError;

/// Expands one license-file pattern into relative paths.
pub trait LicenseFileResolver: Send + Sync {
    /// Resolve `pattern` against `root`.
    ///
    /// An empty result is not an error here; the writer decides what a
    /// pattern without matches means.
    fn resolve_pattern(&self, pattern: &str, root: &Path) -> Result<Vec<String>, MetadataError>;
}

/// Resolves patterns with the `glob` crate. Directories are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobResolver;

impl LicenseFileResolver for GlobResolver {
    fn resolve_pattern(&self, pattern: &str, root: &Path) -> Result<Vec<String>, MetadataError> {
        let invalid = |message: String| MetadataError::InvalidLicensePattern {
            pattern: pattern.to_string(),
            message,
        };

        if Path::new(pattern).is_absolute() || pattern.split('/').any(|part| part == "..") {
            return Err(invalid("must be relative to the project root".into()));
        }
        Pattern::new(pattern).map_err(|e| invalid(e.to_string()))?;

        let full = format!("{}/{}", Pattern::escape(&root.to_string_lossy()), pattern);
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let entries = glob::glob_with(&full, options).map_err(|e| invalid(e.to_string()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| MetadataError::LicenseFileIo {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(&path);
            paths.push(to_slash(relative));
        }
        Ok(paths)
    }
}

/// Join path components with `/`.
fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        temp
    }

    #[test]
    fn matches_files_relative_to_root() {
        let temp = tree(&["LICENSES/MIT.txt", "LICENSES/Apache-2.0.txt", "README.md"]);
        let mut paths = GlobResolver.resolve_pattern("LICENSES/*", temp.path()).unwrap();
        paths.sort();
        assert_eq!(paths, ["LICENSES/Apache-2.0.txt", "LICENSES/MIT.txt"]);
    }

    #[test]
    fn directories_skipped() {
        let temp = tree(&["LICENSES/sub/x.txt", "LICENSE"]);
        let mut paths = GlobResolver.resolve_pattern("LICENSE*", temp.path()).unwrap();
        paths.sort();
        assert_eq!(paths, ["LICENSE"]);
    }

    #[test]
    fn no_match_is_empty() {
        let temp = tree(&["README.md"]);
        assert!(GlobResolver
            .resolve_pattern("LICENSE*", temp.path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn root_with_glob_characters() {
        let temp = tree(&["weird[dir]/LICENSE"]);
        let root = temp.path().join("weird[dir]");
        assert_eq!(
            GlobResolver.resolve_pattern("LICENSE", &root).unwrap(),
            ["LICENSE"]
        );
    }

    #[test]
    fn invalid_patterns() {
        let temp = tree(&[]);
        for pattern in ["[", "/etc/passwd", "../LICENSE"] {
            assert!(matches!(
                GlobResolver.resolve_pattern(pattern, temp.path()),
                Err(MetadataError::InvalidLicensePattern { .. })
            ));
        }
    }
}
