//! core::project
//!
//! The structured project model and its loader.
//!
//! [`ProjectMetadata`] is what the core metadata writer consumes and what
//! the parser produces. It is built once per render from the `[project]`
//! table of a `pyproject.toml` and never mutated while rendering.
//!
//! # Loading
//!
//! The loader accepts the shapes project configuration allows for
//! composite fields and flattens them into the model:
//!
//! - `readme = "README.md"` or `{ file = "...", content-type = "..." }` reads
//!   the file; `{ text = "...", content-type = "..." }` is taken as-is.
//!   Content type is inferred from `.md`/`.rst`/`.txt` when omitted.
//! - `license = "MIT"` is an expression; `{ text = "..." }` or
//!   `{ file = "..." }` is legacy free text.
//!
//! # Example
//!
//! ```
//! use coremeta::core::project::ProjectMetadata;
//! use std::path::Path;
//!
//! let toml = r#"
//! [project]
//! name = "My.App"
//! version = "0.1.0"
//! keywords = ["foo", "bar"]
//! "#;
//!
//! let project = ProjectMetadata::from_pyproject_str(toml, Path::new(".")).unwrap();
//! assert_eq!(project.name, "My.App");
//! assert_eq!(project.keywords, ["foo", "bar"]);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{License, Person, ProjectField, Readme, TypeError, UrlMap};

/// Errors from loading project configuration.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("no [project] table found")]
    MissingProjectTable,

    #[error("missing required project field: {0}")]
    MissingField(&'static str),

    #[error("invalid project value: {0}")]
    InvalidValue(String),

    #[error("type validation failed: {0}")]
    TypeError(#[from] TypeError),
}

/// Structured project metadata.
///
/// Serializes to the same key names project configuration uses; empty
/// collections and absent values are skipped, so a parsed document
/// serializes to exactly the keys it carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectMetadata {
    /// Distribution name (verbatim)
    pub name: String,

    /// Version string
    pub version: String,

    /// One-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Project URLs in declaration order
    #[serde(default, skip_serializing_if = "UrlMap::is_empty")]
    pub urls: UrlMap,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Person>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintainers: Vec<Person>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    /// Glob patterns before rendering; resolved relative paths after parsing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub license_files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,

    /// Requirement strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Extra name → requirement strings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub optional_dependencies: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<Readme>,

    /// Fields whose values are deferred to build time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic: Vec<ProjectField>,
}

impl ProjectMetadata {
    /// Create a model with only the required fields set.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Load the `[project]` table of a `pyproject.toml`.
    ///
    /// Relative `readme`/`license` file references resolve against the
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, has no
    /// `[project]` table, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let contents = fs::read_to_string(path).map_err(|e| ProjectError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_pyproject_str(&contents, root).map_err(|e| match e {
            ProjectError::ParseError { message, .. } => ProjectError::ParseError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Build the model from `pyproject.toml` contents.
    pub fn from_pyproject_str(contents: &str, root: &Path) -> Result<Self, ProjectError> {
        let pyproject: PyProject = toml::from_str(contents).map_err(|e| ProjectError::ParseError {
            path: PathBuf::from("pyproject.toml"),
            message: e.to_string(),
        })?;
        let raw = pyproject.project.ok_or(ProjectError::MissingProjectTable)?;
        raw.into_metadata(root)
    }

    /// Validate invariants the writer relies on.
    ///
    /// This checks that:
    /// - `name` and `version` are non-empty
    /// - every author and maintainer has a name or an email
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.name.trim().is_empty() {
            return Err(ProjectError::MissingField("name"));
        }
        if self.version.trim().is_empty() {
            return Err(ProjectError::MissingField("version"));
        }
        for person in self.authors.iter().chain(&self.maintainers) {
            person.validate()?;
        }
        Ok(())
    }
}

/// Top level of `pyproject.toml`; other tables are ignored.
#[derive(Debug, Deserialize)]
struct PyProject {
    project: Option<RawProject>,
}

/// `[project]` as written. Keys outside the model (scripts, entry points)
/// are accepted and dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawProject {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    readme: Option<RawReadme>,
    requires_python: Option<String>,
    license: Option<RawLicense>,
    #[serde(default)]
    license_files: Vec<String>,
    #[serde(default)]
    authors: Vec<Person>,
    #[serde(default)]
    maintainers: Vec<Person>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    classifiers: Vec<String>,
    #[serde(default)]
    urls: UrlMap,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    dynamic: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReadme {
    Path(String),
    Table {
        file: Option<String>,
        text: Option<String>,
        #[serde(rename = "content-type")]
        content_type: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLicense {
    Expression(String),
    Table {
        text: Option<String>,
        file: Option<String>,
    },
}

impl RawProject {
    fn into_metadata(self, root: &Path) -> Result<ProjectMetadata, ProjectError> {
        let dynamic = self
            .dynamic
            .iter()
            .map(|name| name.parse::<ProjectField>())
            .collect::<Result<Vec<_>, _>>()?;
        if dynamic.contains(&ProjectField::Name) {
            return Err(ProjectError::InvalidValue(
                "'name' cannot be dynamic".into(),
            ));
        }

        let readme = self.readme.map(|r| load_readme(r, root)).transpose()?;
        let license = self.license.map(|l| load_license(l, root)).transpose()?;

        let metadata = ProjectMetadata {
            name: self.name.ok_or(ProjectError::MissingField("name"))?,
            version: self.version.ok_or(ProjectError::MissingField("version"))?,
            description: self.description,
            urls: self.urls,
            authors: self.authors,
            maintainers: self.maintainers,
            license,
            license_files: self.license_files,
            keywords: self.keywords,
            classifiers: self.classifiers,
            requires_python: self.requires_python,
            dependencies: self.dependencies,
            optional_dependencies: self.optional_dependencies,
            readme,
            dynamic,
        };
        metadata.validate()?;
        Ok(metadata)
    }
}

fn load_readme(raw: RawReadme, root: &Path) -> Result<Readme, ProjectError> {
    match raw {
        RawReadme::Path(file) => {
            let text = read_relative(root, &file)?;
            Ok(Readme {
                content_type: Some(infer_content_type(&file)?.to_string()),
                text,
            })
        }
        RawReadme::Table {
            file,
            text,
            content_type,
        } => match (file, text) {
            (Some(file), None) => {
                let content_type = match content_type {
                    Some(ct) => ct,
                    None => infer_content_type(&file)?.to_string(),
                };
                Ok(Readme {
                    content_type: Some(content_type),
                    text: read_relative(root, &file)?,
                })
            }
            (None, Some(text)) => Ok(Readme {
                content_type,
                text,
            }),
            _ => Err(ProjectError::InvalidValue(
                "readme table needs exactly one of 'file' or 'text'".into(),
            )),
        },
    }
}

fn load_license(raw: RawLicense, root: &Path) -> Result<License, ProjectError> {
    match raw {
        RawLicense::Expression(expr) => Ok(License::Expression(expr)),
        RawLicense::Table {
            text: Some(text),
            file: None,
        } => Ok(License::Text { text }),
        RawLicense::Table {
            text: None,
            file: Some(file),
        } => Ok(License::Text {
            text: read_relative(root, &file)?,
        }),
        RawLicense::Table { .. } => Err(ProjectError::InvalidValue(
            "license table needs exactly one of 'file' or 'text'".into(),
        )),
    }
}

/// Content type for a readme file, by extension.
fn infer_content_type(file: &str) -> Result<&'static str, ProjectError> {
    let lower = file.to_ascii_lowercase();
    if lower.ends_with(".md") {
        Ok("text/markdown")
    } else if lower.ends_with(".rst") {
        Ok("text/x-rst")
    } else if lower.ends_with(".txt") {
        Ok("text/plain")
    } else {
        Err(ProjectError::InvalidValue(format!(
            "cannot infer readme content type for '{file}'"
        )))
    }
}

fn read_relative(root: &Path, file: &str) -> Result<String, ProjectError> {
    let path = root.join(file);
    fs::read_to_string(&path).map_err(|e| ProjectError::ReadError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(toml: &str) -> Result<ProjectMetadata, ProjectError> {
        ProjectMetadata::from_pyproject_str(toml, Path::new("."))
    }

    mod from_pyproject_str {
        use super::*;

        #[test]
        fn minimal() {
            let project = load("[project]\nname = \"My.App\"\nversion = \"0.1.0\"\n").unwrap();
            assert_eq!(project, ProjectMetadata::new("My.App", "0.1.0"));
        }

        #[test]
        fn missing_project_table() {
            let result = load("[tool.other]\nx = 1\n");
            assert!(matches!(result, Err(ProjectError::MissingProjectTable)));
        }

        #[test]
        fn missing_version() {
            let result = load("[project]\nname = \"foo\"\n");
            assert!(matches!(result, Err(ProjectError::MissingField("version"))));
        }

        #[test]
        fn malformed_toml() {
            let result = load("[project\n");
            assert!(matches!(result, Err(ProjectError::ParseError { .. })));
        }

        #[test]
        fn urls_keep_declaration_order() {
            let project = load(
                r#"
                [project]
                name = "a"
                version = "1"
                [project.urls]
                foo = "bar"
                bar = "baz"
                "#,
            )
            .unwrap();
            let labels: Vec<_> = project.urls.iter().map(|(l, _)| l).collect();
            assert_eq!(labels, ["foo", "bar"]);
        }

        #[test]
        fn license_forms() {
            let expr = load("[project]\nname = \"a\"\nversion = \"1\"\nlicense = \"mit\"\n").unwrap();
            assert_eq!(expr.license, Some(License::expression("mit")));

            let text = load(
                "[project]\nname = \"a\"\nversion = \"1\"\nlicense = { text = \"foo\" }\n",
            )
            .unwrap();
            assert_eq!(text.license, Some(License::text("foo")));
        }

        #[test]
        fn dynamic_names_validated() {
            let ok = load(
                "[project]\nname = \"a\"\nversion = \"1\"\ndynamic = [\"authors\", \"classifiers\"]\n",
            )
            .unwrap();
            assert_eq!(
                ok.dynamic,
                [ProjectField::Authors, ProjectField::Classifiers]
            );

            let bad = load("[project]\nname = \"a\"\nversion = \"1\"\ndynamic = [\"bogus\"]\n");
            assert!(matches!(bad, Err(ProjectError::TypeError(_))));

            let name = load("[project]\nname = \"a\"\nversion = \"1\"\ndynamic = [\"name\"]\n");
            assert!(matches!(name, Err(ProjectError::InvalidValue(_))));
        }

        #[test]
        fn empty_person_rejected() {
            let result = load("[project]\nname = \"a\"\nversion = \"1\"\nauthors = [{}]\n");
            assert!(matches!(result, Err(ProjectError::TypeError(TypeError::EmptyPerson))));
        }

        #[test]
        fn unmodelled_keys_ignored() {
            let project = load(
                "[project]\nname = \"a\"\nversion = \"1\"\n[project.scripts]\na = \"a:main\"\n",
            )
            .unwrap();
            assert_eq!(project.name, "a");
        }
    }

    mod readme_files {
        use super::*;

        #[test]
        fn path_infers_markdown() {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join("README.md"), "# hello\n").unwrap();

            let project = ProjectMetadata::from_pyproject_str(
                "[project]\nname = \"a\"\nversion = \"1\"\nreadme = \"README.md\"\n",
                temp.path(),
            )
            .unwrap();

            assert_eq!(project.readme, Some(Readme::new("text/markdown", "# hello\n")));
        }

        #[test]
        fn table_with_text() {
            let project = load(
                "[project]\nname = \"a\"\nversion = \"1\"\nreadme = { text = \"hi\", content-type = \"text/x-rst\" }\n",
            )
            .unwrap();
            assert_eq!(project.readme, Some(Readme::new("text/x-rst", "hi")));
        }

        #[test]
        fn unknown_extension_rejected() {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join("README.adoc"), "x").unwrap();

            let result = ProjectMetadata::from_pyproject_str(
                "[project]\nname = \"a\"\nversion = \"1\"\nreadme = \"README.adoc\"\n",
                temp.path(),
            );
            assert!(matches!(result, Err(ProjectError::InvalidValue(_))));
        }

        #[test]
        fn license_file_read_as_text() {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join("LICENSE"), "foo\nbar").unwrap();

            let project = ProjectMetadata::from_pyproject_str(
                "[project]\nname = \"a\"\nversion = \"1\"\nlicense = { file = \"LICENSE\" }\n",
                temp.path(),
            )
            .unwrap();
            assert_eq!(project.license, Some(License::text("foo\nbar")));
        }

        #[test]
        fn load_reports_missing_file() {
            let temp = TempDir::new().unwrap();
            let result = ProjectMetadata::load(&temp.path().join("pyproject.toml"));
            assert!(matches!(result, Err(ProjectError::ReadError { .. })));
        }
    }
}
