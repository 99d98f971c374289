//! core::metadata::parser
//!
//! Reconstructs a [`ProjectMetadata`] from a core metadata document.
//!
//! # Decoding
//!
//! - `Name` and `Version` are required, checked in that order
//! - `Dynamic` values contract to project fields, sorted and de-duplicated
//! - `Author` and `Author-email` decode separately; plain entries first
//! - `Requires-Dist` lines carrying an `extra == '<name>'` clause are filed
//!   under that extra with the clause removed
//! - the body, or a legacy `Description` header, becomes the readme
//! - `License-Expression` wins over `License`
//!
//! Headers with no project counterpart (including `Metadata-Version`)
//! are ignored.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::parser::parse_core_metadata;
//!
//! let text = "\
//! Metadata-Version: 2.4
//! Name: My.App
//! Version: 0.1.0
//! Dynamic: Classifier
//! Dynamic: Provides-Extra
//! ";
//! let project = parse_core_metadata(text).unwrap();
//! let dynamic: Vec<_> = project.dynamic.iter().map(|f| f.as_str()).collect();
//! assert_eq!(dynamic, ["classifiers", "dependencies", "optional-dependencies"]);
//! ```

use tracing::debug;

use crate::core::project::ProjectMetadata;
use crate::core::types::{License, Person, Readme, DEFAULT_README_CONTENT_TYPE};

use super::document::CoreMetadataDocument;
use super::dynamic::project_fields;
use super::error::MetadataError;
use super::person;
use super::requirement::Requirement;

/// Parse document text into a project model.
///
/// # Errors
///
/// - [`MetadataError::MissingRequiredField`] when `Name` or `Version` is absent
/// - [`MetadataError::MalformedField`] when a header or composite value
///   cannot be decoded
pub fn parse_core_metadata(text: &str) -> Result<ProjectMetadata, MetadataError> {
    let doc = CoreMetadataDocument::parse(text)?;
    project_from_document(&doc)
}

/// Build a project model from an already-split document.
pub fn project_from_document(doc: &CoreMetadataDocument) -> Result<ProjectMetadata, MetadataError> {
    let name = doc
        .get("Name")
        .ok_or(MetadataError::MissingRequiredField("Name"))?;
    let version = doc
        .get("Version")
        .ok_or(MetadataError::MissingRequiredField("Version"))?;
    let mut project = ProjectMetadata::new(name, version);

    let mut author_names = Vec::new();
    let mut author_emails = Vec::new();
    let mut maintainer_names = Vec::new();
    let mut maintainer_emails = Vec::new();
    let mut license_text: Option<String> = None;
    let mut license_expression: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut legacy_description: Option<String> = None;

    for (header, value) in doc.headers() {
        match header.to_ascii_lowercase().as_str() {
            "metadata-version" | "name" | "version" => {}
            "dynamic" => project.dynamic.extend_from_slice(project_fields(value)),
            "summary" => project.description = Some(value.to_string()),
            "project-url" => {
                let (label, url) = value
                    .split_once(", ")
                    .ok_or_else(|| MetadataError::malformed(header, value))?;
                project.urls.insert(label, url);
            }
            "author" => author_names.extend(person::decode_names(value)),
            "author-email" => author_emails.extend(person::decode_emails(header, value)?),
            "maintainer" => maintainer_names.extend(person::decode_names(value)),
            "maintainer-email" => {
                maintainer_emails.extend(person::decode_emails(header, value)?)
            }
            "license" => license_text = Some(value.to_string()),
            "license-expression" => license_expression = Some(value.to_string()),
            "license-file" => project.license_files.push(value.to_string()),
            "keywords" => project.keywords.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from),
            ),
            "classifier" => project.classifiers.push(value.to_string()),
            "requires-python" => project.requires_python = Some(value.to_string()),
            "provides-extra" => {
                project
                    .optional_dependencies
                    .entry(value.to_string())
                    .or_default();
            }
            "requires-dist" => file_requirement(&mut project, header, value)?,
            "description-content-type" => content_type = Some(value.to_string()),
            "description" => legacy_description = Some(value.to_string()),
            _ => debug!(%header, "ignoring header"),
        }
    }

    project.authors = concat(author_names, author_emails);
    project.maintainers = concat(maintainer_names, maintainer_emails);

    project.license = match (license_expression, license_text) {
        (Some(expr), _) => Some(License::Expression(expr)),
        (None, Some(text)) => Some(License::Text { text }),
        (None, None) => None,
    };

    // An empty body still counts when there is no legacy description
    let text = doc
        .body()
        .filter(|body| !body.is_empty())
        .map(String::from)
        .or(legacy_description)
        .or_else(|| doc.body().map(String::from));
    project.readme = text.map(|text| Readme {
        content_type: Some(
            content_type.unwrap_or_else(|| DEFAULT_README_CONTENT_TYPE.to_string()),
        ),
        text,
    });

    project.dynamic.sort_by_key(|field| field.as_str());
    project.dynamic.dedup();

    debug!(name = %project.name, "parsed core metadata");
    Ok(project)
}

/// File a `Requires-Dist` value as a plain or optional dependency.
fn file_requirement(
    project: &mut ProjectMetadata,
    header: &str,
    value: &str,
) -> Result<(), MetadataError> {
    let mut requirement: Requirement = value
        .parse()
        .map_err(|_| MetadataError::malformed(header, value))?;

    match requirement.marker.as_ref().and_then(|m| m.split_extra()) {
        Some((rest, extra)) => {
            requirement.marker = rest;
            project
                .optional_dependencies
                .entry(extra)
                .or_default()
                .push(requirement.to_string());
        }
        None => project.dependencies.push(requirement.to_string()),
    }
    Ok(())
}

fn concat(mut first: Vec<Person>, second: Vec<Person>) -> Vec<Person> {
    first.extend(second);
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProjectField;

    fn parse(body: &str) -> ProjectMetadata {
        parse_core_metadata(&format!(
            "Metadata-Version: 2.4\nName: My.App\nVersion: 0.1.0\n{body}"
        ))
        .unwrap()
    }

    mod required {
        use super::*;

        #[test]
        fn missing_name() {
            let err = parse_core_metadata("Metadata-Version: 2.4\n").unwrap_err();
            assert_eq!(err.to_string(), "Missing required core metadata: Name");
        }

        #[test]
        fn missing_version() {
            let err = parse_core_metadata("Metadata-Version: 2.4\nName: My.App\n").unwrap_err();
            assert_eq!(err.to_string(), "Missing required core metadata: Version");
        }

        #[test]
        fn name_checked_first() {
            let err = parse_core_metadata("Summary: x\n").unwrap_err();
            assert!(matches!(err, MetadataError::MissingRequiredField("Name")));
        }
    }

    mod headers {
        use super::*;

        #[test]
        fn defaults_only() {
            assert_eq!(parse(""), ProjectMetadata::new("My.App", "0.1.0"));
        }

        #[test]
        fn dynamic_contracted() {
            let p = parse("Dynamic: Classifier\nDynamic: Provides-Extra\nDynamic: Requires-Dist\n");
            assert_eq!(
                p.dynamic,
                [
                    ProjectField::Classifiers,
                    ProjectField::Dependencies,
                    ProjectField::OptionalDependencies,
                ]
            );
        }

        #[test]
        fn urls_in_order() {
            let p = parse("Project-URL: foo, bar\nProject-URL: bar, baz\n");
            let urls: Vec<_> = p.urls.iter().collect();
            assert_eq!(urls, [("foo", "bar"), ("bar", "baz")]);
        }

        #[test]
        fn url_without_separator() {
            let err = parse_core_metadata("Name: a\nVersion: 1\nProject-URL: nothing\n").unwrap_err();
            assert!(
                matches!(err, MetadataError::MalformedField { field, value } if field == "Project-URL" && value == "nothing")
            );
        }

        #[test]
        fn people_plain_first() {
            let p = parse("Author: foo, bar\nAuthor-email: baz <baz@domain>\nMaintainer-email: q@domain\n");
            assert_eq!(
                p.authors,
                [
                    Person::named("foo"),
                    Person::named("bar"),
                    Person::with_email("baz", "baz@domain"),
                ]
            );
            assert_eq!(p.maintainers, [Person::email("q@domain")]);
        }

        #[test]
        fn license_forms() {
            assert_eq!(parse("License: foo\n").license, Some(License::text("foo")));
            assert_eq!(
                parse("License: foo\n        bar\n").license,
                Some(License::text("foo\nbar"))
            );
            assert_eq!(
                parse("License: MIT\nLicense-Expression: MIT\n").license,
                Some(License::expression("MIT"))
            );
        }

        #[test]
        fn keywords_and_classifiers() {
            let p = parse("Keywords: bar,foo\nClassifier: A :: 3.9\nClassifier: A :: 3.11\n");
            assert_eq!(p.keywords, ["bar", "foo"]);
            assert_eq!(p.classifiers, ["A :: 3.9", "A :: 3.11"]);
        }

        #[test]
        fn unknown_headers_ignored() {
            assert_eq!(
                parse("X-Custom: 1\nPlatform: any\n"),
                ProjectMetadata::new("My.App", "0.1.0")
            );
        }
    }

    mod dependencies {
        use super::*;

        #[test]
        fn plain_and_extras() {
            let p = parse(
                "Requires-Dist: bar==5\n\
                 Requires-Dist: foo==1\n\
                 Provides-Extra: feature1\n\
                 Requires-Dist: bar==5; (python_version < '3') and extra == 'feature1'\n\
                 Requires-Dist: foo==1; extra == 'feature1'\n\
                 Provides-Extra: feature3\n\
                 Requires-Dist: baz@ file:///path/to/project ; extra == 'feature3'\n",
            );
            assert_eq!(p.dependencies, ["bar==5", "foo==1"]);
            assert_eq!(
                p.optional_dependencies["feature1"],
                [r#"bar==5; python_version < "3""#, "foo==1"]
            );
            assert_eq!(
                p.optional_dependencies["feature3"],
                ["baz@ file:///path/to/project"]
            );
        }

        #[test]
        fn or_group_unwrapped() {
            let p = parse(
                "Requires-Dist: foo==1; (sys_platform == 'win32' or python_version < '3') and extra == 'f'\n",
            );
            assert_eq!(
                p.optional_dependencies["f"],
                [r#"foo==1; sys_platform == "win32" or python_version < "3""#]
            );
        }

        #[test]
        fn empty_extra_kept() {
            let p = parse("Provides-Extra: empty\n");
            assert_eq!(p.optional_dependencies["empty"], Vec::<String>::new());
        }

        #[test]
        fn extras_without_provides_extra() {
            let p = parse("Requires-Dist: foo==1; extra == 'feature1'\n");
            assert_eq!(p.optional_dependencies["feature1"], ["foo==1"]);
            assert!(p.dependencies.is_empty());
        }

        #[test]
        fn malformed_requirement() {
            let err = parse_core_metadata("Name: a\nVersion: 1\nRequires-Dist: ==1\n").unwrap_err();
            assert!(matches!(err, MetadataError::MalformedField { .. }));
        }
    }

    mod folded_values {
        use super::*;

        #[test]
        fn summary_unfolded() {
            let p = parse("Summary: first\n        Requires-Dist: evil==1\n");
            assert_eq!(p.description.as_deref(), Some("first\nRequires-Dist: evil==1"));
            assert!(p.dependencies.is_empty());
        }
    }

    mod readme {
        use super::*;

        #[test]
        fn body_with_content_type() {
            let p = parse("Description-Content-Type: text/markdown\n\ntest content\n");
            assert_eq!(p.readme, Some(Readme::new("text/markdown", "test content\n")));
        }

        #[test]
        fn default_content_type() {
            let p = parse("\ntest content\n");
            assert_eq!(p.readme, Some(Readme::new("text/plain", "test content\n")));
        }

        #[test]
        fn legacy_description_header() {
            let p = parse("Description: line one\n        line two\n");
            assert_eq!(p.readme, Some(Readme::new("text/plain", "line one\nline two")));
        }

        #[test]
        fn content_type_alone_is_not_a_readme() {
            assert_eq!(parse("Description-Content-Type: text/markdown\n").readme, None);
        }

        #[test]
        fn empty_body_is_empty_readme() {
            let p = parse("Description-Content-Type: text/markdown\n\n");
            assert_eq!(p.readme, Some(Readme::new("text/markdown", "")));
        }
    }
}
