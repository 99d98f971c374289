//! core::metadata::dynamic
//!
//! Mapping between dynamic project fields and core metadata headers.
//!
//! Two static tables, one per direction. The writer expands a project
//! field into the headers it produces; the parser contracts a header
//! back into every project field that could have produced it. The tables
//! are checked against each other in tests.

use crate::core::types::ProjectField;

/// Project field → headers, in emission order.
static EXPANSION: [(ProjectField, &[&str]); 14] = [
    (ProjectField::Name, &["Name"]),
    (ProjectField::Version, &["Version"]),
    (ProjectField::Description, &["Summary"]),
    (ProjectField::Readme, &["Description", "Description-Content-Type"]),
    (ProjectField::RequiresPython, &["Requires-Python"]),
    (ProjectField::License, &["License", "License-Expression"]),
    (ProjectField::LicenseFiles, &["License-File"]),
    (ProjectField::Authors, &["Author", "Author-email"]),
    (ProjectField::Maintainers, &["Maintainer", "Maintainer-email"]),
    (ProjectField::Keywords, &["Keywords"]),
    (ProjectField::Classifiers, &["Classifier"]),
    (ProjectField::Urls, &["Project-URL"]),
    (ProjectField::Dependencies, &["Requires-Dist"]),
    (
        ProjectField::OptionalDependencies,
        &["Provides-Extra", "Requires-Dist"],
    ),
];

/// Header → project fields.
static CONTRACTION: [(&str, &[ProjectField]); 18] = [
    ("Name", &[ProjectField::Name]),
    ("Version", &[ProjectField::Version]),
    ("Summary", &[ProjectField::Description]),
    ("Description", &[ProjectField::Readme]),
    ("Description-Content-Type", &[ProjectField::Readme]),
    ("Requires-Python", &[ProjectField::RequiresPython]),
    ("License", &[ProjectField::License]),
    ("License-Expression", &[ProjectField::License]),
    ("License-File", &[ProjectField::LicenseFiles]),
    ("Author", &[ProjectField::Authors]),
    ("Author-email", &[ProjectField::Authors]),
    ("Maintainer", &[ProjectField::Maintainers]),
    ("Maintainer-email", &[ProjectField::Maintainers]),
    ("Keywords", &[ProjectField::Keywords]),
    ("Classifier", &[ProjectField::Classifiers]),
    ("Project-URL", &[ProjectField::Urls]),
    (
        "Requires-Dist",
        &[ProjectField::Dependencies, ProjectField::OptionalDependencies],
    ),
    (
        "Provides-Extra",
        &[ProjectField::Dependencies, ProjectField::OptionalDependencies],
    ),
];

/// Headers a dynamic project field is declared as.
pub fn core_headers(field: ProjectField) -> &'static [&'static str] {
    EXPANSION
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, headers)| *headers)
        .unwrap_or(&[])
}

/// Project fields a `Dynamic` header value stands for. Unknown headers
/// map to nothing.
pub fn project_fields(header: &str) -> &'static [ProjectField] {
    CONTRACTION
        .iter()
        .find(|(h, _)| h.eq_ignore_ascii_case(header))
        .map(|(_, fields)| *fields)
        .unwrap_or(&[])
}
