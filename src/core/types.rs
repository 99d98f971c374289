//! core::types
//!
//! Strong types for the project model.
//!
//! # Types
//!
//! - [`Person`] - An author or maintainer entry (name and/or email)
//! - [`License`] - Legacy free-text license or normalized expression
//! - [`Readme`] - Long description text with its content type
//! - [`UrlMap`] - Insertion-ordered label → URL mapping
//! - [`ProjectField`] - Name of a project-level field (used by `dynamic`)
//!
//! # Validation
//!
//! Values that have a closed vocabulary (project field names) are checked at
//! construction time. Free-text values are carried verbatim.
//!
//! # Examples
//!
//! ```
//! use coremeta::core::types::{Person, ProjectField};
//!
//! let author = Person::with_email("Jane", "jane@example.org");
//! assert_eq!(author.name.as_deref(), Some("Jane"));
//!
//! let field: ProjectField = "optional-dependencies".parse().unwrap();
//! assert_eq!(field.as_str(), "optional-dependencies");
//! assert!("scripts-and-things".parse::<ProjectField>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown project field: {0}")]
    UnknownProjectField(String),

    #[error("person entry needs a name or an email")]
    EmptyPerson,
}

/// An author or maintainer.
///
/// At least one of `name` or `email` must be present for the entry to be
/// rendered; [`Person::validate`] enforces that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Person {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Person {
    /// A name-only entry.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    /// An email-only entry.
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }

    /// An entry with both a name and an email.
    pub fn with_email(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Check that the entry carries a name or an email.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.name.is_none() && self.email.is_none() {
            return Err(TypeError::EmptyPerson);
        }
        Ok(())
    }
}

/// Project license.
///
/// A plain string is a license expression (normalized on render); a table
/// with `text` is the legacy free-text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum License {
    /// SPDX-style license expression, e.g. `MIT OR Apache-2.0`
    Expression(String),
    /// Legacy free-text license
    Text { text: String },
}

impl License {
    /// Create a legacy text license.
    pub fn text(text: impl Into<String>) -> Self {
        License::Text { text: text.into() }
    }

    /// Create an expression license.
    pub fn expression(expr: impl Into<String>) -> Self {
        License::Expression(expr.into())
    }
}

/// Default content type for a readme without one.
pub const DEFAULT_README_CONTENT_TYPE: &str = "text/plain";

/// Project readme (long description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Readme {
    /// MIME type of `text`; `text/plain` when absent
    #[serde(
        rename = "content-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,

    /// Readme body
    pub text: String,
}

impl Readme {
    /// Create a readme with an explicit content type.
    pub fn new(content_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            text: text.into(),
        }
    }

    /// The content type, falling back to `text/plain`.
    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(DEFAULT_README_CONTENT_TYPE)
    }
}

/// Label → URL mapping that keeps insertion order.
///
/// Serialized as a map. Deserialization keeps the order in which the
/// source format yields entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMap(Vec<(String, String)>);

impl UrlMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, label: impl Into<String>, url: impl Into<String>) {
        let label = label.into();
        let url = url.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = url,
            None => self.0.push((label, url)),
        }
    }

    /// Look up a URL by label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, u)| u.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, u)| (l.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = UrlMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for UrlMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, url) in &self.0 {
            map.serialize_entry(label, url)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UrlMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UrlMapVisitor;

        impl<'de> Visitor<'de> for UrlMapVisitor {
            type Value = UrlMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of label = url entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<UrlMap, A::Error> {
                let mut map = UrlMap::new();
                while let Some((label, url)) = access.next_entry::<String, String>()? {
                    map.insert(label, url);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(UrlMapVisitor)
    }
}

/// A project-level field name, as listed in `dynamic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Name,
    Version,
    Description,
    Readme,
    RequiresPython,
    License,
    LicenseFiles,
    Authors,
    Maintainers,
    Keywords,
    Classifiers,
    Urls,
    Dependencies,
    OptionalDependencies,
}

impl ProjectField {
    /// Every project field, in declaration order.
    pub const ALL: [ProjectField; 14] = [
        ProjectField::Name,
        ProjectField::Version,
        ProjectField::Description,
        ProjectField::Readme,
        ProjectField::RequiresPython,
        ProjectField::License,
        ProjectField::LicenseFiles,
        ProjectField::Authors,
        ProjectField::Maintainers,
        ProjectField::Keywords,
        ProjectField::Classifiers,
        ProjectField::Urls,
        ProjectField::Dependencies,
        ProjectField::OptionalDependencies,
    ];

    /// The field's name as written in project configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectField::Name => "name",
            ProjectField::Version => "version",
            ProjectField::Description => "description",
            ProjectField::Readme => "readme",
            ProjectField::RequiresPython => "requires-python",
            ProjectField::License => "license",
            ProjectField::LicenseFiles => "license-files",
            ProjectField::Authors => "authors",
            ProjectField::Maintainers => "maintainers",
            ProjectField::Keywords => "keywords",
            ProjectField::Classifiers => "classifiers",
            ProjectField::Urls => "urls",
            ProjectField::Dependencies => "dependencies",
            ProjectField::OptionalDependencies => "optional-dependencies",
        }
    }
}

impl FromStr for ProjectField {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| TypeError::UnknownProjectField(s.to_string()))
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ProjectField {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectField> for String {
    fn from(field: ProjectField) -> Self {
        field.as_str().to_string()
    }
}

impl Serialize for ProjectField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
