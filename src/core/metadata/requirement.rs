//! core::metadata::requirement
//!
//! Dependency requirement strings.
//!
//! Parses the subset of requirement syntax metadata needs
//! (`name[extras] specifiers ; marker` and `name[extras] @ url ; marker`)
//! and renders it canonically:
//!
//! - extras sorted, joined with `,`
//! - specifier clauses stripped of spaces, sorted, joined with `,`
//! - direct references as `name@ url`, with ` ; ` before a marker
//! - markers normalized and double-quoted
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::requirement::Requirement;
//!
//! let req: Requirement = "Foo[b, a] >= 1.0, < 2 ; python_version<'3'".parse().unwrap();
//! assert_eq!(req.to_string(), r#"Foo[a,b]<2,>=1.0; python_version < "3""#);
//!
//! let url: Requirement = "baz @ file:///path/to/project".parse().unwrap();
//! assert_eq!(url.to_string(), "baz@ file:///path/to/project");
//! assert_eq!(url.with_extra("feature3"), "baz@ file:///path/to/project ; extra == 'feature3'");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::marker::{combine_with_extra, Marker, MarkerError};

/// Errors from parsing a requirement string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequirementError {
    #[error("missing project name")]
    MissingName,

    #[error("unterminated extras list")]
    UnterminatedExtras,

    #[error("missing URL after '@'")]
    MissingUrl,

    #[error("invalid version specifier '{0}'")]
    InvalidSpecifier(String),

    #[error("invalid marker: {0}")]
    Marker(#[from] MarkerError),
}

const SPECIFIER_OPERATORS: [&str; 8] = ["===", "==", "!=", "<=", ">=", "~=", "<", ">"];

/// A parsed requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    /// Sorted, de-duplicated
    pub extras: Vec<String>,
    /// Canonical specifier text, empty when unconstrained
    pub specifier: String,
    pub url: Option<String>,
    pub marker: Option<Marker>,
}

impl Requirement {
    /// Render with the marker combined with an `extra == '<name>'` clause.
    pub fn with_extra(&self, extra: &str) -> String {
        let mut out = self.base();
        if self.url.is_some() {
            out.push(' ');
        }
        out.push_str("; ");
        out.push_str(&combine_with_extra(self.marker.as_ref(), extra));
        out
    }

    /// Everything before the marker.
    fn base(&self) -> String {
        let mut out = self.name.clone();
        if !self.extras.is_empty() {
            out.push('[');
            out.push_str(&self.extras.join(","));
            out.push(']');
        }
        match &self.url {
            Some(url) => {
                out.push_str("@ ");
                out.push_str(url);
            }
            None => out.push_str(&self.specifier),
        }
        out
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base())?;
        if let Some(marker) = &self.marker {
            if self.url.is_some() {
                f.write_str(" ")?;
            }
            write!(f, "; {marker}")?;
        }
        Ok(())
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (head, marker) = match split_marker(text) {
            (head, Some(marker)) => (head.trim(), Some(Marker::parse(marker)?)),
            (head, None) => (head.trim(), None),
        };

        let name_len = head
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(head.len());
        let name = &head[..name_len];
        if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(RequirementError::MissingName);
        }

        let mut rest = head[name_len..].trim_start();
        let mut extras = Vec::new();
        if let Some(inner) = rest.strip_prefix('[') {
            let close = inner.find(']').ok_or(RequirementError::UnterminatedExtras)?;
            extras = inner[..close]
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
            extras.sort();
            extras.dedup();
            rest = inner[close + 1..].trim_start();
        }

        let (specifier, url) = if let Some(url) = rest.strip_prefix('@') {
            let url = url.trim();
            if url.is_empty() {
                return Err(RequirementError::MissingUrl);
            }
            (String::new(), Some(url.to_string()))
        } else {
            (parse_specifier(rest)?, None)
        };

        Ok(Self {
            name: name.to_string(),
            extras,
            specifier,
            url,
            marker,
        })
    }
}

/// Split off the marker at its `;`.
///
/// After a direct reference the separator must follow whitespace, since a
/// URL may itself contain `;`.
fn split_marker(text: &str) -> (&str, Option<&str>) {
    let Some(first) = text.find(';') else {
        return (text, None);
    };
    if !text[..first].contains('@') {
        return (&text[..first], Some(&text[first + 1..]));
    }
    text.match_indices(';')
        .map(|(i, _)| i)
        .find(|&i| text[..i].ends_with(char::is_whitespace))
        .map_or((text, None), |i| (&text[..i], Some(&text[i + 1..])))
}

/// Canonicalize a version specifier list, validating each clause.
fn parse_specifier(text: &str) -> Result<String, RequirementError> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    for clause in text.split(',') {
        let clause = clause.trim();
        if !SPECIFIER_OPERATORS.iter().any(|op| clause.starts_with(op)) {
            return Err(RequirementError::InvalidSpecifier(clause.to_string()));
        }
    }
    Ok(sort_clauses(text))
}

/// Split comma-separated clauses, drop whitespace, sort, and rejoin.
///
/// `>=1, <2` and `<2,>=1` both become `<2,>=1`.
pub fn sort_clauses(text: &str) -> String {
    let mut clauses: Vec<String> = text
        .split(',')
        .map(|c| c.chars().filter(|ch| !ch.is_whitespace()).collect::<String>())
        .filter(|c| !c.is_empty())
        .collect();
    clauses.sort();
    clauses.dedup();
    clauses.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(text: &str) -> Requirement {
        text.parse().unwrap()
    }

    mod parse {
        use super::*;

        #[test]
        fn name_only() {
            let r = req("foo");
            assert_eq!(r.name, "foo");
            assert!(r.extras.is_empty());
            assert_eq!(r.specifier, "");
            assert_eq!(r.to_string(), "foo");
        }

        #[test]
        fn specifier_sorted() {
            assert_eq!(req("foo >= 1, <2").to_string(), "foo<2,>=1");
            assert_eq!(req("foo (>=1,<2)").to_string(), "foo<2,>=1");
        }

        #[test]
        fn extras_sorted() {
            assert_eq!(req("foo[z,a]==1").to_string(), "foo[a,z]==1");
        }

        #[test]
        fn marker_normalized() {
            assert_eq!(
                req("foo==1;python_version<'3'").to_string(),
                r#"foo==1; python_version < "3""#
            );
        }

        #[test]
        fn direct_reference() {
            let r = req("baz @ file:///path/to/project");
            assert_eq!(r.url.as_deref(), Some("file:///path/to/project"));
            assert_eq!(r.to_string(), "baz@ file:///path/to/project");
        }

        #[test]
        fn direct_reference_with_marker() {
            assert_eq!(
                req("baz@ file:///p ; os_name == 'nt'").to_string(),
                r#"baz@ file:///p ; os_name == "nt""#
            );
        }

        #[test]
        fn semicolon_inside_url() {
            let r = req("foo @ https://example.com/pkg;v=1.tar.gz");
            assert_eq!(r.url.as_deref(), Some("https://example.com/pkg;v=1.tar.gz"));
            assert_eq!(r.marker, None);

            let r = req("foo @ https://example.com/pkg;v=1.tar.gz ; os_name == 'nt'");
            assert_eq!(r.url.as_deref(), Some("https://example.com/pkg;v=1.tar.gz"));
            assert_eq!(
                r.to_string(),
                r#"foo@ https://example.com/pkg;v=1.tar.gz ; os_name == "nt""#
            );
            assert_eq!(req(&r.to_string()), r);
        }

        #[test]
        fn canonical_text_is_stable() {
            for text in ["foo[a]<2,>=1", r#"bar==5; python_version < "3""#, "baz@ file:///x"] {
                assert_eq!(req(text).to_string(), text);
            }
        }

        #[test]
        fn errors() {
            assert_eq!(
                "".parse::<Requirement>(),
                Err(RequirementError::MissingName)
            );
            assert_eq!(
                "foo[a".parse::<Requirement>(),
                Err(RequirementError::UnterminatedExtras)
            );
            assert_eq!(
                "foo @ ".parse::<Requirement>(),
                Err(RequirementError::MissingUrl)
            );
            assert_eq!(
                "foo bar".parse::<Requirement>(),
                Err(RequirementError::InvalidSpecifier("bar".into()))
            );
            assert!(matches!(
                "foo; python_version < '3".parse::<Requirement>(),
                Err(RequirementError::Marker(_))
            ));
        }
    }

    mod with_extra {
        use super::*;

        #[test]
        fn no_marker() {
            assert_eq!(
                req("foo==1").with_extra("feature1"),
                "foo==1; extra == 'feature1'"
            );
        }

        #[test]
        fn with_marker() {
            assert_eq!(
                req(r#"foo==1; python_version < "3""#).with_extra("feature1"),
                "foo==1; python_version < '3' and extra == 'feature1'"
            );
        }

        #[test]
        fn or_marker() {
            assert_eq!(
                req(r#"foo==1; sys_platform == "win32" or python_version < "3""#)
                    .with_extra("feature2"),
                "foo==1; (sys_platform == 'win32' or python_version < '3') and extra == 'feature2'"
            );
        }
    }

    mod sort_clauses_fn {
        use super::*;

        #[test]
        fn orders_lexicographically() {
            assert_eq!(sort_clauses(">=1,<2"), "<2,>=1");
            assert_eq!(sort_clauses("<2,>=1"), "<2,>=1");
        }

        #[test]
        fn strips_spaces_and_empties() {
            assert_eq!(sort_clauses(" >= 3.8 , , != 3.9.0 "), "!=3.9.0,>=3.8");
        }
    }
}
