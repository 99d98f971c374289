//! core::metadata::document
//!
//! The header-style core metadata document.
//!
//! A document is an ordered list of `(name, value)` headers, names may
//! repeat, plus an optional body after one blank line.
//!
//! Header values are stored unfolded. `Display` folds every value that
//! spans several lines by indenting its continuation lines with
//! [`FOLD_INDENT`], and [`CoreMetadataDocument::parse`] reverses that, so a
//! newline inside a value can never start a new header.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::document::CoreMetadataDocument;
//!
//! let text = "Metadata-Version: 2.1\nName: My.App\nVersion: 0.1.0\n\nbody\n";
//! let doc = CoreMetadataDocument::parse(text).unwrap();
//! assert_eq!(doc.get("name"), Some("My.App"));
//! assert_eq!(doc.body(), Some("body\n"));
//! assert_eq!(doc.to_string(), text);
//! ```

use std::fmt;

use super::error::MetadataError;

/// Continuation indent for folded values.
pub const FOLD_INDENT: &str = "        ";

/// An ordered header document with an optional body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreMetadataDocument {
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl CoreMetadataDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// All headers in document order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// First value of a header, matched case-insensitively.
    pub fn get<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.get_all(name).next()
    }

    /// Every value of a header, in document order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Split raw text into headers and body.
    ///
    /// Headers end at the first empty line; everything after it is the
    /// body, which may be empty. Lines starting with a space or tab
    /// continue the previous header's value; they are joined with a
    /// newline once the fold indent is removed.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::MalformedField`] for a header line without
    /// a `:` or a continuation line before any header.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let mut doc = Self::new();
        let mut rest = text;

        while !rest.is_empty() {
            let (line, next) = match rest.find('\n') {
                Some(i) => (&rest[..i], &rest[i + 1..]),
                None => (rest, ""),
            };
            rest = next;
            let line = line.strip_suffix('\r').unwrap_or(line);

            if line.is_empty() {
                doc.body = Some(rest.to_string());
                break;
            }

            if line.starts_with([' ', '\t']) {
                let (_, value) = doc
                    .headers
                    .last_mut()
                    .ok_or_else(|| MetadataError::malformed("header", line))?;
                value.push('\n');
                value.push_str(unfold_line(line));
                continue;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| MetadataError::malformed("header", line))?;
            doc.push(name.trim(), value.trim());
        }

        Ok(doc)
    }
}

impl fmt::Display for CoreMetadataDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            if value.contains('\n') {
                writeln!(f, "{name}: {}", fold(value))?;
            } else {
                writeln!(f, "{name}: {value}")?;
            }
        }
        if let Some(body) = &self.body {
            writeln!(f)?;
            f.write_str(body)?;
        }
        Ok(())
    }
}

/// Indent every line after the first with [`FOLD_INDENT`].
pub fn fold(value: &str) -> String {
    value.replace('\n', &format!("\n{FOLD_INDENT}"))
}

/// Reverse [`fold`]. A continuation line indented by less than
/// [`FOLD_INDENT`] loses all of its leading whitespace.
pub fn unfold(value: &str) -> String {
    let mut lines = value.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        out.push_str(unfold_line(line));
    }
    out
}

fn unfold_line(line: &str) -> &str {
    line.strip_prefix(FOLD_INDENT)
        .unwrap_or_else(|| line.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse {
        use super::*;

        #[test]
        fn headers_in_order_with_repeats() {
            let doc = CoreMetadataDocument::parse(
                "Name: a\nProject-URL: foo, bar\nProject-URL: bar, baz\n",
            )
            .unwrap();
            let urls: Vec<_> = doc.get_all("Project-URL").collect();
            assert_eq!(urls, ["foo, bar", "bar, baz"]);
            assert_eq!(doc.headers().count(), 3);
            assert_eq!(doc.body(), None);
        }

        #[test]
        fn continuation_lines() {
            let doc = CoreMetadataDocument::parse("License: foo\n        bar\nName: a\n").unwrap();
            assert_eq!(doc.get("License"), Some("foo\nbar"));
            assert_eq!(doc.get("Name"), Some("a"));
        }

        #[test]
        fn body_after_blank_line() {
            let doc = CoreMetadataDocument::parse("Name: a\n\nline one\n\nline two\n").unwrap();
            assert_eq!(doc.body(), Some("line one\n\nline two\n"));
        }

        #[test]
        fn trailing_blank_line_is_empty_body() {
            let doc = CoreMetadataDocument::parse("Name: a\n\n").unwrap();
            assert_eq!(doc.body(), Some(""));
            assert_eq!(CoreMetadataDocument::parse("Name: a\n").unwrap().body(), None);
        }

        #[test]
        fn short_indent_continuation() {
            let doc = CoreMetadataDocument::parse("License: foo\n\tbar\n  baz\n").unwrap();
            assert_eq!(doc.get("License"), Some("foo\nbar\nbaz"));
        }

        #[test]
        fn crlf_line_endings() {
            let doc = CoreMetadataDocument::parse("Name: a\r\nVersion: 1\r\n").unwrap();
            assert_eq!(doc.get("Version"), Some("1"));
        }

        #[test]
        fn value_may_contain_colons() {
            let doc = CoreMetadataDocument::parse("Classifier: A :: B\n").unwrap();
            assert_eq!(doc.get("Classifier"), Some("A :: B"));
        }

        #[test]
        fn malformed_lines() {
            assert!(matches!(
                CoreMetadataDocument::parse("Name a\n"),
                Err(MetadataError::MalformedField { .. })
            ));
            assert!(matches!(
                CoreMetadataDocument::parse("  orphan\n"),
                Err(MetadataError::MalformedField { .. })
            ));
        }
    }

    mod display {
        use super::*;

        #[test]
        fn headers_then_body() {
            let mut doc = CoreMetadataDocument::new();
            doc.push("Name", "a");
            doc.push("Version", "1");
            doc.set_body("text\n");
            assert_eq!(doc.to_string(), "Name: a\nVersion: 1\n\ntext\n");
        }

        #[test]
        fn empty_document() {
            assert_eq!(CoreMetadataDocument::new().to_string(), "");
        }

        #[test]
        fn multi_line_values_folded() {
            let mut doc = CoreMetadataDocument::new();
            doc.push("Summary", "first\nRequires-Dist: evil==1");
            assert_eq!(
                doc.to_string(),
                "Summary: first\n        Requires-Dist: evil==1\n"
            );

            let parsed = CoreMetadataDocument::parse(&doc.to_string()).unwrap();
            assert_eq!(parsed.headers().count(), 1);
            assert_eq!(parsed.get("Summary"), Some("first\nRequires-Dist: evil==1"));
        }

        #[test]
        fn body_without_trailing_newline_kept_verbatim() {
            let mut doc = CoreMetadataDocument::new();
            doc.push("Name", "a");
            doc.set_body("text");
            assert_eq!(doc.to_string(), "Name: a\n\ntext");
            assert_eq!(CoreMetadataDocument::parse("Name: a\n\ntext").unwrap(), doc);
        }
    }

    mod fold_fn {
        use super::*;

        #[test]
        fn indents_continuations() {
            assert_eq!(fold("foo\nbar"), "foo\n        bar");
            assert_eq!(fold("single"), "single");
            assert_eq!(fold("trailing\n"), "trailing\n        ");
        }

        #[test]
        fn unfold_reverses() {
            for text in ["foo\nbar", "a\n\nb", "x", "  leading\n  indented\n"] {
                assert_eq!(unfold(&fold(text)), text);
            }
        }

        #[test]
        fn unfold_tolerates_short_indent() {
            assert_eq!(unfold("foo\n  bar"), "foo\nbar");
        }
    }
}
