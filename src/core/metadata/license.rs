//! core::metadata::license
//!
//! License expression normalization.
//!
//! Tokens are re-cased against a table of SPDX identifiers, operators
//! are upper-cased, and anything unrecognized passes through unchanged.
//! Parentheses and the `+` suffix are kept as written.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::license::{canonical_case, normalize_expression};
//!
//! assert_eq!(normalize_expression("mit or apache-2.0"), "MIT OR Apache-2.0");
//! assert_eq!(canonical_case("bsd-3-clause"), Some("BSD-3-Clause"));
//! assert_eq!(canonical_case("not-a-license"), None);
//! ```

const OPERATORS: [&str; 3] = ["AND", "OR", "WITH"];

/// Canonical casing of common SPDX license and exception identifiers.
static SPDX_IDENTIFIERS: &[&str] = &[
    "0BSD",
    "AFL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "Apache-1.1",
    "Apache-2.0",
    "Artistic-2.0",
    "BlueOak-1.0.0",
    "BSD-1-Clause",
    "BSD-2-Clause",
    "BSD-2-Clause-Patent",
    "BSD-3-Clause",
    "BSD-3-Clause-Clear",
    "BSD-4-Clause",
    "BSL-1.0",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "CDDL-1.0",
    "CECILL-2.1",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.2",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "HPND",
    "ISC",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "LicenseRef-Proprietary",
    "MIT",
    "MIT-0",
    "MPL-1.1",
    "MPL-2.0",
    "MS-PL",
    "MulanPSL-2.0",
    "NCSA",
    "OFL-1.1",
    "OSL-3.0",
    "PostgreSQL",
    "PSF-2.0",
    "Python-2.0",
    "Unicode-3.0",
    "Unlicense",
    "UPL-1.0",
    "W3C",
    "WTFPL",
    "X11",
    "Zlib",
    "ZPL-2.1",
    // exceptions
    "Autoconf-exception-3.0",
    "Bison-exception-2.2",
    "Classpath-exception-2.0",
    "GCC-exception-3.1",
    "LLVM-exception",
    "OpenSSL-exception",
];

/// Look up the canonical casing of an identifier.
pub fn canonical_case(token: &str) -> Option<&'static str> {
    SPDX_IDENTIFIERS
        .iter()
        .copied()
        .find(|id| id.eq_ignore_ascii_case(token))
}

/// Normalize a license expression's casing.
///
/// Whitespace between tokens collapses to a single space.
pub fn normalize_expression(expression: &str) -> String {
    expression
        .split_whitespace()
        .map(normalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize one whitespace-delimited token, keeping surrounding parens
/// and a trailing `+`.
fn normalize_token(token: &str) -> String {
    let core = token.trim_start_matches('(');
    let open = &token[..token.len() - core.len()];
    let inner = core.trim_end_matches(')');
    let close = &core[inner.len()..];
    let (ident, plus) = match inner.strip_suffix('+') {
        Some(ident) => (ident, "+"),
        None => (inner, ""),
    };

    let upper = ident.to_ascii_uppercase();
    let normalized = if OPERATORS.contains(&upper.as_str()) {
        upper
    } else {
        canonical_case(ident)
            .map(String::from)
            .unwrap_or_else(|| ident.to_string())
    };
    format!("{open}{normalized}{plus}{close}")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod canonical_case_fn {
        use super::*;

        #[test]
        fn known_identifiers() {
            assert_eq!(canonical_case("mit"), Some("MIT"));
            assert_eq!(canonical_case("APACHE-2.0"), Some("Apache-2.0"));
            assert_eq!(canonical_case("llvm-exception"), Some("LLVM-exception"));
        }

        #[test]
        fn unknown_identifier() {
            assert_eq!(canonical_case("Foo-1.0"), None);
        }

        #[test]
        fn table_has_no_case_duplicates() {
            for (i, a) in SPDX_IDENTIFIERS.iter().enumerate() {
                for b in &SPDX_IDENTIFIERS[i + 1..] {
                    assert!(!a.eq_ignore_ascii_case(b), "{a} duplicates {b}");
                }
            }
        }
    }

    mod normalize_expression_fn {
        use super::*;

        #[test]
        fn operators_and_identifiers() {
            assert_eq!(normalize_expression("mit or apache-2.0"), "MIT OR Apache-2.0");
            assert_eq!(normalize_expression("mit and isc"), "MIT AND ISC");
        }

        #[test]
        fn with_exception() {
            assert_eq!(
                normalize_expression("apache-2.0 with llvm-exception"),
                "Apache-2.0 WITH LLVM-exception"
            );
        }

        #[test]
        fn parens_and_plus_kept() {
            assert_eq!(
                normalize_expression("(mit or gpl-2.0-or-later) and mpl-1.1+"),
                "(MIT OR GPL-2.0-or-later) AND MPL-1.1+"
            );
            assert_eq!(normalize_expression("((mit))"), "((MIT))");
        }

        #[test]
        fn unknown_tokens_pass_through() {
            assert_eq!(
                normalize_expression("LicenseRef-Custom or mit"),
                "LicenseRef-Custom OR MIT"
            );
        }

        #[test]
        fn whitespace_collapsed() {
            assert_eq!(normalize_expression("  mit   OR\tisc "), "MIT OR ISC");
        }
    }
}
