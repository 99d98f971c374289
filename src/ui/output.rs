//! ui::output
//!
//! User-facing messages for the coremeta commands.
//!
//! # Streams
//!
//! stdout belongs to command payloads: the rendered document from
//! `render`, JSON from `parse`, the version table from `versions`. Those
//! are written by the commands and only the version table honours
//! `--quiet`, since a quiet render piped into a file must still produce
//! the file.
//!
//! Everything else goes to stderr so `coremeta render | coremeta parse -`
//! stays clean:
//!
//! - [`debug`] traces which config files were loaded and what is being
//!   rendered (`--debug` only)
//! - [`success`] confirms `render --output` wrote its file
//! - [`error`] prints the failure chain from `main`
//!
//! Library diagnostics (unmatched license-file patterns and the like) go
//! through `tracing` instead and are filtered by `RUST_LOG`.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
///
/// Goes to stderr so it never mixes with document output on stdout.
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Format a list of items, one per line.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn format_list_prefixes_lines() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
        assert_eq!(format_list::<&str>(&[], "- "), "");
    }
}
