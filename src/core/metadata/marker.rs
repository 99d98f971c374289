//! core::metadata::marker
//!
//! Environment marker text handling.
//!
//! Markers are never evaluated here. A small tokenizer is enough to
//! normalize spacing and quoting, find a top-level `or`, and attach or
//! detach an `extra == '<name>'` clause.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::marker::{combine_with_extra, Marker};
//!
//! let marker = Marker::parse(r#"python_version<"3""#).unwrap();
//! assert_eq!(marker.to_string(), r#"python_version < "3""#);
//! assert_eq!(
//!     combine_with_extra(Some(&marker), "feature1"),
//!     "python_version < '3' and extra == 'feature1'"
//! );
//!
//! let either = Marker::parse(r#"sys_platform == "win32" or python_version < "3""#).unwrap();
//! assert_eq!(
//!     combine_with_extra(Some(&either), "f"),
//!     "(sys_platform == 'win32' or python_version < '3') and extra == 'f'"
//! );
//! ```

use std::fmt;

use thiserror::Error;

/// Errors from tokenizing marker text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    #[error("empty marker")]
    Empty,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    And,
    Or,
    Op(String),
    Var(String),
    Str(String),
}

/// Quote character used when rendering string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    fn char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    fn other(self) -> Quote {
        match self {
            Quote::Single => Quote::Double,
            Quote::Double => Quote::Single,
        }
    }
}

const OPERATORS: [&str; 8] = ["===", "==", "!=", "<=", ">=", "~=", "<", ">"];

/// A tokenized marker expression.
///
/// `Display` renders the canonical double-quoted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    tokens: Vec<Token>,
}

impl Marker {
    /// Tokenize marker text.
    ///
    /// Parentheses wrapping the whole expression are dropped, so
    /// `(a or b)` and `a or b` have the same canonical form.
    ///
    /// # Errors
    ///
    /// Fails on empty input, unterminated strings, unbalanced parentheses,
    /// and characters that cannot start a token.
    pub fn parse(text: &str) -> Result<Self, MarkerError> {
        let mut tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(MarkerError::Empty);
        }

        let mut depth = 0usize;
        for token in &tokens {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth = depth.checked_sub(1).ok_or(MarkerError::UnbalancedParens)?
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(MarkerError::UnbalancedParens);
        }

        while is_wrapped(&tokens) {
            tokens.pop();
            tokens.remove(0);
        }
        if tokens.is_empty() {
            return Err(MarkerError::Empty);
        }

        Ok(Self { tokens })
    }

    /// Whether an `or` appears outside every parenthesis group.
    pub fn has_top_level_or(&self) -> bool {
        top_level(&self.tokens).any(|(_, token)| *token == Token::Or)
    }

    /// Render with the given quote character for string literals.
    ///
    /// A literal containing the preferred quote falls back to the other one.
    pub fn render(&self, quote: Quote) -> String {
        let mut out = String::new();
        let mut prev: Option<&Token> = None;
        for token in &self.tokens {
            let glue = match (prev, token) {
                (None, _) | (Some(Token::LParen), _) | (_, Token::RParen) => "",
                _ => " ",
            };
            out.push_str(glue);
            match token {
                Token::LParen => out.push('('),
                Token::RParen => out.push(')'),
                Token::And => out.push_str("and"),
                Token::Or => out.push_str("or"),
                Token::Op(op) => out.push_str(op),
                Token::Var(name) => out.push_str(name),
                Token::Str(value) => {
                    let q = if value.contains(quote.char()) {
                        quote.other().char()
                    } else {
                        quote.char()
                    };
                    out.push(q);
                    out.push_str(value);
                    out.push(q);
                }
            }
            prev = Some(token);
        }
        out
    }

    /// Detach a trailing `extra == '<name>'` clause.
    ///
    /// Recognizes the clause as the whole marker or as the last operand of
    /// a top-level `and`. A single parenthesis group wrapping what remains
    /// is removed. Returns the remaining marker (if any) and the extra name.
    pub fn split_extra(&self) -> Option<(Option<Marker>, String)> {
        if let Some(name) = extra_clause(&self.tokens) {
            return Some((None, name));
        }

        let len = self.tokens.len();
        if len < 5 {
            return None;
        }
        let and_at = len - 4;
        let and_is_top_level =
            top_level(&self.tokens).any(|(i, t)| i == and_at && *t == Token::And);
        if !and_is_top_level {
            return None;
        }
        let name = extra_clause(&self.tokens[and_at + 1..])?;

        let mut rest = &self.tokens[..and_at];
        // `a or b and extra == 'x'` binds the clause to `b` only
        if top_level(rest).any(|(_, t)| *t == Token::Or) {
            return None;
        }
        while is_wrapped(rest) {
            rest = &rest[1..rest.len() - 1];
        }
        if rest.is_empty() {
            return None;
        }
        Some((
            Some(Marker {
                tokens: rest.to_vec(),
            }),
            name,
        ))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Quote::Double))
    }
}

/// Build the marker section of an extra-qualified requirement.
///
/// - no marker: `extra == '<name>'`
/// - marker with a top-level `or`: `(<marker>) and extra == '<name>'`
/// - any other marker: `<marker> and extra == '<name>'`
///
/// String literals are single-quoted throughout.
pub fn combine_with_extra(marker: Option<&Marker>, extra: &str) -> String {
    let clause = format!("extra == '{extra}'");
    match marker {
        None => clause,
        Some(m) if m.has_top_level_or() => format!("({}) and {clause}", m.render(Quote::Single)),
        Some(m) => format!("{} and {clause}", m.render(Quote::Single)),
    }
}

/// Tokens at parenthesis depth zero, with their indices.
fn top_level(tokens: &[Token]) -> impl Iterator<Item = (usize, &Token)> {
    let mut depth = 0usize;
    tokens.iter().enumerate().filter(move |(_, token)| {
        let outside = depth == 0;
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ => {}
        }
        outside && !matches!(token, Token::LParen | Token::RParen)
    })
}

/// Whether the first token opens a group that closes at the last token.
fn is_wrapped(tokens: &[Token]) -> bool {
    if tokens.first() != Some(&Token::LParen) || tokens.last() != Some(&Token::RParen) {
        return false;
    }
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return i == tokens.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// `extra == "<name>"` in either operand order.
fn extra_clause(tokens: &[Token]) -> Option<String> {
    match tokens {
        [Token::Var(var), Token::Op(op), Token::Str(name)]
        | [Token::Str(name), Token::Op(op), Token::Var(var)]
            if var == "extra" && op == "==" =>
        {
            Some(name.clone())
        }
        _ => None,
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, MarkerError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c == '(' {
            tokens.push(Token::LParen);
            i += 1;
        } else if c == ')' {
            tokens.push(Token::RParen);
            i += 1;
        } else if c == '\'' || c == '"' {
            let start = i + 1;
            let end = chars[start..]
                .iter()
                .position(|&ch| ch == c)
                .map(|offset| start + offset)
                .ok_or(MarkerError::UnterminatedString)?;
            tokens.push(Token::Str(chars[start..end].iter().collect()));
            i = end + 1;
        } else if "<>=!~".contains(c) {
            let start = i;
            while i < chars.len() && "<>=!~".contains(chars[i]) {
                i += 1;
            }
            let op: String = chars[start..i].iter().collect();
            if !OPERATORS.contains(&op.as_str()) {
                return Err(MarkerError::UnknownOperator(op));
            }
            tokens.push(Token::Op(op));
        } else if c.is_alphanumeric() || c == '_' || c == '.' {
            let start = i;
            while i < chars.len()
                && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '.')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let token = match word.as_str() {
                "and" => Token::And,
                "or" => Token::Or,
                "in" => match tokens.last() {
                    Some(Token::Op(prev)) if prev == "not" => {
                        tokens.pop();
                        Token::Op("not in".into())
                    }
                    _ => Token::Op("in".into()),
                },
                "not" => Token::Op("not".into()),
                _ => Token::Var(word),
            };
            tokens.push(token);
        } else {
            return Err(MarkerError::UnexpectedChar(c));
        }
    }

    if tokens.iter().any(|t| *t == Token::Op("not".into())) {
        return Err(MarkerError::UnknownOperator("not".into()));
    }
    Ok(tokens)
}
