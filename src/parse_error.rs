use std::fmt;
use std::str::Utf8Error;
use thiserror::Error;

/// An error from running a single [`ParseMap`](crate::ParseMap) against some input.
///
/// Only [`InputMatch`](ParseMapError::InputMatch) is routine: it means "this map does not apply
/// here". The other match-time variants mean the table itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMapError {
    #[error("\"{regex}\" does not match the start of \"{}\"", .input.escape_default())]
    InputMatch { regex: String, input: String },
    #[error(
        "parsing cannot continue: no match for fragment \"{regex}\" in substring \"{}\"",
        .substring.escape_default()
    )]
    NoMatch { regex: String, substring: String },
    #[error(
        "couldn't find matches for unignored tokens {missing:?}, with regex \"{regex}\" and input \"{}\"",
        .input.escape_default()
    )]
    MissingToken {
        missing: Vec<String>,
        regex: String,
        input: String,
    },
    #[error("token '{identifier}' was matched twice in one parse")]
    DuplicateToken { identifier: String },
    #[error("mapped regex \"{mapped}\" is not equal to \"{raw}\"")]
    RegexMismatch { mapped: String, raw: String },
}

impl ParseMapError {
    /// True if this error can only be caused by a badly written table, rather than by the input.
    pub fn is_authoring_bug(&self) -> bool {
        use ParseMapError::*;

        match self {
            InputMatch { .. } | RegexMismatch { .. } => false,
            NoMatch { .. } | MissingToken { .. } | DuplicateToken { .. } => true,
        }
    }
}

/// The input could not be consumed: no parse map applied at some position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    near: String,
    expecting: String,
    offset: usize,
    line: usize,
    column: usize,
}

impl SyntaxError {
    pub(crate) fn new(
        near: String,
        expecting: &str,
        offset: usize,
        line: usize,
        column: usize,
    ) -> SyntaxError {
        SyntaxError {
            near,
            expecting: expecting.to_owned(),
            offset,
            line,
            column,
        }
    }

    /// The (truncated, formatted) text at which consumption stopped.
    pub fn near(&self) -> &str {
        &self.near
    }

    /// Description of the syntax the consumer accepts.
    pub fn expecting(&self) -> &str {
        &self.expecting
    }

    /// Byte offset of the failure within the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line of the failure. Zero-indexed.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the failure, counted in bytes. Zero-indexed.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use colored::Colorize;

        writeln!(
            f,
            "{} at line {}, column {}: near \"{}\"",
            "Syntax Error".red().bold(),
            self.line,
            self.column,
            self.near.escape_default().to_string().red(),
        )?;
        write!(f, "Expecting: {}", self.expecting.bright_blue())
    }
}

impl std::error::Error for SyntaxError {}

/// An error from running a [`Consumer`](crate::Consumer).
#[derive(Debug, Clone, Error)]
pub enum ConsumerError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("parse map {map} is malformed (at byte {offset}): {error}")]
    Authoring {
        map: String,
        offset: usize,
        #[source]
        error: ParseMapError,
    },
    #[error("expected text input: {0}")]
    NotText(#[from] Utf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authoring_bugs() {
        let input_match = ParseMapError::InputMatch {
            regex: "a".to_owned(),
            input: "b".to_owned(),
        };
        let no_match = ParseMapError::NoMatch {
            regex: "a".to_owned(),
            substring: "b".to_owned(),
        };
        assert!(!input_match.is_authoring_bug());
        assert!(no_match.is_authoring_bug());
    }

    #[test]
    fn test_syntax_error_display() {
        let error = SyntaxError::new("%%".to_owned(), "a let binding", 10, 2, 4);
        let message = error.to_string();
        assert!(message.contains("Syntax Error"));
        assert!(message.contains("line 2, column 4"));
        assert!(message.contains("%%"));
        assert!(message.contains("a let binding"));
    }

    #[test]
    fn test_escaped_input() {
        let error = ParseMapError::InputMatch {
            regex: "x".to_owned(),
            input: "a\nb".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "\"x\" does not match the start of \"a\\nb\""
        );
    }
}
