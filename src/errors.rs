//! LazyParse Error Handling
//!
//! Unterminated constructs are reported in-band through the `error` flag of a
//! [`MatchResult`](crate::tree::MatchResult) and never appear here. This enum
//! only carries the fatal cases: rule contract breaches, the nesting guard,
//! and failures while building a rule set.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Canonical result alias used across the crate.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("rule '{rule}' moved the cursor backwards: fetch at {index} returned last index {last_index}")]
    #[diagnostic(
        code(lazyparse::engine::cursor_regression),
        help("a fetch must report a last index at or after the position it started from")
    )]
    CursorRegression {
        rule: String,
        index: usize,
        last_index: usize,
    },

    #[error("nesting depth limit of {limit} exceeded at index {index}")]
    #[diagnostic(
        code(lazyparse::engine::depth_exceeded),
        help("raise the limit with `max_depth`, or reject the input before parsing")
    )]
    DepthExceeded { limit: usize, index: usize },

    #[error("rule '{name}' has an invalid expression")]
    #[diagnostic(code(lazyparse::rules::invalid_regex))]
    InvalidRegex {
        name: String,
        #[source]
        source: regex_automata::meta::BuildError,
    },

    #[error("unknown character class '{class}'")]
    #[diagnostic(
        code(lazyparse::config::unknown_class),
        help("expected one of: letter, digit, variable, symbol, punctuation, control, whitespace")
    )]
    UnknownCharClass { class: String },

    #[error("rule '{name}' cannot be built: {reason}")]
    #[diagnostic(code(lazyparse::config::invalid_rule))]
    InvalidRule { name: String, reason: String },

    #[error("rule set '{}' is invalid: {message}", path.display())]
    #[diagnostic(code(lazyparse::config::invalid))]
    Config { path: PathBuf, message: String },

    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(lazyparse::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output")]
    #[diagnostic(code(lazyparse::output))]
    Output {
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ParseError::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True for breaches of the rule contract, as opposed to bad input or setup.
    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::CursorRegression { .. })
    }
}

/// Prints an error with its miette diagnostic on stderr.
pub fn print_error(error: ParseError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
