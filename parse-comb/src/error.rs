//! Parse failures and the outcome type every parser returns.

use std::fmt::Display;

use crate::input::Input;

/// The outcome of running a parser.
///
/// On success the parser yields its value together with the part of the input
/// it did not consume. The remainder is always a suffix of the input the parser
/// was given.
pub type ParseResult<'src, T> = Result<(T, Input<'src>), Error>;

/// An error that occurred during parsing.
///
/// Errors carry a single human readable message and no position. Ordered
/// choice combines the messages of its failed alternatives with `" or "`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
}

impl Error {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `expected '<what>'`
    pub fn expected(what: impl Display) -> Self {
        Self::new(format!("expected '{what}'"))
    }

    /// The input ran out while something else was required.
    pub fn end_of_input() -> Self {
        Self::new("unexpected end of input")
    }

    /// Join the messages of two failed alternatives.
    pub fn either(self, other: Error) -> Self {
        Self::new(format!("{} or {}", self.message, other.message))
    }

    /// The message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}
