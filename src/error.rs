//! Error types for reply parsing

use crate::patterns::PatternKind;
use thiserror::Error;

/// Errors that can occur while building a pattern set
///
/// Parsing itself never fails; every body produces a [`crate::Message`].
#[derive(Error, Debug)]
pub enum ParseError {
    /// A pattern is not a valid regular expression
    #[error("Invalid {pattern} pattern: {source}")]
    InvalidPattern {
        pattern: PatternKind,
        source: regex::Error,
    },

    /// A pattern configuration document could not be read
    #[error("Invalid pattern configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for pattern construction
pub type Result<T> = std::result::Result<T, ParseError>;
