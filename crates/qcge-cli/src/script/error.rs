//! Script errors.

use thiserror::Error;

/// Errors that can occur while reading a script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScriptError {
    /// Text the lexer does not recognize.
    #[error("Line {line}: invalid token '{text}'")]
    InvalidToken { line: usize, text: String },

    /// A token where something else was required.
    #[error("Line {line}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// The line ended early.
    #[error("Line {line}: expected {expected}")]
    UnexpectedEnd { line: usize, expected: String },

    /// A gate name with no placement action.
    #[error("Line {line}: unknown gate '{name}'")]
    UnknownGate { line: usize, name: String },

    /// Any other malformed statement.
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Result type for script parsing.
pub type ScriptResult<T> = Result<T, ScriptError>;
