//! Error types for the FeltCodec pipeline.

use thiserror::Error;

/// Errors raised while constructing a field element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeltError {
    #[error("Value {value} is not below the field prime")]
    OutOfRange { value: String },

    #[error("Invalid felt literal '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// Definition errors found while loading an interface description.
///
/// These are raised once, when the ABI is ingested, and never while
/// flattening or building values.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("Invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid type '{ty}': {reason}")]
    InvalidType { ty: String, reason: String },

    #[error("Array type '{ty}' of '{owner}.{param}' is nested inside another type")]
    NestedArray {
        owner: String,
        param: String,
        ty: String,
    },

    #[error("Array '{owner}.{param}' is not preceded by its '{param}_len' felt")]
    MissingArrayLength { owner: String, param: String },

    #[error("Duplicate {kind} definition '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which end of the flat sequence ran out of agreement with the declared shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// The sequence ended before every declared value was built.
    Underflow,
    /// Elements were left over after every declared value was built.
    Overflow,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseFailure::Underflow => write!(f, "too few argument values"),
            ParseFailure::Overflow => write!(f, "too many argument values"),
        }
    }
}

/// Errors from the flattening and building engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },

    #[error("Shape mismatch in argument '{argument}': expected {expected}, got {actual}")]
    ShapeMismatch {
        argument: String,
        expected: String,
        actual: String,
    },

    #[error("Argument parsing failed: {reason}")]
    ArgumentParsingFailed { reason: ParseFailure },
}

impl CodecError {
    pub fn underflow() -> Self {
        CodecError::ArgumentParsingFailed {
            reason: ParseFailure::Underflow,
        }
    }

    pub fn overflow() -> Self {
        CodecError::ArgumentParsingFailed {
            reason: ParseFailure::Overflow,
        }
    }

    /// Returns the parse failure kind if this is an `ArgumentParsingFailed`.
    pub fn parse_failure(&self) -> Option<ParseFailure> {
        match self {
            CodecError::ArgumentParsingFailed { reason } => Some(*reason),
            _ => None,
        }
    }
}
