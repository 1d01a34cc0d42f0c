//! Error types for the invocation harness.

use feltcodec_core::error::CodecError;
use thiserror::Error;

/// Errors that abort an invocation. No partial result accompanies them.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Function '{name}' is not declared in the contract interface")]
    UnknownFunction { name: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HarnessError {
    /// The engine's own error, if this failure came from the engine.
    pub fn engine_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            HarnessError::Execution(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Errors from loading harness configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
