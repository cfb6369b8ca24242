//! Buffer errors

use thiserror::Error;

/// Error raised by locator and slot operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A required locator does not occur in the buffer
    #[error("undefined locator: {0}")]
    LocatorNotFound(String),

    /// A slot name was required but resolved to nothing
    #[error("slot name `{0}` resolves to nothing")]
    UnnamedSlot(String),
}

/// Buffer result
pub type BufferResult<T> = Result<T, BufferError>;
