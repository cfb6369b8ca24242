//! Program errors

use pophery_core::BufferError;
use thiserror::Error;

/// Error that aborts a running program
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Program result
pub type ProgramResult<T> = Result<T, ProgramError>;
