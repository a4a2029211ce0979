use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PwmError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no sequences supplied")]
    NoSequences,

    #[error(
        "all sequences must share one fixed length: sequence {index} has length {found}, expected {expected}"
    )]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid sequence {index} at position {position}: unexpected character '{found}'")]
    InvalidSequence {
        index: usize,
        position: usize,
        found: char,
    },

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Data error: {0}")]
    DataError(#[from] polars::prelude::PolarsError),

    #[error("Logo rendering error: {0}")]
    Render(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Type alias for Result with PwmError
pub type Result<T> = std::result::Result<T, PwmError>;

impl PwmError {
    /// Create a new LengthMismatch error
    pub fn length_mismatch(index: usize, expected: usize, found: usize) -> Self {
        PwmError::LengthMismatch {
            index,
            expected,
            found,
        }
    }

    /// Create a new InvalidSequence error
    pub fn invalid_sequence(index: usize, position: usize, found: char) -> Self {
        PwmError::InvalidSequence {
            index,
            position,
            found,
        }
    }

    /// Create a new Render error
    pub fn render(message: impl Into<String>) -> Self {
        PwmError::Render(message.into())
    }

    /// True for errors caused by the submitted sequences rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PwmError::NoSequences
                | PwmError::LengthMismatch { .. }
                | PwmError::InvalidSequence { .. }
        )
    }
}
