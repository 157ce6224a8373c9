/*!
 * Error types for the cuekit application.
 *
 * Parsing and serializing never fail; these types only appear at the
 * boundaries (format tags typed by a user, files, lyric generators),
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when handling subtitle documents
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A format tag that names none of the supported formats
    #[error("Unknown subtitle format: {0}")]
    UnknownFormat(String),

    /// Input that could not be read as text
    #[error("Unreadable subtitle input: {0}")]
    Unreadable(String),
}

/// Errors reported by a lyric generator
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The generator could not be reached or rejected the request
    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    /// The generator answered with something that is not a cue list
    #[error("Invalid generator response: {0}")]
    InvalidResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle handling
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from a lyric generator
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
