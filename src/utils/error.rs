//! Error types for the drawable transcoder.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing density names and range expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DensityError {
    /// Expression is not of the form `<lower>-<upper>`
    #[error("Malformed density range '{0}': expected <lower>-<upper>, e.g. mdpi-xhdpi")]
    MalformedRange(String),
    /// Name does not match any density bucket
    #[error("Unknown density: {0}")]
    UnknownName(String),
}

/// Errors reported by a rasterization backend.
///
/// I/O failures are split by direction so the transcoder can tell an
/// unreadable source from an unwritable destination.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Reading the SVG stream failed
    #[error("Failed to read SVG input: {0}")]
    Read(#[source] io::Error),
    /// Writing the PNG stream failed
    #[error("Failed to write PNG output: {0}")]
    Write(#[source] io::Error),
    /// The SVG document could not be parsed
    #[error("Failed to parse SVG: {0}")]
    Parse(#[from] resvg::usvg::Error),
    /// The requested output size is not representable as a pixmap
    #[error("Invalid output size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
    /// PNG encoding failed
    #[error("Failed to encode PNG: {0}")]
    Encode(String),
}

/// Main error type for the transcoder.
///
/// Every failure is fatal to the running batch; callers decide how to report it.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// Density name or range expression was rejected
    #[error(transparent)]
    Density(#[from] DensityError),

    /// No base width (or a zero width) was configured
    #[error("A non-zero width must be specified")]
    MissingWidth,

    /// The source file could not be opened or read
    #[error("Cannot read source '{}': {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination file or its directory could not be written
    #[error("Cannot write destination '{}': {source}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backend rejected the source or failed to produce a raster
    #[error("Rasterization of '{}' failed: {source}", path.display())]
    RasterizationFailed {
        path: PathBuf,
        #[source]
        source: RasterError,
    },

    /// An include pattern did not compile
    #[error("Invalid include pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration could not be loaded or is incomplete
    #[error("Configuration error: {0}")]
    Config(String),

    /// A pooled worker died before reporting
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience result type for transcoder operations.
pub type TranscodeResult<T> = Result<T, TranscodeError>;

// Helper methods for error creation
impl TranscodeError {
    pub fn source_unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceUnreadable { path: path.into(), source }
    }

    pub fn destination_unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DestinationUnwritable { path: path.into(), source }
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}

impl From<tokio::sync::AcquireError> for TranscodeError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        TranscodeError::Worker(format!("Failed to acquire worker: {}", err))
    }
}

impl From<tokio::task::JoinError> for TranscodeError {
    fn from(err: tokio::task::JoinError) -> Self {
        TranscodeError::Worker(format!("Task panicked: {}", err))
    }
}
