//! Error types for linestore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for linestore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored line is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("file accessor used after close")]
    Closed,

    #[error("failed to open the file {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: Box<StoreError>,
    },

    #[error("failed to read the file")]
    LineReading {
        #[source]
        source: Box<StoreError>,
    },

    // -------------------------------------------------------------------------
    // Line Format Errors
    // -------------------------------------------------------------------------
    #[error("cannot find object id at line {line}")]
    MissedObjectId { line: usize },

    #[error("cannot parse object id at line {line}")]
    CorruptedObjectId { line: usize },

    #[error("cannot find object data at line {line}")]
    MissedObjectData { line: usize },

    // -------------------------------------------------------------------------
    // Operation Errors
    // -------------------------------------------------------------------------
    #[error("failed to fetch the object string: {0}")]
    LineFetching(String),

    #[error("failed to persist the object string")]
    LinePersistence {
        #[source]
        source: Box<StoreError>,
    },

    #[error("failed to modify the file")]
    LineModification {
        #[source]
        source: Box<StoreError>,
    },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("failed to serialize a {type_name} entity")]
    Serialization { type_name: &'static str },

    #[error("failed to deserialize a {type_name} entity")]
    Deserialization { type_name: &'static str },

    #[error("a codec for {type_name} is already registered")]
    CodecAlreadyRegistered { type_name: &'static str },

    #[error("no codec registered for {type_name}")]
    CodecNotRegistered { type_name: &'static str },

    // -------------------------------------------------------------------------
    // Argument Validation
    // -------------------------------------------------------------------------
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    /// Wrap an error raised while opening the store file.
    pub(crate) fn file_open(path: impl Into<PathBuf>, source: StoreError) -> Self {
        StoreError::FileOpen {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a low-level error raised while reading lines during a scan.
    ///
    /// Line-format errors already carry their own reason and pass through
    /// untouched.
    pub(crate) fn line_reading(source: StoreError) -> Self {
        match source {
            e @ (StoreError::MissedObjectId { .. }
            | StoreError::CorruptedObjectId { .. }
            | StoreError::MissedObjectData { .. }) => e,
            e => StoreError::LineReading {
                source: Box::new(e),
            },
        }
    }

    /// Wrap an error raised while replacing or removing a matched line.
    pub(crate) fn line_persistence(source: StoreError) -> Self {
        StoreError::LinePersistence {
            source: Box::new(source),
        }
    }

    /// Wrap a low-level error raised while mutating the file.
    pub(crate) fn line_modification(source: StoreError) -> Self {
        match source {
            e @ (StoreError::MissedObjectId { .. }
            | StoreError::CorruptedObjectId { .. }
            | StoreError::MissedObjectData { .. }
            | StoreError::LinePersistence { .. }) => e,
            e => StoreError::LineModification {
                source: Box::new(e),
            },
        }
    }
}
