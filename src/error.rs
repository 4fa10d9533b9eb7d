//! Error types for the `dji-geotag` crate.
//!
//! This module defines [`GeotagError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context to be
//! printed verbatim as the command-line diagnostic, including file paths and
//! the field names found in the offending record.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `dji-geotag` operations.
///
/// Every public function that can fail returns `Result<T, GeotagError>`.
/// Only the binary decides what to do with an error; the library never
/// prints or exits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeotagError {
    /// The command line did not contain exactly one SRT path.
    #[error("Usage: {program} <srt_file_path>")]
    Usage {
        /// Program name shown in the usage line.
        program: String,
    },

    /// The SRT file could not be read as text.
    #[error("Failed to read SRT file at {path}: {source}")]
    FileRead {
        /// Path passed on the command line.
        path: PathBuf,
        /// Underlying I/O failure (not found, permission, invalid UTF-8).
        #[source]
        source: IoError,
    },

    /// The metadata parser rejected the file contents.
    #[error("Failed to parse SRT file at {path}: {reason}")]
    Parse {
        /// Path of the file being parsed.
        path: PathBuf,
        /// Parser-provided description of the failure.
        reason: String,
    },

    /// The parser produced no metadata records at all.
    #[error("No metadata entries found in SRT file")]
    NoMetadataEntries,

    /// The first record lacks one of the required geotag fields.
    #[error(
        "Missing required fields ({}) in first SRT entry\nAvailable fields: {}",
        .required.join(", "),
        .available.join(", ")
    )]
    MissingFields {
        /// Field names that were required, in check order.
        required: Vec<String>,
        /// Field names actually present in the record, in record order.
        available: Vec<String>,
    },

    /// A required field was present but has no numeric value.
    #[error("Field {field} is not a number: {value:?}")]
    InvalidNumber {
        /// Source field name.
        field: String,
        /// Raw value as found in the record.
        value: String,
    },
}

impl GeotagError {
    /// Build a [`GeotagError::Parse`] for `path`.
    pub fn parse<P: Into<PathBuf>, R: ToString>(path: P, reason: R) -> Self {
        GeotagError::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
