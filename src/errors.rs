//! Crate-level error type.
//!
//! Each subsystem defines its own error enum; this type aggregates them for
//! the editor-facing API. I/O errors pass through untouched so callers can
//! still match on `std::io::ErrorKind` (permission denied vs. missing file
//! vs. disk full).

use thiserror::Error;

use crate::parser::ParseError;
use crate::schema::{SchemaError, ValidationError};

/// Errors surfaced by the crate-level load/dump/edit API.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown field or shape misuse at the API boundary.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A raw value did not match its declared field shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// File I/O failure, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
