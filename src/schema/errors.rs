//! Error types for the schema and coercion layer.

use thiserror::Error;

/// Result type for schema lookups.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for coercion and validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Misuse of a model's schema at the API boundary.
///
/// These are programmer errors: the caller asked for a field the schema does
/// not declare, or handed a collection where the schema declares a scalar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Requested field is not declared in the model's schema.
    #[error("unknown field `{field}` for `{model}`")]
    UnknownField {
        /// Field name as given by the caller.
        field: String,
        /// Schema (model) the lookup ran against.
        model: &'static str,
    },

    /// Field exists but is not the shape the operation requires.
    #[error("field `{field}` of `{model}` is not {expected}")]
    WrongShape {
        /// Field name as given by the caller.
        field: String,
        /// Schema (model) the lookup ran against.
        model: &'static str,
        /// Shape the operation needed, e.g. "a nested model mapping".
        expected: &'static str,
    },
}

/// A raw value failed coercion against its declared field shape.
///
/// Raised at parse time or set time, never deferred to serialization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value `{raw}` for field `{field}`: expected {expected}")]
pub struct ValidationError {
    /// Field the value was destined for.
    pub field: String,
    /// Raw value as seen on the wire or passed by the caller.
    pub raw: String,
    /// Human-readable description of the expected shape.
    pub expected: String,
}

impl ValidationError {
    pub(crate) fn new(
        field: impl Into<String>,
        raw: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            raw: raw.into(),
            expected: expected.into(),
        }
    }
}
