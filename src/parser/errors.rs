//! Parse failure modes, each carrying the file path and line number that
//! triggered it.

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A configuration source could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A logical line matched neither `Key=Value` nor a known bare
    /// directive.
    #[error("{path}:{line}: unparseable line: `{text}`")]
    UnparseableLine {
        /// Source path, or `<string>` for in-memory text.
        path: String,
        /// 1-based line number of the logical line.
        line: usize,
        /// The offending text.
        text: String,
    },

    /// A key is not declared in the schema (strict mode only; lenient mode
    /// preserves the pair instead).
    #[error("{path}:{line}: unknown key `{key}`")]
    UnknownKey {
        /// Source path.
        path: String,
        /// 1-based line number.
        line: usize,
        /// Key as spelled in the source.
        key: String,
    },

    /// An `Include` chain visited the same file twice.
    #[error("{path}:{line}: cyclic include of `{target}`")]
    CyclicInclude {
        /// File containing the offending directive.
        path: String,
        /// 1-based line number of the directive.
        line: usize,
        /// The file that would be re-entered.
        target: String,
    },

    /// An `Include` directive names a file the store cannot find.
    #[error("{path}:{line}: included file `{target}` not found")]
    MissingIncludeFile {
        /// File containing the directive.
        path: String,
        /// 1-based line number of the directive.
        line: usize,
        /// The missing path as written.
        target: String,
    },

    /// A value failed coercion against its declared field shape.
    #[error("{path}:{line}: {source}")]
    Validation {
        /// Source path.
        path: String,
        /// 1-based line number.
        line: usize,
        /// The underlying coercion failure.
        #[source]
        source: ValidationError,
    },
}
