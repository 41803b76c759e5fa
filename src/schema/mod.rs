//! Declarative field schemas and the coercion/validation layer.
//!
//! A [`Schema`] is plain data: an ordered table of [`FieldDef`] entries that
//! the generic record API consults on every get/set/delete and that the
//! parser and serializer consult for wire-format round-tripping. There is no
//! reflection anywhere; dialect tables in [`crate::dialects`] build their
//! schemas once and hand out `&'static` references.

pub mod coerce;
mod errors;
mod types;

pub use errors::{SchemaError, SchemaResult, ValidationError, ValidationResult};
pub use types::{BoolStyle, FieldDef, FieldKind, FieldShape, MapFormat, Schema, SchemaRef};
