//! Declarative field schema for configuration models.
//!
//! Each dialect describes its fields with a [`Schema`]: an ordered table of
//! [`FieldDef`] entries mapping a snake_case field name to the wire spelling
//! used on disk, plus the value shape the coercion layer enforces. Schemas
//! are built once per dialect and looked up through `std::sync::OnceLock`
//! registries in `dialects::*`.

use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};

/// Token vocabulary for boolean fields.
///
/// Slurm is not consistent: `slurm.conf` uses `YES`/`NO` for most flags but
/// `0`/`1` for a handful (`JobRequeue`, `KillOnBadExit`, ...), and
/// `oci.conf` uses `true`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolStyle {
    /// `true` / `false`
    TrueFalse,
    /// `yes` / `no`
    YesNo,
    /// `1` / `0`
    OneZero,
}

/// Primitive coercion kind of a scalar token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string, kept verbatim.
    Str,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Boolean with a declared token vocabulary.
    Bool(BoolStyle),
    /// Integer or the sentinel tokens `UNLIMITED` / `INFINITE`.
    Limit,
}

impl FieldKind {
    /// Expected-shape description used in validation errors.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Str => "a string",
            FieldKind::Int => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Bool(BoolStyle::TrueFalse) => "true or false",
            FieldKind::Bool(BoolStyle::YesNo) => "yes or no",
            FieldKind::Bool(BoolStyle::OneZero) => "0 or 1",
            FieldKind::Limit => "an integer, UNLIMITED, or INFINITE",
        }
    }
}

/// Separators for key=value multi-maps embedded in a single value token,
/// e.g. `AuthAltParameters=jwt_key=/keys/jwt.key,disable_token_creation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapFormat {
    /// Separator between entries.
    pub item_sep: char,
    /// Separator between a key and its value.
    pub pair_sep: char,
    /// Separator for array values inside one entry, if the field allows them.
    pub array_sep: Option<char>,
}

impl MapFormat {
    /// `k=v,k=v` with comma arrays: the common slurm.conf parameter format.
    pub const COMMA: MapFormat = MapFormat {
        item_sep: ',',
        pair_sep: '=',
        array_sep: Some(','),
    };
    /// `k:v,k:v`, used by fields such as `JobAcctGatherFrequency`.
    pub const COMMA_COLON: MapFormat = MapFormat {
        item_sep: ',',
        pair_sep: ':',
        array_sep: Some(','),
    };
    /// `k=v,k=v` with colon-separated arrays.
    pub const COMMA_COLON_ARRAY: MapFormat = MapFormat {
        item_sep: ',',
        pair_sep: '=',
        array_sep: Some(':'),
    };
    /// `k=v;k=v` with comma arrays.
    pub const SEMICOLON: MapFormat = MapFormat {
        item_sep: ';',
        pair_sep: '=',
        array_sep: Some(','),
    };
}

/// Function returning the schema of a nested model.
///
/// A function pointer rather than a reference so dialect tables can refer to
/// schemas that are lazily initialized in any order.
pub type SchemaRef = fn() -> &'static Schema;

/// Value shape of a field. Immutable once declared.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    /// Single scalar token.
    Scalar(FieldKind),
    /// Separator-joined list of scalars inside one token.
    List {
        /// Element kind.
        kind: FieldKind,
        /// Element separator, `,` or `:`.
        sep: char,
    },
    /// Same key repeated across lines, accumulated in file order.
    Repeated(FieldKind),
    /// Embedded key=value multi-map inside one token.
    Map(MapFormat),
    /// Repeated nested-model blocks, order preserved, duplicates allowed.
    ModelList(SchemaRef),
    /// Repeated nested-model blocks keyed by the nested schema's primary
    /// field; duplicate keys replace.
    ModelMap(SchemaRef),
}

/// Nested shapes compare by the schema the function resolves to, not by
/// function pointer; pointer addresses are not unique across codegen units.
impl PartialEq for FieldShape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldShape::Scalar(a), FieldShape::Scalar(b)) => a == b,
            (
                FieldShape::List { kind: a, sep: asep },
                FieldShape::List { kind: b, sep: bsep },
            ) => a == b && asep == bsep,
            (FieldShape::Repeated(a), FieldShape::Repeated(b)) => a == b,
            (FieldShape::Map(a), FieldShape::Map(b)) => a == b,
            (FieldShape::ModelList(a), FieldShape::ModelList(b)) => std::ptr::eq(a(), b()),
            (FieldShape::ModelMap(a), FieldShape::ModelMap(b)) => std::ptr::eq(a(), b()),
            _ => false,
        }
    }
}

impl Eq for FieldShape {}

impl FieldShape {
    /// Expected-shape description used in validation errors.
    pub fn describe(&self) -> String {
        match self {
            FieldShape::Scalar(kind) => kind.describe().to_string(),
            FieldShape::List { kind, sep } => {
                format!("a `{sep}`-separated list of {}", plural(kind))
            }
            FieldShape::Repeated(kind) => format!("one or more {}", plural(kind)),
            FieldShape::Map(_) => "a key=value parameter list".to_string(),
            FieldShape::ModelList(schema) => format!("a list of `{}` entries", schema().name()),
            FieldShape::ModelMap(schema) => format!("a mapping of `{}` entries", schema().name()),
        }
    }
}

fn plural(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Str => "strings",
        FieldKind::Int => "integers",
        FieldKind::Float => "numbers",
        FieldKind::Bool(_) => "booleans",
        FieldKind::Limit => "limits",
    }
}

/// Declared schema entry for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// snake_case name used by the record API.
    pub name: &'static str,
    /// Canonical on-disk spelling of the key.
    pub wire: &'static str,
    /// Value shape.
    pub shape: FieldShape,
    /// Wrap the rendered value in double quotes (reason fields and friends).
    pub quote: bool,
    /// Leads the line when the containing model is rendered as a block.
    pub primary: bool,
}

impl FieldDef {
    const fn new(name: &'static str, wire: &'static str, shape: FieldShape) -> Self {
        Self {
            name,
            wire,
            shape,
            quote: false,
            primary: false,
        }
    }

    /// Scalar string field.
    pub const fn str(name: &'static str, wire: &'static str) -> Self {
        Self::new(name, wire, FieldShape::Scalar(FieldKind::Str))
    }

    /// Scalar integer field.
    pub const fn int(name: &'static str, wire: &'static str) -> Self {
        Self::new(name, wire, FieldShape::Scalar(FieldKind::Int))
    }

    /// Scalar float field.
    pub const fn float(name: &'static str, wire: &'static str) -> Self {
        Self::new(name, wire, FieldShape::Scalar(FieldKind::Float))
    }

    /// Boolean field written as `yes`/`no`.
    pub const fn yes_no(name: &'static str, wire: &'static str) -> Self {
        Self::new(name, wire, FieldShape::Scalar(FieldKind::Bool(BoolStyle::YesNo)))
    }

    /// Boolean field written as `true`/`false`.
    pub const fn true_false(name: &'static str, wire: &'static str) -> Self {
        Self::new(
            name,
            wire,
            FieldShape::Scalar(FieldKind::Bool(BoolStyle::TrueFalse)),
        )
    }

    /// Boolean field written as `1`/`0`.
    pub const fn one_zero(name: &'static str, wire: &'static str) -> Self {
        Self::new(
            name,
            wire,
            FieldShape::Scalar(FieldKind::Bool(BoolStyle::OneZero)),
        )
    }

    /// Integer-or-sentinel field (`UNLIMITED`/`INFINITE`).
    pub const fn limit(name: &'static str, wire: &'static str) -> Self {
        Self::new(name, wire, FieldShape::Scalar(FieldKind::Limit))
    }

    /// Comma-separated list of strings.
    pub const fn list(name: &'static str, wire: &'static str) -> Self {
        Self::new(
            name,
            wire,
            FieldShape::List {
                kind: FieldKind::Str,
                sep: ',',
            },
        )
    }

    /// Colon-separated list of strings (`PluginDir` and similar paths).
    pub const fn colon_list(name: &'static str, wire: &'static str) -> Self {
        Self::new(
            name,
            wire,
            FieldShape::List {
                kind: FieldKind::Str,
                sep: ':',
            },
        )
    }

    /// Embedded key=value parameter map.
    pub const fn map(name: &'static str, wire: &'static str, format: MapFormat) -> Self {
        Self::new(name, wire, FieldShape::Map(format))
    }

    /// Key that may repeat across lines, accumulating string values.
    pub const fn repeated(name: &'static str, wire: &'static str) -> Self {
        Self::new(name, wire, FieldShape::Repeated(FieldKind::Str))
    }

    /// Ordered collection of nested-model blocks.
    pub const fn model_list(name: &'static str, wire: &'static str, schema: SchemaRef) -> Self {
        Self::new(name, wire, FieldShape::ModelList(schema))
    }

    /// Primary-keyed collection of nested-model blocks.
    pub const fn model_map(name: &'static str, wire: &'static str, schema: SchemaRef) -> Self {
        Self::new(name, wire, FieldShape::ModelMap(schema))
    }

    /// Quote the rendered value.
    pub const fn quoted(mut self) -> Self {
        self.quote = true;
        self
    }

    /// Mark as the block-leading (name) field of the model.
    pub const fn primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

/// Ordered field table of one model, with case-insensitive wire lookup.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldDef>,
    by_name: HashMap<&'static str, usize>,
    by_wire: HashMap<String, usize>,
    primary: Option<usize>,
}

impl Schema {
    /// Build a schema from an ordered field list.
    ///
    /// Panics on duplicate field or wire names; dialect tables are static
    /// data and a duplicate is a bug in the table, not a runtime condition.
    pub fn new(name: &'static str, fields: Vec<FieldDef>) -> Self {
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut by_wire = HashMap::with_capacity(fields.len());
        let mut primary = None;

        for (idx, field) in fields.iter().enumerate() {
            if by_name.insert(field.name, idx).is_some() {
                panic!("schema `{name}`: duplicate field name `{}`", field.name);
            }
            if by_wire.insert(field.wire.to_ascii_lowercase(), idx).is_some() {
                panic!("schema `{name}`: duplicate wire name `{}`", field.wire);
            }
            if field.primary {
                if primary.is_some() {
                    panic!("schema `{name}`: more than one primary field");
                }
                primary = Some(idx);
            }
        }

        Self {
            name,
            fields,
            by_name,
            by_wire,
            primary,
        }
    }

    /// Model name, e.g. `slurm.conf` or `Node`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> std::slice::Iter<'_, FieldDef> {
        self.fields.iter()
    }

    /// Look up by snake_case field name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Look up by wire key, case-insensitive.
    pub fn field_by_wire(&self, key: &str) -> Option<&FieldDef> {
        self.by_wire
            .get(&key.to_ascii_lowercase())
            .map(|&idx| &self.fields[idx])
    }

    /// Look up by field name, falling back to the wire spelling, or fail
    /// with [`SchemaError::UnknownField`].
    pub fn require(&self, name: &str) -> SchemaResult<&FieldDef> {
        self.field(name)
            .or_else(|| self.field_by_wire(name))
            .ok_or_else(|| SchemaError::UnknownField {
                field: name.to_string(),
                model: self.name,
            })
    }

    /// The block-leading (name) field, if the model declares one.
    pub fn primary(&self) -> Option<&FieldDef> {
        self.primary.map(|idx| &self.fields[idx])
    }
}
