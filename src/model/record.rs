//! Generic schema-backed record.
//!
//! A [`Record`] is the polymorphic model instance behind every dialect:
//! a map from declared field name to typed value, where a field that was
//! never set is absent rather than defaulted. All mutation goes through the
//! schema table, so a record can never hold a value its schema did not
//! coerce.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::ser::{Serialize, Serializer};

use crate::errors::Error;
use crate::schema::{
    coerce, FieldDef, FieldShape, Schema, SchemaError, SchemaResult, ValidationError,
    ValidationResult,
};

use super::collections::{RecordList, RecordMap};
use super::value::{Limit, Value};

/// An unrecognized `Key=Value` pair preserved in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPair {
    /// Key exactly as spelled in the source.
    pub key: String,
    /// Raw value text, uncoerced.
    pub raw: String,
    pub(crate) from_include: bool,
}

/// A model instance: typed field values validated against a schema.
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static Schema,
    values: HashMap<&'static str, Value>,
    include_fields: HashSet<&'static str>,
    include_items: HashMap<&'static str, Vec<bool>>,
    unknown: Vec<UnknownPair>,
    from_include: bool,
}

impl Record {
    /// Empty record for `schema`; every field starts absent.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            include_fields: HashSet::new(),
            include_items: HashMap::new(),
            unknown: Vec::new(),
            from_include: false,
        }
    }

    /// Schema this record is validated against.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Typed value of a declared field, or `None` if absent.
    ///
    /// Fails only for fields the schema does not declare.
    pub fn get(&self, field: &str) -> SchemaResult<Option<&Value>> {
        let def = self.schema.require(field)?;
        Ok(self.values.get(def.name))
    }

    /// String value of a declared scalar string field.
    pub fn get_str(&self, field: &str) -> SchemaResult<Option<&str>> {
        Ok(self.get(field)?.and_then(Value::as_str))
    }

    /// Integer value of a declared integer field.
    pub fn get_int(&self, field: &str) -> SchemaResult<Option<i64>> {
        Ok(self.get(field)?.and_then(Value::as_int))
    }

    /// Float value of a declared float field.
    pub fn get_float(&self, field: &str) -> SchemaResult<Option<f64>> {
        Ok(self.get(field)?.and_then(Value::as_float))
    }

    /// Boolean value of a declared boolean field.
    pub fn get_bool(&self, field: &str) -> SchemaResult<Option<bool>> {
        Ok(self.get(field)?.and_then(Value::as_bool))
    }

    /// Limit value of a declared numeric-or-sentinel field.
    pub fn get_limit(&self, field: &str) -> SchemaResult<Option<Limit>> {
        Ok(self.get(field)?.and_then(Value::as_limit))
    }

    /// Set a declared field, coercing and validating against its shape.
    ///
    /// An explicit set marks the field as this document's own content even
    /// if the previous value came from an included file.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), Error> {
        let def = *self.schema.require(field)?;
        let checked = coerce::check(&def, value.into())?;
        self.include_fields.remove(def.name);
        self.include_items.remove(def.name);
        self.values.insert(def.name, checked);
        Ok(())
    }

    /// Clear a declared field back to absent.
    ///
    /// Deleting an absent field is a no-op, not an error, so edit sessions
    /// can unconditionally clear optional directives.
    pub fn delete(&mut self, field: &str) -> SchemaResult<()> {
        let def = self.schema.require(field)?;
        self.values.remove(def.name);
        self.include_fields.remove(def.name);
        self.include_items.remove(def.name);
        Ok(())
    }

    /// Whether a declared field holds an explicit value.
    pub fn is_set(&self, field: &str) -> SchemaResult<bool> {
        let def = self.schema.require(field)?;
        Ok(self.values.contains_key(def.name))
    }

    /// Whether no field is set and no unknown pair is held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.unknown.is_empty()
    }

    /// Nested record list of a `ModelList` field, if present.
    pub fn records(&self, field: &str) -> SchemaResult<Option<&RecordList>> {
        let def = self.schema.require(field)?;
        match def.shape {
            FieldShape::ModelList(_) => Ok(self.values.get(def.name).and_then(Value::as_records)),
            _ => Err(self.wrong_shape(def, "a nested model list")),
        }
    }

    /// Nested record list of a `ModelList` field, created empty on first
    /// access so callers can push into it.
    pub fn records_mut(&mut self, field: &str) -> SchemaResult<&mut RecordList> {
        let def = *self.schema.require(field)?;
        let FieldShape::ModelList(schema) = def.shape else {
            return Err(self.wrong_shape(&def, "a nested model list"));
        };
        let value = self
            .values
            .entry(def.name)
            .or_insert_with(|| Value::Records(RecordList::new(schema())));
        match value {
            Value::Records(list) => Ok(list),
            _ => unreachable!("ModelList field holds a non-Records value"),
        }
    }

    /// Nested record mapping of a `ModelMap` field, if present.
    pub fn record_map(&self, field: &str) -> SchemaResult<Option<&RecordMap>> {
        let def = self.schema.require(field)?;
        match def.shape {
            FieldShape::ModelMap(_) => {
                Ok(self.values.get(def.name).and_then(Value::as_record_map))
            }
            _ => Err(self.wrong_shape(def, "a nested model mapping")),
        }
    }

    /// Nested record mapping of a `ModelMap` field, created empty on first
    /// access so callers can insert into it.
    pub fn record_map_mut(&mut self, field: &str) -> SchemaResult<&mut RecordMap> {
        let def = *self.schema.require(field)?;
        let FieldShape::ModelMap(schema) = def.shape else {
            return Err(self.wrong_shape(&def, "a nested model mapping"));
        };
        let value = self
            .values
            .entry(def.name)
            .or_insert_with(|| Value::RecordMap(RecordMap::new(schema())));
        match value {
            Value::RecordMap(map) => Ok(map),
            _ => unreachable!("ModelMap field holds a non-RecordMap value"),
        }
    }

    /// Unrecognized pairs preserved by a lenient parse, in file order.
    pub fn unknown(&self) -> &[UnknownPair] {
        &self.unknown
    }

    /// Rendered `(wire key, value)` pairs of this record's own scalar
    /// content, in schema declaration order.
    ///
    /// Skips absent fields, nested-model collections (the serializer renders
    /// those as blocks), and content merged from included files. Unknown
    /// pairs preserved by a lenient parse follow the declared fields. The
    /// iterator borrows the record and can be restarted by calling this
    /// method again.
    pub fn wire_pairs(&self) -> WirePairs<'_> {
        WirePairs {
            record: self,
            fields: self.schema.fields(),
            pending: VecDeque::new(),
            unknown: self.unknown.iter(),
        }
    }

    /// JSON object form of the record, unknown pairs included as raw
    /// strings.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for def in self.schema.fields() {
            if let Some(value) = self.values.get(def.name) {
                object.insert(def.name.to_string(), value.to_json());
            }
        }
        for pair in &self.unknown {
            object.insert(
                pair.key.clone(),
                serde_json::Value::String(pair.raw.clone()),
            );
        }
        serde_json::Value::Object(object)
    }

    /// Build a record from the JSON object form, validating every value
    /// against the schema.
    pub fn from_json(schema: &'static Schema, json: &serde_json::Value) -> Result<Self, Error> {
        let serde_json::Value::Object(object) = json else {
            return Err(ValidationError::new(
                schema.name(),
                json.to_string(),
                "a JSON object",
            )
            .into());
        };

        let mut record = Record::new(schema);
        for (key, value) in object {
            let def = *schema.require(key)?;
            match def.shape {
                FieldShape::ModelList(nested) => {
                    let serde_json::Value::Array(items) = value else {
                        return Err(
                            ValidationError::new(def.name, value.to_string(), "a JSON array")
                                .into(),
                        );
                    };
                    let list = record.records_mut(def.name)?;
                    for item in items {
                        list.push(Record::from_json(nested(), item)?)?;
                    }
                }
                FieldShape::ModelMap(nested) => {
                    let serde_json::Value::Object(items) = value else {
                        return Err(
                            ValidationError::new(def.name, value.to_string(), "a JSON object")
                                .into(),
                        );
                    };
                    let map = record.record_map_mut(def.name)?;
                    for item in items.values() {
                        map.insert(Record::from_json(nested(), item)?)?;
                    }
                }
                _ => {
                    let typed = coerce::from_json(&def, value)?;
                    record.values.insert(def.name, typed);
                }
            }
        }
        Ok(record)
    }

    /// Apply one wire occurrence of a declared non-nested field.
    ///
    /// Repeated fields accumulate, each occurrence keeping its own include
    /// provenance. For single-valued fields the including file's own
    /// directive is authoritative over one merged from an include; a second
    /// occurrence with the same provenance is a multiplicity violation.
    pub(crate) fn apply_wire(
        &mut self,
        def: &FieldDef,
        raw: &str,
        from_include: bool,
    ) -> ValidationResult<()> {
        let decoded = coerce::decode(def, raw)?;

        if matches!(def.shape, FieldShape::Repeated(_)) {
            let entry = self
                .values
                .entry(def.name)
                .or_insert_with(|| Value::List(Vec::new()));
            if let Value::List(items) = entry {
                // A list built by `set` has no mask; pad with own-content
                // entries so indices stay aligned.
                let mask = self.include_items.entry(def.name).or_default();
                mask.resize(items.len(), false);
                mask.push(from_include);
                items.push(decoded);
            }
            return Ok(());
        }

        if self.values.contains_key(def.name) {
            let existing_from_include = self.include_fields.contains(def.name);
            return match (existing_from_include, from_include) {
                (true, false) => {
                    self.include_fields.remove(def.name);
                    self.values.insert(def.name, decoded);
                    Ok(())
                }
                (false, true) => Ok(()),
                _ => Err(ValidationError::new(
                    def.name,
                    raw,
                    "a single occurrence of this key",
                )),
            };
        }
        self.values.insert(def.name, decoded);
        if from_include {
            self.include_fields.insert(def.name);
        }
        Ok(())
    }

    pub(crate) fn push_unknown(&mut self, key: String, raw: String, from_include: bool) {
        self.unknown.push(UnknownPair {
            key,
            raw,
            from_include,
        });
    }

    pub(crate) fn field_from_include(&self, name: &str) -> bool {
        self.include_fields.contains(name)
    }

    pub(crate) fn mark_block_include(&mut self) {
        self.from_include = true;
    }

    pub(crate) fn block_from_include(&self) -> bool {
        self.from_include
    }

    pub(crate) fn value_of(&self, name: &'static str) -> Option<&Value> {
        self.values.get(name)
    }

    fn wrong_shape(&self, def: &FieldDef, expected: &'static str) -> SchemaError {
        SchemaError::WrongShape {
            field: def.name.to_string(),
            model: self.schema.name(),
            expected,
        }
    }
}

/// Model equality: every declared field (absent compared against absent) and
/// every preserved unknown pair must match. Include provenance is ignored;
/// where a value came from does not change what it is.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.values == other.values
            && self.unknown.len() == other.unknown.len()
            && self
                .unknown
                .iter()
                .zip(other.unknown.iter())
                .all(|(a, b)| a.key == b.key && a.raw == b.raw)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Iterator over a record's rendered wire pairs. See [`Record::wire_pairs`].
pub struct WirePairs<'a> {
    record: &'a Record,
    fields: std::slice::Iter<'a, FieldDef>,
    pending: VecDeque<(String, String)>,
    unknown: std::slice::Iter<'a, UnknownPair>,
}

impl Iterator for WirePairs<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.pending.pop_front() {
                return Some(pair);
            }

            match self.fields.next() {
                Some(def) => {
                    if matches!(
                        def.shape,
                        FieldShape::ModelList(_) | FieldShape::ModelMap(_)
                    ) || self.record.field_from_include(def.name)
                    {
                        continue;
                    }
                    let Some(value) = self.record.values.get(def.name) else {
                        continue;
                    };
                    match (&def.shape, value) {
                        (FieldShape::Repeated(_), Value::List(items)) => {
                            let mask = self.record.include_items.get(def.name);
                            for (idx, item) in items.iter().enumerate() {
                                let merged =
                                    mask.and_then(|m| m.get(idx)).copied().unwrap_or(false);
                                if merged {
                                    continue;
                                }
                                self.pending
                                    .push_back((def.wire.to_string(), coerce::encode(def, item)));
                            }
                        }
                        _ => {
                            return Some((def.wire.to_string(), coerce::encode(def, value)));
                        }
                    }
                }
                None => {
                    // Declared fields exhausted; drain preserved unknowns.
                    for pair in self.unknown.by_ref() {
                        if !pair.from_include {
                            return Some((pair.key.clone(), pair.raw.clone()));
                        }
                    }
                    return None;
                }
            }
        }
    }
}
