//! Model instances, collections, and the top-level document.

mod collections;
mod record;
mod value;

pub use collections::{RecordList, RecordMap};
pub use record::{Record, UnknownPair, WirePairs};
pub use value::{Limit, Value};

use serde::ser::{Serialize, Serializer};

use crate::errors::Error;
use crate::schema::Schema;

/// One `Include` directive, in source order relative to other includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IncludeEntry {
    pub path: String,
    /// True when the directive itself came from an included file, in which
    /// case it belongs to that file and is not serialized here.
    pub from_include: bool,
}

/// A configuration document: the root record plus its `Include` directives.
///
/// Dereferences to [`Record`], so field access goes straight through the
/// generic get/set/delete API.
#[derive(Debug, Clone)]
pub struct Document {
    root: Record,
    includes: Vec<IncludeEntry>,
}

impl Document {
    /// Empty document for `schema`.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            root: Record::new(schema),
            includes: Vec::new(),
        }
    }

    /// The root record.
    pub fn record(&self) -> &Record {
        &self.root
    }

    /// The root record, mutable.
    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.root
    }

    /// Include paths this document declares itself, in source order.
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes
            .iter()
            .filter(|entry| !entry.from_include)
            .map(|entry| entry.path.as_str())
    }

    /// Append an `Include` directive.
    pub fn add_include(&mut self, path: impl Into<String>) {
        self.includes.push(IncludeEntry {
            path: path.into(),
            from_include: false,
        });
    }

    /// Remove the first `Include` directive matching `path`.
    pub fn remove_include(&mut self, path: &str) -> bool {
        match self
            .includes
            .iter()
            .position(|entry| !entry.from_include && entry.path == path)
        {
            Some(idx) => {
                self.includes.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether the document holds no content at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.includes.is_empty()
    }

    /// JSON object form, with declared include paths under `"include"`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = self.root.to_json();
        let own: Vec<_> = self.includes().map(serde_json::Value::from).collect();
        if let (serde_json::Value::Object(object), false) = (&mut json, own.is_empty()) {
            object.insert("include".to_string(), serde_json::Value::Array(own));
        }
        json
    }

    /// JSON text form of [`Document::to_json`].
    pub fn json(&self) -> String {
        self.to_json().to_string()
    }

    /// Rebuild a document from its JSON object form.
    pub fn from_json(schema: &'static Schema, json: &serde_json::Value) -> Result<Self, Error> {
        let mut json = json.clone();
        let mut includes = Vec::new();
        if let serde_json::Value::Object(object) = &mut json {
            if let Some(serde_json::Value::Array(paths)) = object.remove("include") {
                for path in paths {
                    if let serde_json::Value::String(path) = path {
                        includes.push(IncludeEntry {
                            path,
                            from_include: false,
                        });
                    }
                }
            }
        }
        Ok(Self {
            root: Record::from_json(schema, &json)?,
            includes,
        })
    }

    pub(crate) fn push_include(&mut self, path: String, from_include: bool) {
        self.includes.push(IncludeEntry { path, from_include });
    }

    pub(crate) fn include_entries(&self) -> &[IncludeEntry] {
        &self.includes
    }
}

impl std::ops::Deref for Document {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.root
    }
}

impl std::ops::DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Record {
        &mut self.root
    }
}

/// Documents are equal when their records are equal and they declare the
/// same include paths in the same order.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.includes.len() == other.includes.len()
            && self
                .includes
                .iter()
                .zip(other.includes.iter())
                .all(|(a, b)| a.path == b.path)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
