//! Ordered collections of nested-model records.
//!
//! `RecordList` backs repeated blocks with no identity (`DownNodes`);
//! `RecordMap` backs blocks addressed by their primary field (`NodeName`,
//! `PartitionName`), where inserting a duplicate name replaces the existing
//! entry in place instead of appending a second block.

use std::collections::HashMap;

use crate::schema::{coerce, Schema, ValidationError, ValidationResult};

use super::record::Record;

/// Ordered list of records sharing one schema. Duplicates allowed, file
/// order preserved.
#[derive(Debug, Clone)]
pub struct RecordList {
    schema: &'static Schema,
    items: Vec<Record>,
}

impl RecordList {
    /// Empty list for records of `schema`.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            items: Vec::new(),
        }
    }

    /// Schema shared by every member.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Append a record, rejecting records built against another schema.
    pub fn push(&mut self, record: Record) -> ValidationResult<()> {
        self.check_schema(&record)?;
        self.items.push(record);
        Ok(())
    }

    /// Member count.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.items.get(index)
    }

    /// Mutable member at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.items.get_mut(index)
    }

    /// Remove and return the member at `index`, shifting the rest.
    pub fn remove(&mut self, index: usize) -> Option<Record> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drop all members.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Members in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.items.iter()
    }

    /// Members in order, mutable.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.items.iter_mut()
    }

    fn check_schema(&self, record: &Record) -> ValidationResult<()> {
        if std::ptr::eq(self.schema, record.schema()) {
            Ok(())
        } else {
            Err(ValidationError::new(
                self.schema.name(),
                record.schema().name(),
                format!("a `{}` record", self.schema.name()),
            ))
        }
    }
}

impl PartialEq for RecordList {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.items == other.items
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Insertion-ordered mapping of records keyed by their primary field value.
#[derive(Debug, Clone)]
pub struct RecordMap {
    schema: &'static Schema,
    entries: Vec<(String, Record)>,
    index: HashMap<String, usize>,
}

impl RecordMap {
    /// Empty mapping for records of `schema`.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Schema shared by every member.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Insert a record under its own primary field value.
    ///
    /// A record whose name matches an existing key replaces that entry in
    /// place and the replaced record is returned. A record without its
    /// primary field set cannot be addressed and is rejected.
    pub fn insert(&mut self, record: Record) -> ValidationResult<Option<Record>> {
        if !std::ptr::eq(self.schema, record.schema()) {
            return Err(ValidationError::new(
                self.schema.name(),
                record.schema().name(),
                format!("a `{}` record", self.schema.name()),
            ));
        }
        let key = self.key_of(&record)?;

        match self.index.get(&key) {
            Some(&idx) => {
                let (_, slot) = &mut self.entries[idx];
                Ok(Some(std::mem::replace(slot, record)))
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                Ok(None)
            }
        }
    }

    /// Record stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Mutable record stored under `key`.
    ///
    /// Mutating the primary field through this handle does not re-key the
    /// entry; remove and re-insert to rename.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        let idx = *self.index.get(key)?;
        Some(&mut self.entries[idx].1)
    }

    /// Remove and return the record under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Record> {
        let idx = self.index.remove(key)?;
        let (_, record) = self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(record)
    }

    /// Whether a record is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.entries.iter().map(|(key, rec)| (key.as_str(), rec))
    }

    /// Entries in insertion order, records mutable.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Record)> {
        self.entries.iter_mut().map(|(key, rec)| (key.as_str(), rec))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn key_of(&self, record: &Record) -> ValidationResult<String> {
        let primary = self.schema.primary().ok_or_else(|| {
            ValidationError::new(
                self.schema.name(),
                "",
                "a schema with a primary field to key the mapping",
            )
        })?;
        match record.get(primary.name).ok().flatten() {
            Some(value) => Ok(coerce::encode(primary, value)),
            None => Err(ValidationError::new(
                primary.name,
                "<absent>",
                "the primary field to be set before insertion",
            )),
        }
    }
}

impl PartialEq for RecordMap {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::schema::FieldDef;

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new(
                "Node",
                vec![
                    FieldDef::str("node_name", "NodeName").primary(),
                    FieldDef::int("cpus", "CPUs"),
                ],
            )
        })
    }

    fn node(name: &str, cpus: i64) -> Record {
        let mut rec = Record::new(node_schema());
        rec.set("node_name", name).unwrap();
        rec.set("cpus", cpus).unwrap();
        rec
    }

    #[test]
    fn test_map_insert_replaces_duplicate_key_in_place() {
        let mut map = RecordMap::new(node_schema());
        map.insert(node("a", 1)).unwrap();
        map.insert(node("b", 2)).unwrap();
        let replaced = map.insert(node("a", 8)).unwrap();
        assert!(replaced.is_some());

        assert_eq!(map.len(), 2);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            map.get("a").unwrap().get("cpus").unwrap().unwrap().as_int(),
            Some(8)
        );
    }

    #[test]
    fn test_map_rejects_record_without_primary() {
        let mut map = RecordMap::new(node_schema());
        let mut rec = Record::new(node_schema());
        rec.set("cpus", 4i64).unwrap();
        assert!(map.insert(rec).is_err());
    }

    #[test]
    fn test_map_remove_keeps_index_consistent() {
        let mut map = RecordMap::new(node_schema());
        map.insert(node("a", 1)).unwrap();
        map.insert(node("b", 2)).unwrap();
        map.insert(node("c", 3)).unwrap();

        assert!(map.remove("b").is_some());
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("c").unwrap().get("cpus").unwrap().unwrap().as_int(),
            Some(3)
        );
    }

    #[test]
    fn test_list_preserves_order() {
        let mut list = RecordList::new(node_schema());
        list.push(node("a", 1)).unwrap();
        list.push(node("a", 2)).unwrap();
        assert_eq!(list.len(), 2);
        let cpus: Vec<_> = list
            .iter()
            .map(|rec| rec.get("cpus").unwrap().unwrap().as_int().unwrap())
            .collect();
        assert_eq!(cpus, vec![1, 2]);
    }
}
