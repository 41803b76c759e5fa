//! The `gres.conf` dialect: generic resource declarations.
//!
//! Each `Name=` line declares one resource; several lines may share a name
//! (one per device file, for example), so the collection is an ordered list
//! rather than a name-keyed mapping.

use std::sync::OnceLock;

use super::dialect_file;
use crate::model::RecordList;
use crate::schema::{FieldDef, Schema, SchemaResult};

fn gres_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "Gres",
            vec![
                FieldDef::str("name", "Name").primary(),
                FieldDef::str("auto_detect", "AutoDetect"),
                FieldDef::str("count", "Count"),
                FieldDef::list("cores", "Cores"),
                FieldDef::str("file", "File"),
                FieldDef::list("flags", "Flags"),
                FieldDef::list("links", "Links"),
                FieldDef::list("multiple_files", "MultipleFiles"),
                FieldDef::str("node_name", "NodeName"),
                FieldDef::str("type", "Type"),
            ],
        )
    })
}

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "gres.conf",
            vec![
                FieldDef::str("auto_detect", "AutoDetect"),
                FieldDef::model_list("gres", "Name", gres_schema),
            ],
        )
    })
}

dialect_file!(
    /// Typed view of a `gres.conf` file.
    GresConfig,
    "gres.conf"
);

impl GresConfig {
    /// Resource declarations, in file order.
    pub fn gres(&self) -> SchemaResult<Option<&RecordList>> {
        self.doc.records("gres")
    }

    /// Resource declarations, created empty on first access.
    pub fn gres_mut(&mut self) -> SchemaResult<&mut RecordList> {
        self.doc.records_mut("gres")
    }
}

/// Schema of a single resource declaration.
pub fn gres_entry() -> &'static Schema {
    gres_schema()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_keep_separate_entries() {
        let text = "AutoDetect=nvml\n\
                    Name=gpu File=/dev/nvidia0 Type=a100\n\
                    Name=gpu File=/dev/nvidia1 Type=a100\n\
                    Name=mps Count=100\n";
        let config = loads(text).unwrap();

        assert_eq!(config.get_str("auto_detect").unwrap(), Some("nvml"));
        let gres = config.gres().unwrap().unwrap();
        assert_eq!(gres.len(), 3, "same-name declarations do not merge");
        assert_eq!(
            gres.get(1).unwrap().get_str("file").unwrap(),
            Some("/dev/nvidia1")
        );
        assert_eq!(dumps(&config), text);
    }
}
