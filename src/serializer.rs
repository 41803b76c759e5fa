//! Rendering documents back to configuration text.
//!
//! Output is canonical rather than byte-preserving: `Include` directives
//! first, then scalar directives one per line in schema declaration order,
//! then nested blocks one record per line with the primary field leading.
//! Content merged from included files is not inlined; the `Include` line
//! that brought it in is re-emitted instead.

use crate::model::{Document, Record};
use crate::schema::FieldShape;

/// Render a document to configuration text.
///
/// The result ends with a newline unless the document is empty. Parsing the
/// result yields a document equal to the input.
pub fn dumps(doc: &Document) -> String {
    let mut out = String::new();

    for path in doc.includes() {
        out.push_str("Include ");
        out.push_str(path);
        out.push('\n');
    }

    for (key, value) in doc.record().wire_pairs() {
        out.push_str(&key);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }

    for def in doc.record().schema().fields() {
        match def.shape {
            FieldShape::ModelList(_) => {
                if let Ok(Some(list)) = doc.record().records(def.name) {
                    for record in list.iter() {
                        push_block(&mut out, record);
                    }
                }
            }
            FieldShape::ModelMap(_) => {
                if let Ok(Some(map)) = doc.record().record_map(def.name) {
                    for (_, record) in map.iter() {
                        push_block(&mut out, record);
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// One nested record as a single line, primary field first.
fn push_block(out: &mut String, record: &Record) {
    if record.block_from_include() {
        return;
    }

    let mut pairs: Vec<(String, String)> = record.wire_pairs().collect();
    if let Some(primary) = record.schema().primary() {
        if let Some(pos) = pairs.iter().position(|(key, _)| key == primary.wire) {
            let pair = pairs.remove(pos);
            pairs.insert(0, pair);
        }
    }
    if pairs.is_empty() {
        return;
    }

    for (idx, (key, value)) in pairs.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::model::Record;
    use crate::schema::{FieldDef, Schema};

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new(
                "Node",
                vec![
                    FieldDef::str("node_name", "NodeName").primary(),
                    FieldDef::int("cpus", "CPUs"),
                    FieldDef::int("real_memory", "RealMemory"),
                ],
            )
        })
    }

    fn root_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new(
                "test.conf",
                vec![
                    FieldDef::str("cluster_name", "ClusterName"),
                    FieldDef::list("debug_flags", "DebugFlags"),
                    FieldDef::model_map("nodes", "NodeName", node_schema),
                ],
            )
        })
    }

    #[test]
    fn test_empty_document_renders_empty() {
        let doc = Document::new(root_schema());
        assert_eq!(dumps(&doc), "");
    }

    #[test]
    fn test_scalars_render_in_schema_order() {
        let mut doc = Document::new(root_schema());
        doc.set("debug_flags", vec!["backfill", "steps"]).unwrap();
        doc.set("cluster_name", "base").unwrap();
        assert_eq!(dumps(&doc), "ClusterName=base\nDebugFlags=backfill,steps\n");
    }

    #[test]
    fn test_blocks_render_one_per_line_primary_first() {
        let mut doc = Document::new(root_schema());
        doc.set("cluster_name", "base").unwrap();

        let mut node = Record::new(node_schema());
        node.set("cpus", 4i64).unwrap();
        node.set("node_name", "n1").unwrap();
        doc.record_mut()
            .record_map_mut("nodes")
            .unwrap()
            .insert(node)
            .unwrap();

        assert_eq!(
            dumps(&doc),
            "ClusterName=base\nNodeName=n1 CPUs=4\n"
        );
    }

    #[test]
    fn test_includes_render_before_directives() {
        let mut doc = Document::new(root_schema());
        doc.add_include("/etc/slurm/nodes.conf");
        doc.set("cluster_name", "base").unwrap();
        assert_eq!(
            dumps(&doc),
            "Include /etc/slurm/nodes.conf\nClusterName=base\n"
        );
    }
}
