// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Whole-document import and export

use super::PartitionDocument;
use crate::data::{Edge, Node, Value};
use crate::graph::{GraphError, GraphManager, GraphResult};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Import a partition document into a partition
///
/// Nodes are stored first, then edges, each in document order. The first
/// entity which cannot be stored aborts the import; everything stored before
/// it remains stored.
pub fn import_partition<R: Read>(
    reader: R,
    partition: &str,
    gm: &GraphManager,
) -> GraphResult<()> {
    let document: PartitionDocument =
        serde_json::from_reader(reader).map_err(|e| GraphError::Decode(e.to_string()))?;

    debug!(
        "Importing {} nodes and {} edges into partition '{}'",
        document.nodes.len(),
        document.edges.len(),
        partition
    );

    for object in document.nodes {
        gm.store_node(partition, &Node::from_json(object))?;
    }
    for object in document.edges {
        gm.store_edge(partition, &Edge::from_json(object))?;
    }

    info!("Imported partition '{}'", partition);
    Ok(())
}

/// Export all nodes and edges of a partition as one document
///
/// The document is assembled before anything is written, so a failure never
/// leaves a partial document in the writer.
pub fn export_partition<W: Write>(
    mut writer: W,
    partition: &str,
    gm: &GraphManager,
) -> GraphResult<()> {
    let mut document = PartitionDocument::default();

    for kind in gm.node_kinds(partition)? {
        for key in gm.node_keys(partition, &kind)? {
            if let Some(node) = gm.fetch_node(partition, &kind, &key)? {
                warn_unrepresentable("Node", &key, node.attrs());
                document.nodes.push(node.to_json());
            }
        }
    }

    for kind in gm.edge_kinds(partition)? {
        for key in gm.edge_keys(partition, &kind)? {
            if let Some(edge) = gm.fetch_edge(partition, &kind, &key)? {
                warn_unrepresentable("Edge", &key, edge.attrs());
                document.edges.push(edge.to_json());
            }
        }
    }

    let text = serde_json::to_vec(&document).map_err(std::io::Error::from)?;
    writer.write_all(&text)?;
    writer.flush()?;

    info!(
        "Exported {} nodes and {} edges from partition '{}'",
        document.nodes.len(),
        document.edges.len(),
        partition
    );
    Ok(())
}

pub(crate) fn warn_unrepresentable(entity: &str, key: &str, attrs: &BTreeMap<String, Value>) {
    for (name, value) in attrs {
        if !value.is_representable() {
            warn!(
                "{} {} attribute {} has no JSON representation and is exported as null",
                entity, key, name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryGraphStorage;
    use std::sync::Arc;

    fn manager() -> GraphManager {
        GraphManager::new(Arc::new(MemoryGraphStorage::new("test")))
    }

    #[test]
    fn test_truncated_document() {
        let gm = manager();
        let truncated = r#"{"nodes": [{"key": "1", "kind": "X","#;
        let err = import_partition(truncated.as_bytes(), "main", &gm).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Could not decode file content as object with list of nodes and edges: "));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let gm = manager();
        import_partition(r#"{"nodes": [{"key": "1", "kind": "X"}]}"#.as_bytes(), "main", &gm)
            .unwrap();
        import_partition("{}".as_bytes(), "main", &gm).unwrap();
        assert_eq!(gm.node_count("main", "X").unwrap(), 1);
    }

    #[test]
    fn test_empty_export() {
        let gm = manager();
        let mut out = Vec::new();
        export_partition(&mut out, "aaa", &gm).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"nodes":[],"edges":[]}"#);
    }

    #[test]
    fn test_invalid_node_aborts_import() {
        let gm = manager();
        let err = import_partition(
            r#"{"nodes": [{"key": "1", "kind": "X"}, {"key": "2"}, {"key": "3", "kind": "X"}]}"#
                .as_bytes(),
            "main",
            &gm,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphError: Invalid data (Node is missing a kind value)"
        );
        assert_eq!(gm.node_keys("main", "X").unwrap(), vec!["1"]);
    }
}
