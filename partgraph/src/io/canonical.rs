// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Canonical form of partition documents

use super::{JsonObject, PartitionDocument};
use crate::data::{ATTR_KEY, ATTR_KIND};
use crate::graph::{GraphError, GraphResult};

fn sort_key(object: &JsonObject) -> (String, String) {
    let attr = |name: &str| {
        object
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    (attr(ATTR_KEY), attr(ATTR_KIND))
}

/// Normalise a partition document so documents can be compared as text
///
/// Nodes and edges are sorted by key and kind, object keys are sorted and the
/// result is pretty printed.
pub fn canonical_dump(text: &str) -> GraphResult<String> {
    let mut document: PartitionDocument =
        serde_json::from_str(text).map_err(|e| GraphError::Decode(e.to_string()))?;

    document.nodes.sort_by_cached_key(sort_key);
    document.edges.sort_by_cached_key(sort_key);

    // Going through a map sorts the top level keys as well
    let value = serde_json::json!({
        "nodes": document.nodes,
        "edges": document.edges,
    });
    serde_json::to_string_pretty(&value).map_err(|e| GraphError::Io(e.into()))
}
