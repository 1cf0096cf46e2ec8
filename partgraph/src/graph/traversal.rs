// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Traversal specs
//!
//! A traversal spec selects the edges to follow from a node. It has the form
//! `role1:edgekind:role2:nodekind` where `role1` is the role of the start
//! node, `role2` and `nodekind` describe the node at the other end. An empty
//! component matches anything, so `:::` follows every edge.

use super::error::{GraphError, GraphResult};
use crate::data::EndpointSpec;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalSpec {
    role1: Option<String>,
    edge_kind: Option<String>,
    role2: Option<String>,
    node_kind: Option<String>,
}

fn component(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn matches(pattern: &Option<String>, value: &str) -> bool {
    pattern.as_deref().map_or(true, |p| p == value)
}

impl TraversalSpec {
    /// Build a spec from its components; empty strings are wildcards
    pub fn new(role1: &str, edge_kind: &str, role2: &str, node_kind: &str) -> Self {
        Self {
            role1: component(role1),
            edge_kind: component(edge_kind),
            role2: component(role2),
            node_kind: component(node_kind),
        }
    }

    /// Spec which follows every edge
    pub fn any() -> Self {
        Self::default()
    }

    pub fn matches_edge_kind(&self, kind: &str) -> bool {
        matches(&self.edge_kind, kind)
    }

    /// Check the start end and the far end of an edge against this spec
    pub fn matches_ends(&self, own: &EndpointSpec, other: &EndpointSpec) -> bool {
        matches(&self.role1, &own.role)
            && matches(&self.role2, &other.role)
            && matches(&self.node_kind, &other.kind)
    }
}

impl FromStr for TraversalSpec {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [role1, edge_kind, role2, node_kind] => {
                Ok(Self::new(role1, edge_kind, role2, node_kind))
            }
            _ => Err(GraphError::invalid(format!(
                "Invalid traversal spec {} - must be role1:edgekind:role2:nodekind",
                s
            ))),
        }
    }
}

impl fmt::Display for TraversalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.role1.as_deref().unwrap_or(""),
            self.edge_kind.as_deref().unwrap_or(""),
            self.role2.as_deref().unwrap_or(""),
            self.node_kind.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let spec: TraversalSpec = "Author:Wrote:Song:Song".parse().unwrap();
        assert!(spec.matches_edge_kind("Wrote"));
        assert!(!spec.matches_edge_kind("Sang"));
        assert_eq!(spec.to_string(), "Author:Wrote:Song:Song");

        let spec: TraversalSpec = ":::".parse().unwrap();
        assert_eq!(spec, TraversalSpec::any());
        assert!(spec.matches_edge_kind("anything"));

        assert!("Author:Wrote".parse::<TraversalSpec>().is_err());
    }

    #[test]
    fn test_matches_ends() {
        let author = EndpointSpec::new("000", "Author", "Author", true);
        let song = EndpointSpec::new("Aria1", "Song", "Song", false);

        let spec = TraversalSpec::new("Author", "", "", "Song");
        assert!(spec.matches_ends(&author, &song));
        assert!(!spec.matches_ends(&song, &author));
    }
}
