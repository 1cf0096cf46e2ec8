// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph edges
//!
//! An edge is an attribute map like a node, with two endpoint specifications
//! stored in the `end1*` and `end2*` attributes.

use super::node::{identity, required_string, Node, ATTR_KEY, ATTR_KIND};
use super::Value;
use crate::graph::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the two ends of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    One,
    Two,
}

impl End {
    pub const BOTH: [End; 2] = [End::One, End::Two];

    pub fn key_attr(self) -> &'static str {
        match self {
            End::One => "end1key",
            End::Two => "end2key",
        }
    }

    pub fn kind_attr(self) -> &'static str {
        match self {
            End::One => "end1kind",
            End::Two => "end2kind",
        }
    }

    pub fn role_attr(self) -> &'static str {
        match self {
            End::One => "end1role",
            End::Two => "end2role",
        }
    }

    pub fn cascading_attr(self) -> &'static str {
        match self {
            End::One => "end1cascading",
            End::Two => "end2cascading",
        }
    }

    /// The opposite end
    pub fn other(self) -> End {
        match self {
            End::One => End::Two,
            End::Two => End::One,
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::One => write!(f, "end1"),
            End::Two => write!(f, "end2"),
        }
    }
}

/// Binding of one edge end to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointSpec {
    /// Key of the referenced node
    pub key: String,
    /// Kind of the referenced node
    pub kind: String,
    /// Part the node plays in the relation (e.g. "Author")
    pub role: String,
    /// Whether removing the referenced node removes the edge
    pub cascading: bool,
}

impl EndpointSpec {
    pub fn new(
        key: impl Into<String>,
        kind: impl Into<String>,
        role: impl Into<String>,
        cascading: bool,
    ) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            role: role.into(),
            cascading,
        }
    }
}

/// Graph edge with key, kind, two endpoint specs and arbitrary attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Edge {
    attrs: BTreeMap<String, Value>,
}

impl Edge {
    /// Create a new edge without endpoints
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::from_node(Node::new(key, kind))
    }

    /// Create an edge from the attributes of a node
    pub fn from_node(node: Node) -> Self {
        Self {
            attrs: node.into_attrs(),
        }
    }

    /// Create an edge from an attribute map without validating it
    pub fn from_attrs(attrs: BTreeMap<String, Value>) -> Self {
        Self { attrs }
    }

    /// Create an edge from a JSON object without validating it
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from_node(Node::from_json(object))
    }

    /// Builder style endpoint setter
    pub fn with_end(mut self, end: End, spec: &EndpointSpec) -> Self {
        self.set_end(end, spec);
        self
    }

    /// Set all four attributes of an endpoint
    pub fn set_end(&mut self, end: End, spec: &EndpointSpec) {
        self.set_attr(end.key_attr(), spec.key.as_str());
        self.set_attr(end.kind_attr(), spec.kind.as_str());
        self.set_attr(end.role_attr(), spec.role.as_str());
        self.set_attr(end.cascading_attr(), spec.cascading);
    }

    /// Builder style attribute setter
    pub fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute value
    pub fn set_attr(&mut self, name: &str, value: impl Into<Value>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.attrs.remove(name)
    }

    pub fn attrs(&self) -> &BTreeMap<String, Value> {
        &self.attrs
    }

    pub fn into_attrs(self) -> BTreeMap<String, Value> {
        self.attrs
    }

    /// Key of this edge if it is set to a string
    pub fn key(&self) -> Option<&str> {
        self.attr(ATTR_KEY).and_then(Value::as_str)
    }

    /// Kind of this edge if it is set to a string
    pub fn kind(&self) -> Option<&str> {
        self.attr(ATTR_KIND).and_then(Value::as_str)
    }

    /// Read and validate one endpoint spec
    pub fn end(&self, end: End) -> GraphResult<EndpointSpec> {
        let suffix = format!(" for {}", end);
        let key = required_string(&self.attrs, end.key_attr(), "key", "Edge", &suffix)?;
        let kind = required_string(&self.attrs, end.kind_attr(), "kind", "Edge", &suffix)?;
        let role = required_string(&self.attrs, end.role_attr(), "role", "Edge", &suffix)?;

        let cascading = match self.attrs.get(end.cascading_attr()) {
            None | Some(Value::Null) => {
                return Err(GraphError::invalid(format!(
                    "Edge is missing a cascading value for {}",
                    end
                )))
            }
            Some(Value::Boolean(b)) => *b,
            Some(other) => {
                return Err(GraphError::invalid(format!(
                    "Edge has a cascading value for {} which is not a boolean: {}",
                    end,
                    other.type_name()
                )))
            }
        };

        Ok(EndpointSpec::new(key, kind, role, cascading))
    }

    /// Validate identity and both endpoints
    pub fn validate(&self) -> GraphResult<(&str, &str, [EndpointSpec; 2])> {
        let (key, kind) = identity(&self.attrs, "Edge")?;
        let end1 = self.end(End::One)?;
        let end2 = self.end(End::Two)?;
        Ok((key, kind, [end1, end2]))
    }

    /// Convert to a JSON object; unrepresentable values become null
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrote_edge() -> Edge {
        Edge::new("Aria1-edge", "Wrote")
            .with_end(End::One, &EndpointSpec::new("000", "Author", "Author", true))
            .with_end(End::Two, &EndpointSpec::new("Aria1", "Song", "Song", false))
            .with_attr("number", 1)
    }

    #[test]
    fn test_endpoints() {
        let edge = wrote_edge();
        let (key, kind, ends) = edge.validate().unwrap();
        assert_eq!((key, kind), ("Aria1-edge", "Wrote"));
        assert_eq!(ends[0], EndpointSpec::new("000", "Author", "Author", true));
        assert!(!ends[1].cascading);
        assert_eq!(edge.attr("end2role"), Some(&Value::from("Song")));
    }

    #[test]
    fn test_missing_cascading_names_the_end() {
        let mut edge = wrote_edge();
        edge.remove_attr("end2cascading");
        assert_eq!(
            edge.validate().unwrap_err().to_string(),
            "GraphError: Invalid data (Edge is missing a cascading value for end2)"
        );
    }

    #[test]
    fn test_missing_endpoint_fields() {
        let mut edge = wrote_edge();
        edge.remove_attr("end1role");
        assert_eq!(
            edge.validate().unwrap_err().to_string(),
            "GraphError: Invalid data (Edge is missing a role value for end1)"
        );

        let mut edge = wrote_edge();
        edge.remove_attr("key");
        assert_eq!(
            edge.validate().unwrap_err().to_string(),
            "GraphError: Invalid data (Edge is missing a key value)"
        );

        let mut edge = wrote_edge();
        edge.set_attr("end1cascading", "yes");
        assert!(edge.validate().is_err());
    }

    #[test]
    fn test_end_other() {
        assert_eq!(End::One.other(), End::Two);
        assert_eq!(End::Two.to_string(), "end2");
    }
}
