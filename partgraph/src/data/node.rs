// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph nodes
//!
//! A node is an attribute map which carries its identity in the `key` and
//! `kind` attributes.

use super::{check_name, Value};
use crate::graph::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute holding the key of a node or edge
pub const ATTR_KEY: &str = "key";

/// Attribute holding the kind of a node or edge
pub const ATTR_KIND: &str = "kind";

/// Graph node with key, kind and arbitrary attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    attrs: BTreeMap<String, Value>,
}

impl Node {
    /// Create a new node with the given key and kind
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut node = Self::default();
        node.set_attr(ATTR_KEY, Value::String(key.into()));
        node.set_attr(ATTR_KIND, Value::String(kind.into()));
        node
    }

    /// Create a node from an attribute map without validating it
    pub fn from_attrs(attrs: BTreeMap<String, Value>) -> Self {
        Self { attrs }
    }

    /// Create a node from a JSON object without validating it
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            attrs: object
                .into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect(),
        }
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

    /// Key of this node if it is set to a string
    pub fn key(&self) -> Option<&str> {
        self.attr(ATTR_KEY).and_then(Value::as_str)
    }

    /// Kind of this node if it is set to a string
    pub fn kind(&self) -> Option<&str> {
        self.attr(ATTR_KIND).and_then(Value::as_str)
    }

    /// Convert to a JSON object; unrepresentable values become null
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// Validate the identity attributes and return `(key, kind)`
    pub fn validate(&self) -> GraphResult<(&str, &str)> {
        identity(&self.attrs, "Node")
    }
}

/// Check the `key` and `kind` attributes of an entity
pub(crate) fn identity<'a>(
    attrs: &'a BTreeMap<String, Value>,
    entity: &str,
) -> GraphResult<(&'a str, &'a str)> {
    let key = required_string(attrs, ATTR_KEY, ATTR_KEY, entity, "")?;
    let kind = required_string(attrs, ATTR_KIND, ATTR_KIND, entity, "")?;
    check_name(&format!("{} kind", entity), kind)?;
    Ok((key, kind))
}

/// Fetch a required non-empty string attribute
pub(crate) fn required_string<'a>(
    attrs: &'a BTreeMap<String, Value>,
    attr: &str,
    field: &str,
    entity: &str,
    suffix: &str,
) -> GraphResult<&'a str> {
    match attrs.get(attr) {
        None | Some(Value::Null) => Err(GraphError::invalid(format!(
            "{} is missing a {} value{}",
            entity, field, suffix
        ))),
        Some(Value::String(s)) if s.is_empty() => Err(GraphError::invalid(format!(
            "{} is missing a {} value{}",
            entity, field, suffix
        ))),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(GraphError::invalid(format!(
            "{} has a {} value{} which is not a string: {}",
            entity,
            field,
            suffix,
            other.type_name()
        ))),
    }
}
