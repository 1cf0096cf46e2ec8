// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph data model
//!
//! Nodes and edges are attribute maps; their identity lives in the `key` and
//! `kind` attributes. The types only validate their own structure, storage
//! and referential concerns belong to the graph manager.

mod edge;
mod node;
mod value;

pub use edge::{Edge, End, EndpointSpec};
pub use node::{Node, ATTR_KEY, ATTR_KIND};
pub use value::Value;

use crate::graph::{GraphError, GraphResult};

/// Check that a partition name or kind only contains `[a-zA-Z0-9_]`
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a partition name or kind, `what` names it in the error message
pub(crate) fn check_name(what: &str, name: &str) -> GraphResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(GraphError::invalid(format!(
            "{} {} is not alphanumeric - can only contain [a-zA-Z0-9_]",
            what, name
        )))
    }
}
