// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph management
//!
//! The [`GraphManager`] is the only component which reads or writes graph
//! data. It sits on top of a [`GraphStorage`](crate::storage::GraphStorage)
//! and keeps one indexed region per partition, kind and entity type.

mod error;
mod manager;
mod region;
mod traversal;

pub use error::{GraphError, GraphResult};
pub use manager::GraphManager;
pub use region::{region_name, EntityType, EDGE_SUFFIX, NODE_SUFFIX};
pub use traversal::TraversalSpec;
