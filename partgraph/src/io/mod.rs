// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Import and export of partitions
//!
//! Two pipelines are provided, both built only on the public surface of the
//! [`GraphManager`](crate::graph::GraphManager):
//! - Standard: one JSON document `{"nodes": [...], "edges": [...]}` per
//!   partition
//! - Large scale: one JSON array stream per partition, kind and entity type,
//!   written and read entity by entity
//!
//! Imports are best-effort. Entities stored before a failure stay stored.

mod canonical;
mod large_scale;
mod standard;

pub use canonical::canonical_dump;
pub use large_scale::{
    large_scale_export_partition, large_scale_import_partition, stream_name,
    DirectoryStreamFactory, MemoryStreamFactory, StreamFactory,
};
pub use standard::{export_partition, import_partition};

use serde::{Deserialize, Serialize};

/// JSON object of one exported entity
pub(crate) type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Document shape of the standard pipeline
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct PartitionDocument {
    #[serde(default)]
    pub nodes: Vec<JsonObject>,
    #[serde(default)]
    pub edges: Vec<JsonObject>,
}
