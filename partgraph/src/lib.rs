// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! PartGraph - A partitioned graph store
//!
//! Nodes and edges are grouped into named partitions and persisted through a
//! pluggable storage layer. All mutation and retrieval goes through the
//! [`GraphManager`], which enforces the minimal schema (`key` and `kind` on
//! every entity, complete endpoint specs on every edge) and cascading
//! deletion of edges when their nodes go away.
//!
//! # Architecture
//!
//! ```text
//! import / export (standard and streaming)
//!     ↓
//! GraphManager (validation, region indexes, cascading delete)
//!     ↓
//! GraphStorage (one per database, hands out regions by name)
//!     ↓
//! StorageManager (one positional record store per region)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use partgraph::{GraphManager, MemoryGraphStorage, Node};
//! use std::sync::Arc;
//!
//! let gm = GraphManager::new(Arc::new(MemoryGraphStorage::new("mydb")));
//! gm.store_node("main", &Node::new("000", "Author").with_attr("name", "John"))?;
//! let node = gm.fetch_node("main", "Author", "000")?;
//! ```

pub mod config;
pub mod data;
pub mod graph;
pub mod io;
pub mod storage;

pub use config::{EndpointPolicy, GraphConfig};
pub use data::{Edge, End, EndpointSpec, Node, Value};
pub use graph::{region_name, EntityType, GraphError, GraphManager, GraphResult, TraversalSpec};
pub use io::{
    canonical_dump, export_partition, import_partition, large_scale_export_partition,
    large_scale_import_partition, DirectoryStreamFactory, MemoryStreamFactory, StreamFactory,
};
pub use storage::{
    create_graph_storage, Fault, FaultInjectingGraphStorage, GraphStorage, MemoryGraphStorage,
    StorageError, StorageErrorKind, StorageManager, StorageResult, StorageType,
};

#[cfg(feature = "sled-backend")]
pub use storage::SledGraphStorage;

/// PartGraph version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PartGraph crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
