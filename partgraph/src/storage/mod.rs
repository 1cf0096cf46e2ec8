// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage layer
//!
//! This module provides trait-based abstractions for record storage, allowing
//! different backends to be used interchangeably:
//! - `StorageManager`: positional record store for one region
//! - `GraphStorage`: owns all regions of a database and the main database
//! - Memory and Sled implementations
//! - A fault injecting decorator for tests
//!
//! # Architecture
//!
//! ```text
//! GraphManager
//!     ↓
//! GraphStorage (region registry + main database)
//!     ↓
//! StorageManager (one per partition/kind/entity type)
//!     ↓
//! Concrete Implementations (Memory, Sled)
//! ```

pub mod factory;
pub mod fault;
pub mod memory;
pub(crate) mod record;
#[cfg(feature = "sled-backend")]
pub mod sled;
pub mod traits;
pub mod types;

pub use factory::create_graph_storage;
pub use fault::{Fault, FaultInjectingGraphStorage, FaultInjectingStorageManager};
pub use memory::{MemoryGraphStorage, MemoryStorageManager};
#[cfg(feature = "sled-backend")]
pub use self::sled::{SledGraphStorage, SledStorageManager};
pub use traits::{GraphStorage, StorageManager};
pub use types::{StorageError, StorageErrorKind, StorageResult, StorageType};
