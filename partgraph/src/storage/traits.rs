// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage traits
//!
//! This module defines the two traits every storage backend implements: the
//! positional record store for a single region and the graph storage that
//! hands regions out by name.

use super::types::StorageResult;
use std::sync::Arc;

/// Positional record store for one storage region
///
/// A region holds the records of one (partition, kind, entity type) triple.
/// Positions are opaque, stable for the lifetime of a record and only reused
/// after the record was freed.
pub trait StorageManager: Send + Sync {
    /// Name of the region this manager stores
    fn name(&self) -> &str;

    /// Store a new record and return its position
    fn insert(&self, record: &[u8]) -> StorageResult<u64>;

    /// Read the record at a position
    fn fetch(&self, position: u64) -> StorageResult<Vec<u8>>;

    /// Replace the record at a position
    fn update(&self, position: u64, record: &[u8]) -> StorageResult<()>;

    /// Release the record at a position
    fn free(&self, position: u64) -> StorageResult<()>;

    /// Number of live records
    fn count(&self) -> usize;

    /// Positions of all live records in ascending order
    fn positions(&self) -> StorageResult<Vec<u64>>;

    /// Flush any pending writes to disk
    fn flush(&self) -> StorageResult<()>;
}

/// Storage backing an entire database
///
/// Owns the storage managers of every region and creates them lazily on first
/// use. Also keeps a small string map (the main database) for discovery data.
pub trait GraphStorage: Send + Sync {
    /// Name of this storage
    fn name(&self) -> &str;

    /// Get the storage manager of a region
    ///
    /// Returns `None` if the region does not exist and `create` is false.
    fn storage_manager(
        &self,
        name: &str,
        create: bool,
    ) -> StorageResult<Option<Arc<dyn StorageManager>>>;

    /// Read a value from the main database
    fn main_db_get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value to the main database
    fn main_db_set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Flush every region and the main database
    fn flush_all(&self) -> StorageResult<()>;
}

// Helper implementation for Arc<dyn GraphStorage>
// This allows decorators to wrap shared storages seamlessly
impl GraphStorage for Arc<dyn GraphStorage> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn storage_manager(
        &self,
        name: &str,
        create: bool,
    ) -> StorageResult<Option<Arc<dyn StorageManager>>> {
        (**self).storage_manager(name, create)
    }

    fn main_db_get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).main_db_get(key)
    }

    fn main_db_set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).main_db_set(key, value)
    }

    fn flush_all(&self) -> StorageResult<()> {
        (**self).flush_all()
    }
}
