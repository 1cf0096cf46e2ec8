// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph storage factory
//!
//! This module provides the factory function for creating graph storages based
//! on configuration.

use super::traits::GraphStorage;
use super::types::{StorageResult, StorageType};
use std::path::Path;
use std::sync::Arc;

/// Factory function to create a graph storage based on configuration
///
/// # Arguments
/// * `storage_type` - The backend to create (Sled, Memory)
/// * `name` - Name of the storage
/// * `path` - Directory of the database (ignored by the memory backend)
///
/// # Examples
/// ```ignore
/// let storage = create_graph_storage(StorageType::Sled, "mydb", "./data")?;
/// let gm = GraphManager::new(storage);
/// ```
pub fn create_graph_storage<P: AsRef<Path>>(
    storage_type: StorageType,
    name: &str,
    path: P,
) -> StorageResult<Arc<dyn GraphStorage>> {
    match storage_type {
        #[cfg(feature = "sled-backend")]
        StorageType::Sled => {
            use crate::storage::sled::SledGraphStorage;
            let storage = SledGraphStorage::open(name, path)?;
            Ok(Arc::new(storage) as Arc<dyn GraphStorage>)
        }
        #[cfg(not(feature = "sled-backend"))]
        StorageType::Sled => {
            let _ = path;
            Err(crate::storage::StorageError::BackendSpecific(
                "Sled storage backend not compiled in".to_string(),
            ))
        }
        StorageType::Memory => {
            use crate::storage::memory::MemoryGraphStorage;
            let _ = path;
            Ok(Arc::new(MemoryGraphStorage::new(name)) as Arc<dyn GraphStorage>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(feature = "sled-backend")]
    #[test]
    fn test_create_sled_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_graph_storage(StorageType::Sled, "db", temp_dir.path()).unwrap();
        assert_eq!(storage.name(), "db");
        assert!(storage.storage_manager("x.nodes", true).unwrap().is_some());
    }

    #[test]
    fn test_create_memory_storage() {
        let storage = create_graph_storage(StorageType::Memory, "mem", "unused").unwrap();
        assert_eq!(storage.name(), "mem");
        assert!(storage.storage_manager("x.nodes", false).unwrap().is_none());
    }
}
