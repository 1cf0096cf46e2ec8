// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory storage implementation for testing and ephemeral graphs

use super::traits::{GraphStorage, StorageManager};
use super::types::{StorageError, StorageResult};
use log::debug;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// In-memory graph storage
pub struct MemoryGraphStorage {
    name: String,
    managers: RwLock<HashMap<String, Arc<MemoryStorageManager>>>,
    main_db: RwLock<HashMap<String, String>>,
}

/// In-memory record store for a single region
pub struct MemoryStorageManager {
    name: String,
    data: RwLock<MemoryRegion>,
}

struct MemoryRegion {
    records: BTreeMap<u64, Vec<u8>>,
    free: Vec<u64>,
    next: u64,
}

impl MemoryGraphStorage {
    /// Create a new memory graph storage
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            managers: RwLock::new(HashMap::new()),
            main_db: RwLock::new(HashMap::new()),
        }
    }
}

impl MemoryStorageManager {
    /// Create a new empty record store
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: RwLock::new(MemoryRegion {
                records: BTreeMap::new(),
                free: Vec::new(),
                next: 1,
            }),
        }
    }
}

impl StorageManager for MemoryStorageManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, record: &[u8]) -> StorageResult<u64> {
        let mut data = self.data.write();
        let position = match data.free.pop() {
            Some(position) => position,
            None => {
                let position = data.next;
                data.next += 1;
                position
            }
        };
        data.records.insert(position, record.to_vec());
        Ok(position)
    }

    fn fetch(&self, position: u64) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .records
            .get(&position)
            .cloned()
            .ok_or(StorageError::SlotNotFound(position))
    }

    fn update(&self, position: u64, record: &[u8]) -> StorageResult<()> {
        match self.data.write().records.get_mut(&position) {
            Some(existing) => {
                *existing = record.to_vec();
                Ok(())
            }
            None => Err(StorageError::SlotNotFound(position)),
        }
    }

    fn free(&self, position: u64) -> StorageResult<()> {
        let mut data = self.data.write();
        if data.records.remove(&position).is_none() {
            return Err(StorageError::SlotNotFound(position));
        }
        data.free.push(position);
        Ok(())
    }

    fn count(&self) -> usize {
        self.data.read().records.len()
    }

    fn positions(&self) -> StorageResult<Vec<u64>> {
        Ok(self.data.read().records.keys().copied().collect())
    }

    fn flush(&self) -> StorageResult<()> {
        // No-op for memory storage
        Ok(())
    }
}

impl GraphStorage for MemoryGraphStorage {
    fn name(&self) -> &str {
        &self.name
    }

    fn storage_manager(
        &self,
        name: &str,
        create: bool,
    ) -> StorageResult<Option<Arc<dyn StorageManager>>> {
        if let Some(manager) = self.managers.read().get(name) {
            return Ok(Some(manager.clone() as Arc<dyn StorageManager>));
        }

        if !create {
            return Ok(None);
        }

        let mut managers = self.managers.write();
        let manager = managers
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating memory region '{}' in '{}'", name, self.name);
                Arc::new(MemoryStorageManager::new(name))
            })
            .clone();

        Ok(Some(manager as Arc<dyn StorageManager>))
    }

    fn main_db_get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.main_db.read().get(key).cloned())
    }

    fn main_db_set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.main_db
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn flush_all(&self) -> StorageResult<()> {
        // No-op for memory storage
        Ok(())
    }
}
