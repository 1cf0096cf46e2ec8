// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sled storage implementation
//!
//! Every region is a sled tree keyed by big-endian positions. Positions come
//! from the database wide id generator, so they are never reused.

use super::traits::{GraphStorage, StorageManager};
use super::types::{StorageError, StorageResult};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Name of the tree holding the main database
const MAIN_DB_TREE: &str = "__main__";

/// Sled backed graph storage
pub struct SledGraphStorage {
    name: String,
    db: sled::Db,
    main_db: sled::Tree,
    managers: RwLock<HashMap<String, Arc<SledStorageManager>>>,
}

/// Sled tree wrapper that implements the StorageManager trait
pub struct SledStorageManager {
    name: String,
    db: sled::Db,
    tree: sled::Tree,
}

impl SledGraphStorage {
    /// Open or create a sled graph storage at the given path
    pub fn open<P: AsRef<Path>>(name: &str, path: P) -> StorageResult<Self> {
        info!(
            "Opening sled graph storage '{}' at path: {:?}",
            name,
            path.as_ref()
        );
        let db = sled::open(path)?;
        let main_db = db.open_tree(MAIN_DB_TREE)?;
        Ok(Self {
            name: name.to_string(),
            db,
            main_db,
            managers: RwLock::new(HashMap::new()),
        })
    }

    fn region_exists(&self, name: &str) -> bool {
        self.db
            .tree_names()
            .iter()
            .any(|tree_name| tree_name.as_ref() == name.as_bytes())
    }
}

fn position_key(position: u64) -> [u8; 8] {
    position.to_be_bytes()
}

impl StorageManager for SledStorageManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, record: &[u8]) -> StorageResult<u64> {
        let position = self.db.generate_id()? + 1;
        self.tree.insert(position_key(position), record)?;
        Ok(position)
    }

    fn fetch(&self, position: u64) -> StorageResult<Vec<u8>> {
        self.tree
            .get(position_key(position))?
            .map(|v| v.to_vec())
            .ok_or(StorageError::SlotNotFound(position))
    }

    fn update(&self, position: u64, record: &[u8]) -> StorageResult<()> {
        let key = position_key(position);
        if !self.tree.contains_key(key)? {
            return Err(StorageError::SlotNotFound(position));
        }
        self.tree.insert(key, record)?;
        Ok(())
    }

    fn free(&self, position: u64) -> StorageResult<()> {
        match self.tree.remove(position_key(position))? {
            Some(_) => Ok(()),
            None => Err(StorageError::SlotNotFound(position)),
        }
    }

    fn count(&self) -> usize {
        self.tree.len()
    }

    fn positions(&self) -> StorageResult<Vec<u64>> {
        let mut positions = Vec::with_capacity(self.tree.len());
        for key in self.tree.iter().keys() {
            let key = key?;
            let bytes: [u8; 8] = key.as_ref().try_into().map_err(|_| {
                StorageError::BackendSpecific(format!(
                    "Invalid position key of length {} in region '{}'",
                    key.len(),
                    self.name
                ))
            })?;
            positions.push(u64::from_be_bytes(bytes));
        }
        Ok(positions)
    }

    fn flush(&self) -> StorageResult<()> {
        self.tree.flush()?;
        Ok(())
    }
}

impl GraphStorage for SledGraphStorage {
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

        if !create && !self.region_exists(name) {
            return Ok(None);
        }

        let mut managers = self.managers.write();
        if let Some(manager) = managers.get(name) {
            return Ok(Some(manager.clone() as Arc<dyn StorageManager>));
        }

        debug!("Opening sled region '{}' in '{}'", name, self.name);
        let manager = Arc::new(SledStorageManager {
            name: name.to_string(),
            db: self.db.clone(),
            tree: self.db.open_tree(name)?,
        });
        managers.insert(name.to_string(), manager.clone());

        Ok(Some(manager as Arc<dyn StorageManager>))
    }

    fn main_db_get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.main_db.get(key)? {
            Some(value) => Ok(Some(String::from_utf8_lossy(&value).to_string())),
            None => Ok(None),
        }
    }

    fn main_db_set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.main_db.insert(key, value.as_bytes())?;
        Ok(())
    }

    fn flush_all(&self) -> StorageResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let position = {
            let storage = SledGraphStorage::open("test", temp_dir.path()).unwrap();
            let sm = storage.storage_manager("mainX.nodes", true).unwrap().unwrap();
            let position = sm.insert(b"payload").unwrap();
            storage.main_db_set("partitions", "[\"main\"]").unwrap();
            storage.flush_all().unwrap();
            position
        };

        let storage = SledGraphStorage::open("test", temp_dir.path()).unwrap();
        let sm = storage.storage_manager("mainX.nodes", false).unwrap().unwrap();
        assert_eq!(sm.fetch(position).unwrap(), b"payload".to_vec());
        assert_eq!(sm.positions().unwrap(), vec![position]);
        assert_eq!(
            storage.main_db_get("partitions").unwrap().as_deref(),
            Some("[\"main\"]")
        );
        assert!(storage.storage_manager("mainY.nodes", false).unwrap().is_none());
    }

    #[test]
    fn test_update_and_free() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SledGraphStorage::open("test", temp_dir.path()).unwrap();
        let sm = storage.storage_manager("mainX.edges", true).unwrap().unwrap();

        let position = sm.insert(b"a").unwrap();
        sm.update(position, b"b").unwrap();
        assert_eq!(sm.fetch(position).unwrap(), b"b".to_vec());

        sm.free(position).unwrap();
        assert_eq!(sm.count(), 0);
        assert!(matches!(
            sm.update(position, b"c"),
            Err(StorageError::SlotNotFound(_))
        ));
    }
}
