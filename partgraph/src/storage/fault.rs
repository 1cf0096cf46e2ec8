// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Fault injection for storage tests
//!
//! `FaultInjectingGraphStorage` wraps any graph storage and hands out storage
//! managers that fail on configured positions. The production storages know
//! nothing about this; tests opt in by wrapping.

use super::traits::{GraphStorage, StorageManager};
use super::types::{StorageError, StorageResult};
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Failure to raise on a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fetching the record fails with a serious error
    FetchSerious,
    /// Fetching the record fails with a transient error
    FetchTransient,
    /// An insert which lands on the position fails
    InsertError,
    /// Updating the record fails
    UpdateError,
    /// Freeing the record fails
    FreeError,
}

#[derive(Default)]
struct FaultPlan {
    faults: RwLock<HashMap<String, HashMap<u64, Fault>>>,
    calls: AtomicUsize,
}

impl FaultPlan {
    fn fault(&self, region: &str, position: u64) -> Option<Fault> {
        self.faults
            .read()
            .get(region)
            .and_then(|positions| positions.get(&position).copied())
    }
}

/// Graph storage decorator which injects faults into its regions
pub struct FaultInjectingGraphStorage<S: GraphStorage> {
    inner: S,
    plan: Arc<FaultPlan>,
}

/// Storage manager decorator created by [`FaultInjectingGraphStorage`]
pub struct FaultInjectingStorageManager {
    inner: Arc<dyn StorageManager>,
    plan: Arc<FaultPlan>,
}

impl<S: GraphStorage> FaultInjectingGraphStorage<S> {
    /// Wrap a graph storage
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            plan: Arc::new(FaultPlan::default()),
        }
    }

    /// Make operations on a position of a region fail
    pub fn inject(&self, region: &str, position: u64, fault: Fault) {
        debug!(
            "Injecting {:?} at position {} of region '{}'",
            fault, position, region
        );
        self.plan
            .faults
            .write()
            .entry(region.to_string())
            .or_default()
            .insert(position, fault);
    }

    /// Remove a previously injected fault
    pub fn clear(&self, region: &str, position: u64) {
        if let Some(positions) = self.plan.faults.write().get_mut(region) {
            positions.remove(&position);
        }
    }

    /// Number of calls made into storage (regions and main database)
    pub fn call_count(&self) -> usize {
        self.plan.calls.load(Ordering::SeqCst)
    }

    /// Access the wrapped storage
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn record_call(&self) {
        self.plan.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl FaultInjectingStorageManager {
    fn check(&self, position: u64, expected: &[Fault]) -> StorageResult<()> {
        match self.plan.fault(self.inner.name(), position) {
            Some(Fault::FetchTransient) if expected.contains(&Fault::FetchTransient) => Err(
                StorageError::Unavailable(format!("Injected fault at position {}", position)),
            ),
            Some(fault) if expected.contains(&fault) => Err(StorageError::BackendSpecific(
                format!("Injected {:?} at position {}", fault, position),
            )),
            _ => Ok(()),
        }
    }

    fn record_call(&self) {
        self.plan.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl StorageManager for FaultInjectingStorageManager {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn insert(&self, record: &[u8]) -> StorageResult<u64> {
        self.record_call();
        let position = self.inner.insert(record)?;
        if let Err(e) = self.check(position, &[Fault::InsertError]) {
            // Roll back so the failed insert leaves nothing behind
            self.inner.free(position)?;
            return Err(e);
        }
        Ok(position)
    }

    fn fetch(&self, position: u64) -> StorageResult<Vec<u8>> {
        self.record_call();
        self.check(position, &[Fault::FetchSerious, Fault::FetchTransient])?;
        self.inner.fetch(position)
    }

    fn update(&self, position: u64, record: &[u8]) -> StorageResult<()> {
        self.record_call();
        self.check(position, &[Fault::UpdateError])?;
        self.inner.update(position, record)
    }

    fn free(&self, position: u64) -> StorageResult<()> {
        self.record_call();
        self.check(position, &[Fault::FreeError])?;
        self.inner.free(position)
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn positions(&self) -> StorageResult<Vec<u64>> {
        self.record_call();
        self.inner.positions()
    }

    fn flush(&self) -> StorageResult<()> {
        self.inner.flush()
    }
}

impl<S: GraphStorage> GraphStorage for FaultInjectingGraphStorage<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn storage_manager(
        &self,
        name: &str,
        create: bool,
    ) -> StorageResult<Option<Arc<dyn StorageManager>>> {
        self.record_call();
        Ok(self.inner.storage_manager(name, create)?.map(|inner| {
            Arc::new(FaultInjectingStorageManager {
                inner,
                plan: self.plan.clone(),
            }) as Arc<dyn StorageManager>
        }))
    }

    fn main_db_get(&self, key: &str) -> StorageResult<Option<String>> {
        self.record_call();
        self.inner.main_db_get(key)
    }

    fn main_db_set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.record_call();
        self.inner.main_db_set(key, value)
    }

    fn flush_all(&self) -> StorageResult<()> {
        self.inner.flush_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryGraphStorage;

    #[test]
    fn test_fetch_faults() {
        let storage = FaultInjectingGraphStorage::new(MemoryGraphStorage::new("test"));
        let sm = storage.storage_manager("r.nodes", true).unwrap().unwrap();
        let position = sm.insert(b"x").unwrap();

        storage.inject("r.nodes", position, Fault::FetchSerious);
        let err = sm.fetch(position).unwrap_err();
        assert!(!err.is_transient());

        storage.inject("r.nodes", position, Fault::FetchTransient);
        assert!(sm.fetch(position).unwrap_err().is_transient());

        storage.clear("r.nodes", position);
        assert_eq!(sm.fetch(position).unwrap(), b"x".to_vec());
    }

    #[test]
    fn test_insert_fault_leaves_no_record() {
        let storage = FaultInjectingGraphStorage::new(MemoryGraphStorage::new("test"));
        let sm = storage.storage_manager("r.nodes", true).unwrap().unwrap();
        sm.insert(b"first").unwrap();

        storage.inject("r.nodes", 2, Fault::InsertError);
        assert!(sm.insert(b"second").is_err());
        assert_eq!(sm.count(), 1);
    }

    #[test]
    fn test_calls_are_counted() {
        let storage = FaultInjectingGraphStorage::new(MemoryGraphStorage::new("test"));
        assert_eq!(storage.call_count(), 0);
        storage.main_db_get("partitions").unwrap();
        assert_eq!(storage.call_count(), 1);
    }
}
