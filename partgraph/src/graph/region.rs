// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage regions and their in-memory indexes
//!
//! Every (partition, kind, entity type) triple is stored in its own region.
//! A [`Region`] couples the storage manager of such a region with an index
//! which maps keys to record positions. Edge regions additionally index the
//! endpoints of every edge so cascading deletes and traversals never scan
//! records.

use super::error::{GraphError, GraphResult};
use crate::data::{Edge, End, EndpointSpec, Value, ATTR_KEY};
use crate::storage::record::{decode_record, encode_record};
use crate::storage::{StorageError, StorageManager, StorageResult};
use log::{debug, error};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Region name suffix for nodes
pub const NODE_SUFFIX: &str = ".nodes";

/// Region name suffix for edges
pub const EDGE_SUFFIX: &str = ".edges";

/// Entity type stored in a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Nodes,
    Edges,
}

impl EntityType {
    pub fn suffix(self) -> &'static str {
        match self {
            EntityType::Nodes => NODE_SUFFIX,
            EntityType::Edges => EDGE_SUFFIX,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Nodes => write!(f, "nodes"),
            EntityType::Edges => write!(f, "edges"),
        }
    }
}

/// Name of the storage region holding a kind of a partition
///
/// Different partition and kind pairs may concatenate to the same name; the
/// graph manager records which pair owns a region.
pub fn region_name(partition: &str, kind: &str, entity: EntityType) -> String {
    format!("{}{}{}", partition, kind, entity.suffix())
}

/// Attribute map as it is stored in a record
pub(crate) type Attributes = BTreeMap<String, Value>;

/// Lookup structures of one region
#[derive(Debug, Default)]
pub(crate) struct RegionIndex {
    /// Entity key to record position
    positions: HashMap<String, u64>,
    /// Edge key to its endpoints (edge regions only)
    links: HashMap<String, [EndpointSpec; 2]>,
    /// (node kind, node key) to the keys of edges referencing the node
    referrers: HashMap<(String, String), BTreeSet<String>>,
}

impl RegionIndex {
    /// Scan all records of a region
    pub(crate) fn build(manager: &dyn StorageManager, entity: EntityType) -> StorageResult<Self> {
        let mut index = Self::default();

        for position in manager.positions()? {
            let attrs: Attributes = decode_record(position, &manager.fetch(position)?)?;
            let key = attrs
                .get(ATTR_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| StorageError::corrupted(position, "record without key"))?;

            if entity == EntityType::Edges {
                let edge = Edge::from_attrs(attrs);
                let (_, _, ends) = edge
                    .validate()
                    .map_err(|e| StorageError::corrupted(position, e.to_string()))?;
                index.link(&key, ends);
            }
            index.positions.insert(key, position);
        }

        Ok(index)
    }

    pub(crate) fn position(&self, key: &str) -> Option<u64> {
        self.positions.get(key).copied()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    /// All keys in ascending order
    pub(crate) fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.positions.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Record the endpoints of an edge, replacing earlier ones
    pub(crate) fn link(&mut self, edge_key: &str, ends: [EndpointSpec; 2]) {
        self.unlink(edge_key);
        for end in &ends {
            self.referrers
                .entry((end.kind.clone(), end.key.clone()))
                .or_default()
                .insert(edge_key.to_string());
        }
        self.links.insert(edge_key.to_string(), ends);
    }

    /// Forget the endpoints of an edge
    pub(crate) fn unlink(&mut self, edge_key: &str) {
        let Some(ends) = self.links.remove(edge_key) else {
            return;
        };
        for end in ends {
            let node = (end.kind, end.key);
            if let Some(edges) = self.referrers.get_mut(&node) {
                edges.remove(edge_key);
                if edges.is_empty() {
                    self.referrers.remove(&node);
                }
            }
        }
    }

    /// Edges referencing a node, with the end at which they reference it
    pub(crate) fn referrers<'a>(
        &'a self,
        kind: &'a str,
        key: &'a str,
    ) -> impl Iterator<Item = (&'a str, End, &'a [EndpointSpec; 2])> + 'a {
        self.referrers
            .get(&(kind.to_string(), key.to_string()))
            .into_iter()
            .flatten()
            .filter_map(move |edge_key| {
                self.links
                    .get(edge_key)
                    .map(|ends| (edge_key.as_str(), ends))
            })
            .flat_map(move |(edge_key, ends)| {
                End::BOTH
                    .into_iter()
                    .filter(move |end| {
                        let spec = &ends[*end as usize];
                        spec.kind == kind && spec.key == key
                    })
                    .map(move |end| (edge_key, end, ends))
            })
    }

    /// Keys of edges which must go when the node is removed
    pub(crate) fn cascading_referrers(&self, kind: &str, key: &str) -> Vec<String> {
        let edges: BTreeSet<&str> = self
            .referrers(kind, key)
            .filter(|(_, end, ends)| ends[*end as usize].cascading)
            .map(|(edge_key, _, _)| edge_key)
            .collect();
        edges.into_iter().map(str::to_string).collect()
    }
}

/// An open storage region with its index
pub(crate) struct Region {
    name: String,
    entity: EntityType,
    manager: Arc<dyn StorageManager>,
    pub(crate) index: RwLock<RegionIndex>,
}

impl Region {
    pub(crate) fn new(
        name: String,
        entity: EntityType,
        manager: Arc<dyn StorageManager>,
        index: RegionIndex,
    ) -> Self {
        Self {
            name,
            entity,
            manager,
            index: RwLock::new(index),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn entity(&self) -> EntityType {
        self.entity
    }

    /// Read the attributes stored at a position
    pub(crate) fn fetch(&self, position: u64) -> GraphResult<Attributes> {
        self.manager
            .fetch(position)
            .and_then(|record| decode_record(position, &record))
            .map_err(|e| {
                error!(
                    "Could not read position {} of region '{}': {}",
                    position, self.name, e
                );
                GraphError::reading(format!("{} - {}", self.name, e), e)
            })
    }

    /// Insert or overwrite the record of an entity
    pub(crate) fn put(
        &self,
        index: &mut RegionIndex,
        key: &str,
        attrs: &Attributes,
    ) -> GraphResult<()> {
        let record = encode_record(attrs).map_err(|e| self.write_error(e))?;

        match index.position(key) {
            Some(position) => {
                self.manager
                    .update(position, &record)
                    .map_err(|e| self.write_error(e))?;
                debug!("Updated '{}' at position {} of '{}'", key, position, self.name);
            }
            None => {
                let position = self
                    .manager
                    .insert(&record)
                    .map_err(|e| self.write_error(e))?;
                index.positions.insert(key.to_string(), position);
                debug!("Inserted '{}' at position {} of '{}'", key, position, self.name);
            }
        }
        Ok(())
    }

    /// Delete the record of an entity and return its attributes
    pub(crate) fn delete(
        &self,
        index: &mut RegionIndex,
        key: &str,
    ) -> GraphResult<Option<Attributes>> {
        let Some(position) = index.position(key) else {
            return Ok(None);
        };

        let attrs = self.fetch(position)?;
        self.manager.free(position).map_err(|e| self.write_error(e))?;

        index.positions.remove(key);
        index.unlink(key);
        debug!("Freed '{}' at position {} of '{}'", key, position, self.name);

        Ok(Some(attrs))
    }

    pub(crate) fn flush(&self) -> GraphResult<()> {
        self.manager.flush().map_err(|e| self.write_error(e))
    }

    fn write_error(&self, e: StorageError) -> GraphError {
        error!("Could not write to region '{}': {}", self.name, e);
        GraphError::writing(format!("{} - {}", self.name, e), e)
    }
}
