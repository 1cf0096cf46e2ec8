// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph Manager - Central access point to a graph database
//!
//! The graph manager validates entities, routes them to the storage region of
//! their partition and kind, and keeps cascading deletion consistent.
//!
//! Locking:
//! - Each open region has its own `RwLock` over its index. Reads take the read
//!   lock of one region at a time.
//! - Writers holding several regions lock node regions before edge regions,
//!   each group in ascending region name order. `store_edge` read-locks the
//!   endpoint node regions, `remove_node` write-locks its node region, then
//!   the edge regions of the partition one by one.
//! - The main database records which partition and kind own each region, so
//!   names that concatenate alike never share a region.

use super::error::{GraphError, GraphResult};
use super::region::{region_name, Attributes, EntityType, Region, RegionIndex};
use super::traversal::TraversalSpec;
use crate::config::{EndpointPolicy, GraphConfig};
use crate::data::{check_name, is_valid_name, Edge, End, EndpointSpec, Node};
use crate::storage::{create_graph_storage, GraphStorage, StorageError, StorageType};
use log::{debug, error, info, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Main database key mapping region names to the partition and kind owning them
const MAIN_DB_REGIONS: &str = "regions";

const MAIN_DB: &str = "main database";

/// Partition and kind a region was created for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RegionOwner {
    partition: String,
    kind: String,
}

impl RegionOwner {
    fn new(partition: &str, kind: &str) -> Self {
        Self {
            partition: partition.to_string(),
            kind: kind.to_string(),
        }
    }

    fn is(&self, partition: &str, kind: &str) -> bool {
        self.partition == partition && self.kind == kind
    }
}

/// Manager for all graph data of one graph storage
pub struct GraphManager {
    storage: Arc<dyn GraphStorage>,
    config: GraphConfig,

    /// Regions opened by this manager
    regions: RwLock<HashMap<String, Arc<Region>>>,

    /// Region owners seen in the main database; an owner never changes
    owners: Mutex<HashMap<String, RegionOwner>>,
}

impl GraphManager {
    /// Create a graph manager with the default configuration
    pub fn new(storage: Arc<dyn GraphStorage>) -> Self {
        Self::with_config(storage, GraphConfig::default())
    }

    /// Create a graph manager over an existing storage
    pub fn with_config(storage: Arc<dyn GraphStorage>, config: GraphConfig) -> Self {
        debug!(
            "Graph manager for storage '{}' (endpoint policy {:?})",
            storage.name(),
            config.endpoint_policy
        );
        Self {
            storage,
            config,
            regions: RwLock::new(HashMap::new()),
            owners: Mutex::new(HashMap::new()),
        }
    }

    /// Create the configured storage and a graph manager on top of it
    pub fn from_config(config: &GraphConfig) -> GraphResult<Self> {
        let path = match (&config.path, config.storage_type) {
            (Some(path), _) => path.clone(),
            (None, StorageType::Memory) => Default::default(),
            (None, storage_type) => {
                return Err(GraphError::invalid(format!(
                    "Storage type {} requires a database path",
                    storage_type
                )))
            }
        };

        info!(
            "Opening {} storage '{}' at {:?}",
            config.storage_type, config.storage_name, path
        );

        let storage = create_graph_storage(config.storage_type, &config.storage_name, &path)
            .map_err(|e| {
                error!("Could not open storage '{}': {}", config.storage_name, e);
                GraphError::access(format!("{} - {}", config.storage_name, e), e)
            })?;

        Ok(Self::with_config(storage, config.clone()))
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn GraphStorage> {
        &self.storage
    }

    /// Name of the underlying graph storage
    pub fn name(&self) -> &str {
        self.storage.name()
    }

    // ---- Nodes ----

    /// Store a node, overwriting any node with the same key and kind
    pub fn store_node(&self, partition: &str, node: &Node) -> GraphResult<()> {
        check_name("Partition name", partition)?;
        let (key, kind) = node.validate()?;

        let region = self.open_region(partition, kind, EntityType::Nodes)?;
        {
            let mut index = region.index.write();
            region.put(&mut index, key, node.attrs())?;
        }
        self.flush_if_configured(&region)
    }

    /// Fetch a node, `None` if it does not exist
    pub fn fetch_node(
        &self,
        partition: &str,
        kind: &str,
        key: &str,
    ) -> GraphResult<Option<Node>> {
        if !is_valid_name(partition) || !is_valid_name(kind) {
            return Ok(None);
        }
        let Some(region) = self.owned_region(partition, kind, EntityType::Nodes)? else {
            return Ok(None);
        };

        let index = region.index.read();
        match index.position(key) {
            Some(position) => Ok(Some(Node::from_attrs(region.fetch(position)?))),
            None => Ok(None),
        }
    }

    /// Remove a node and every edge which references it at a cascading end
    ///
    /// Returns the removed node, `None` if it did not exist.
    pub fn remove_node(
        &self,
        partition: &str,
        kind: &str,
        key: &str,
    ) -> GraphResult<Option<Node>> {
        check_name("Partition name", partition)?;
        check_name("Node kind", kind)?;

        let Some(node_region) = self.owned_region(partition, kind, EntityType::Nodes)? else {
            return Ok(None);
        };

        // Holding the node region keeps edges to the node from being stored
        // until the cascade is done
        let mut nodes = node_region.index.write();
        if !nodes.contains(key) {
            return Ok(None);
        }

        let mut edge_regions = Vec::new();
        for edge_kind in self.edge_kinds(partition)? {
            if let Some(region) = self.owned_region(partition, &edge_kind, EntityType::Edges)? {
                edge_regions.push(region);
            }
        }
        edge_regions.sort_by(|a, b| a.name().cmp(b.name()));

        let mut cascaded = Vec::new();
        for region in &edge_regions {
            let mut index = region.index.write();
            let doomed = index.cascading_referrers(kind, key);
            for edge_key in &doomed {
                region.delete(&mut index, edge_key)?;
            }
            if !doomed.is_empty() {
                cascaded.push((region.clone(), doomed.len()));
            }
        }

        let removed = node_region.delete(&mut nodes, key)?.map(Node::from_attrs);
        drop(nodes);
        debug!(
            "Removed node {}/{} from partition '{}' with {} cascading edges",
            kind,
            key,
            partition,
            cascaded.iter().map(|(_, count)| count).sum::<usize>()
        );

        self.flush_if_configured(&node_region)?;
        for (region, _) in &cascaded {
            self.flush_if_configured(region)?;
        }
        Ok(removed)
    }

    /// Check whether a node exists without reading its record
    pub fn node_exists(&self, partition: &str, kind: &str, key: &str) -> GraphResult<bool> {
        if !is_valid_name(partition) || !is_valid_name(kind) {
            return Ok(false);
        }
        Ok(match self.owned_region(partition, kind, EntityType::Nodes)? {
            Some(region) => region.index.read().contains(key),
            None => false,
        })
    }

    // ---- Edges ----

    /// Store an edge, overwriting any edge with the same key and kind
    ///
    /// The regions of both endpoint nodes stay read-locked while the edge is
    /// written, so a concurrent `remove_node` either sees the edge or runs
    /// before the endpoint check.
    pub fn store_edge(&self, partition: &str, edge: &Edge) -> GraphResult<()> {
        check_name("Partition name", partition)?;
        let (key, kind, ends) = edge.validate()?;

        let mut node_regions: Vec<Arc<Region>> = Vec::new();
        for (end, spec) in End::BOTH.iter().zip(ends.iter()) {
            let region = if is_valid_name(&spec.kind) {
                self.owned_region(partition, &spec.kind, EntityType::Nodes)?
            } else {
                None
            };
            match region {
                Some(region) => {
                    if !node_regions.iter().any(|r| r.name() == region.name()) {
                        node_regions.push(region);
                    }
                }
                None if self.config.endpoint_policy == EndpointPolicy::RequireEndpoints => {
                    self.dangling_endpoint(key, *end, spec)?
                }
                None => {}
            }
        }
        node_regions.sort_by(|a, b| a.name().cmp(b.name()));

        let region = self.open_region(partition, kind, EntityType::Edges)?;
        {
            // Node regions before the edge region, like remove_node
            let node_indexes: Vec<_> = node_regions
                .iter()
                .map(|r| (r.name(), r.index.read()))
                .collect();

            for (end, spec) in End::BOTH.iter().zip(ends.iter()) {
                let name = region_name(partition, &spec.kind, EntityType::Nodes);
                let exists = node_indexes
                    .iter()
                    .any(|(region, nodes)| *region == name && nodes.contains(&spec.key));
                if !exists {
                    self.dangling_endpoint(key, *end, spec)?;
                }
            }

            let mut index = region.index.write();
            region.put(&mut index, key, edge.attrs())?;
            index.link(key, ends);
        }
        self.flush_if_configured(&region)
    }

    fn dangling_endpoint(&self, key: &str, end: End, spec: &EndpointSpec) -> GraphResult<()> {
        match self.config.endpoint_policy {
            EndpointPolicy::RequireEndpoints => Err(GraphError::invalid(format!(
                "Edge {} references node {}/{} at {} which does not exist",
                key, spec.kind, spec.key, end
            ))),
            EndpointPolicy::AllowDangling => {
                warn!(
                    "Edge {} references node {}/{} at {} which does not exist (yet)",
                    key, spec.kind, spec.key, end
                );
                Ok(())
            }
        }
    }

    /// Fetch an edge, `None` if it does not exist
    pub fn fetch_edge(
        &self,
        partition: &str,
        kind: &str,
        key: &str,
    ) -> GraphResult<Option<Edge>> {
        if !is_valid_name(partition) || !is_valid_name(kind) {
            return Ok(None);
        }
        let Some(region) = self.owned_region(partition, kind, EntityType::Edges)? else {
            return Ok(None);
        };

        let index = region.index.read();
        match index.position(key) {
            Some(position) => Ok(Some(Edge::from_attrs(region.fetch(position)?))),
            None => Ok(None),
        }
    }

    /// Remove an edge; the nodes it references are left alone
    pub fn remove_edge(
        &self,
        partition: &str,
        kind: &str,
        key: &str,
    ) -> GraphResult<Option<Edge>> {
        check_name("Partition name", partition)?;
        check_name("Edge kind", kind)?;

        let Some(region) = self.owned_region(partition, kind, EntityType::Edges)? else {
            return Ok(None);
        };

        let removed = {
            let mut index = region.index.write();
            region.delete(&mut index, key)?
        };
        self.flush_if_configured(&region)?;
        Ok(removed.map(Edge::from_attrs))
    }

    /// Follow the edges of a node which match a traversal spec
    ///
    /// Returns the reached nodes together with the edges leading to them.
    /// Edges whose far end does not exist are skipped.
    pub fn traverse(
        &self,
        partition: &str,
        kind: &str,
        key: &str,
        spec: &TraversalSpec,
    ) -> GraphResult<Vec<(Node, Edge)>> {
        check_name("Partition name", partition)?;
        check_name("Node kind", kind)?;

        let mut result = Vec::new();
        for edge_kind in self.edge_kinds(partition)? {
            if !spec.matches_edge_kind(&edge_kind) {
                continue;
            }
            let Some(region) = self.owned_region(partition, &edge_kind, EntityType::Edges)? else {
                continue;
            };

            // Read matching edges under the lock, resolve their targets after
            let hits: Vec<(Attributes, EndpointSpec)> = {
                let index = region.index.read();
                let mut hits = Vec::new();
                for (edge_key, end, ends) in index.referrers(kind, key) {
                    let own = &ends[end as usize];
                    let other = &ends[end.other() as usize];
                    if !spec.matches_ends(own, other) {
                        continue;
                    }
                    if let Some(position) = index.position(edge_key) {
                        hits.push((region.fetch(position)?, other.clone()));
                    }
                }
                hits
            };

            for (attrs, target) in hits {
                if let Some(node) = self.fetch_node(partition, &target.kind, &target.key)? {
                    result.push((node, Edge::from_attrs(attrs)));
                }
            }
        }
        Ok(result)
    }

    // ---- Discovery ----

    /// All partitions which ever held data
    pub fn partitions(&self) -> GraphResult<Vec<String>> {
        let partitions: BTreeSet<String> = self
            .region_owners()?
            .into_values()
            .map(|owner| owner.partition)
            .collect();
        Ok(partitions.into_iter().collect())
    }

    /// Node kinds of a partition
    pub fn node_kinds(&self, partition: &str) -> GraphResult<Vec<String>> {
        self.kinds(partition, EntityType::Nodes)
    }

    /// Edge kinds of a partition
    pub fn edge_kinds(&self, partition: &str) -> GraphResult<Vec<String>> {
        self.kinds(partition, EntityType::Edges)
    }

    /// Sorted keys of all nodes of a kind
    pub fn node_keys(&self, partition: &str, kind: &str) -> GraphResult<Vec<String>> {
        self.keys(partition, kind, EntityType::Nodes)
    }

    /// Sorted keys of all edges of a kind
    pub fn edge_keys(&self, partition: &str, kind: &str) -> GraphResult<Vec<String>> {
        self.keys(partition, kind, EntityType::Edges)
    }

    pub fn node_count(&self, partition: &str, kind: &str) -> GraphResult<usize> {
        self.count(partition, kind, EntityType::Nodes)
    }

    pub fn edge_count(&self, partition: &str, kind: &str) -> GraphResult<usize> {
        self.count(partition, kind, EntityType::Edges)
    }

    /// Flush all regions of the underlying storage
    pub fn flush(&self) -> GraphResult<()> {
        self.storage.flush_all().map_err(|e| {
            error!("Could not flush storage '{}': {}", self.name(), e);
            GraphError::writing(format!("{} - {}", self.name(), e), e)
        })
    }

    fn kinds(&self, partition: &str, entity: EntityType) -> GraphResult<Vec<String>> {
        check_name("Partition name", partition)?;

        let owned: BTreeSet<String> = self
            .region_owners()?
            .into_iter()
            .filter(|(name, owner)| {
                owner.partition == partition
                    && *name == region_name(partition, &owner.kind, entity)
            })
            .map(|(_, owner)| owner.kind)
            .collect();

        let mut kinds = Vec::new();
        for kind in owned {
            let name = region_name(partition, &kind, entity);
            if self.regions.read().contains_key(&name) || self.region_exists(&name)? {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    fn keys(&self, partition: &str, kind: &str, entity: EntityType) -> GraphResult<Vec<String>> {
        check_name("Partition name", partition)?;
        check_name("Kind", kind)?;
        Ok(match self.owned_region(partition, kind, entity)? {
            Some(region) => region.index.read().keys(),
            None => Vec::new(),
        })
    }

    fn count(&self, partition: &str, kind: &str, entity: EntityType) -> GraphResult<usize> {
        check_name("Partition name", partition)?;
        check_name("Kind", kind)?;
        Ok(match self.owned_region(partition, kind, entity)? {
            Some(region) => region.index.read().len(),
            None => 0,
        })
    }

    // ---- Regions ----

    /// Open a region for writing, claiming it for the partition and kind
    fn open_region(
        &self,
        partition: &str,
        kind: &str,
        entity: EntityType,
    ) -> GraphResult<Arc<Region>> {
        let name = region_name(partition, kind, entity);
        self.claim(&name, partition, kind)?;
        self.region(&name, entity, true)?
            .ok_or_else(|| missing_region(&name))
    }

    /// Existing region of a partition and kind
    ///
    /// `None` if the region does not exist or was created for another
    /// partition and kind which share its name.
    fn owned_region(
        &self,
        partition: &str,
        kind: &str,
        entity: EntityType,
    ) -> GraphResult<Option<Arc<Region>>> {
        let name = region_name(partition, kind, entity);
        match self.owner(&name)? {
            Some(owner) if owner.is(partition, kind) => self.region(&name, entity, false),
            _ => Ok(None),
        }
    }

    /// Get an open region or open it, building its index on first use
    fn region(
        &self,
        name: &str,
        entity: EntityType,
        create: bool,
    ) -> GraphResult<Option<Arc<Region>>> {
        if let Some(region) = self.regions.read().get(name) {
            return Ok(Some(region.clone()));
        }

        let mut regions = self.regions.write();
        if let Some(region) = regions.get(name) {
            return Ok(Some(region.clone()));
        }

        let manager = match self.storage.storage_manager(name, create) {
            Ok(Some(manager)) => manager,
            Ok(None) => return Ok(None),
            Err(e) => return Err(access_error(name, e)),
        };

        let index =
            RegionIndex::build(manager.as_ref(), entity).map_err(|e| access_error(name, e))?;
        debug!("Opened region '{}' with {} records", name, index.len());

        let region = Arc::new(Region::new(name.to_string(), entity, manager, index));
        regions.insert(name.to_string(), region.clone());
        Ok(Some(region))
    }

    fn region_exists(&self, name: &str) -> GraphResult<bool> {
        self.storage
            .storage_manager(name, false)
            .map(|manager| manager.is_some())
            .map_err(|e| access_error(name, e))
    }

    fn flush_if_configured(&self, region: &Region) -> GraphResult<()> {
        if self.config.flush_on_write {
            region.flush()?;
        }
        Ok(())
    }

    // ---- Main database ----

    fn region_owners(&self) -> GraphResult<BTreeMap<String, RegionOwner>> {
        let value = self
            .storage
            .main_db_get(MAIN_DB_REGIONS)
            .map_err(|e| access_error(MAIN_DB, e))?;

        match value {
            None => Ok(BTreeMap::new()),
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| access_error(MAIN_DB, StorageError::Serialization(e.to_string()))),
        }
    }

    fn owner(&self, name: &str) -> GraphResult<Option<RegionOwner>> {
        if let Some(owner) = self.owners.lock().get(name) {
            return Ok(Some(owner.clone()));
        }
        let owner = self.region_owners()?.remove(name);
        if let Some(owner) = &owner {
            self.owners.lock().insert(name.to_string(), owner.clone());
        }
        Ok(owner)
    }

    /// Record the partition and kind owning a region
    ///
    /// Fails when the region name already belongs to another partition and
    /// kind, e.g. partition `ab` kind `c` and partition `a` kind `bc`.
    fn claim(&self, name: &str, partition: &str, kind: &str) -> GraphResult<()> {
        let mut owners = self.owners.lock();
        let owner = match owners.get(name) {
            Some(owner) => owner.clone(),
            None => {
                let mut all = self.region_owners()?;
                let owner = match all.get(name) {
                    Some(owner) => owner.clone(),
                    None => {
                        let owner = RegionOwner::new(partition, kind);
                        all.insert(name.to_string(), owner.clone());
                        self.write_region_owners(&all)?;
                        debug!(
                            "Region '{}' belongs to kind {} of partition '{}'",
                            name, kind, partition
                        );
                        owner
                    }
                };
                owners.insert(name.to_string(), owner.clone());
                owner
            }
        };

        if owner.is(partition, kind) {
            Ok(())
        } else {
            Err(GraphError::invalid(format!(
                "Kind {} of partition {} maps to region {} which belongs to kind {} of partition {}",
                kind, partition, name, owner.kind, owner.partition
            )))
        }
    }

    fn write_region_owners(&self, owners: &BTreeMap<String, RegionOwner>) -> GraphResult<()> {
        let text = serde_json::to_string(owners).map_err(|e| {
            GraphError::writing(MAIN_DB, StorageError::Serialization(e.to_string()))
        })?;
        self.storage.main_db_set(MAIN_DB_REGIONS, &text).map_err(|e| {
            error!("Could not update {} key '{}': {}", MAIN_DB, MAIN_DB_REGIONS, e);
            GraphError::writing(format!("{} - {}", MAIN_DB, e), e)
        })
    }
}

fn access_error(name: &str, e: StorageError) -> GraphError {
    error!("Could not access storage component '{}': {}", name, e);
    GraphError::access(format!("{} - {}", name, e), e)
}

fn missing_region(name: &str) -> GraphError {
    access_error(
        name,
        StorageError::BackendSpecific(format!("Region {} was not created", name)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryGraphStorage;

    fn manager() -> GraphManager {
        GraphManager::new(Arc::new(MemoryGraphStorage::new("test")))
    }

    fn edge(key: &str, from: &str, to: &str, cascading: bool) -> Edge {
        Edge::new(key, "Wrote")
            .with_end(End::One, &EndpointSpec::new(from, "Author", "Author", cascading))
            .with_end(End::Two, &EndpointSpec::new(to, "Song", "Song", false))
    }

    #[test]
    fn test_store_and_fetch_node() {
        let gm = manager();
        gm.store_node("main", &Node::new("000", "Author").with_attr("name", "John"))
            .unwrap();

        let node = gm.fetch_node("main", "Author", "000").unwrap().unwrap();
        assert_eq!(node.attr("name").and_then(|v| v.as_str()), Some("John"));
        assert!(gm.fetch_node("main", "Author", "001").unwrap().is_none());
        assert!(gm.fetch_node("main", "Song", "000").unwrap().is_none());
        assert!(gm.fetch_node("other", "Author", "000").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_keeps_one_record() {
        let gm = manager();
        gm.store_node("main", &Node::new("1", "X").with_attr("v", 1)).unwrap();
        gm.store_node("main", &Node::new("1", "X").with_attr("v", 2)).unwrap();

        assert_eq!(gm.node_count("main", "X").unwrap(), 1);
        let node = gm.fetch_node("main", "X", "1").unwrap().unwrap();
        assert_eq!(node.attr("v").and_then(|v| v.as_integer()), Some(2));
    }

    #[test]
    fn test_fetch_with_invalid_kind() {
        let gm = manager();
        gm.store_node("main", &Node::new("1", "X")).unwrap();
        assert!(gm.fetch_node("main", "X!", "1").unwrap().is_none());
        assert!(gm.fetch_edge("main", "", "1").unwrap().is_none());
    }

    #[test]
    fn test_region_owned_by_first_claim() {
        let gm = manager();
        gm.store_node("ab", &Node::new("1", "c")).unwrap();

        let err = gm.store_node("a", &Node::new("1", "bc")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphError: Invalid data (Kind bc of partition a maps to region abc.nodes which belongs to kind c of partition ab)"
        );
        assert!(gm.node_kinds("a").unwrap().is_empty());
        assert!(gm.fetch_node("a", "bc", "1").unwrap().is_none());
    }

    #[test]
    fn test_invalid_partition_name() {
        let gm = manager();
        let err = gm.store_node("a b", &Node::new("1", "X")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphError: Invalid data (Partition name a b is not alphanumeric - can only contain [a-zA-Z0-9_])"
        );
    }

    #[test]
    fn test_edge_relink_on_overwrite() {
        let gm = manager();
        gm.store_edge("main", &edge("e", "000", "Aria1", true)).unwrap();
        gm.store_edge("main", &edge("e", "001", "Aria1", true)).unwrap();

        // The edge no longer references 000
        gm.store_node("main", &Node::new("000", "Author")).unwrap();
        gm.remove_node("main", "Author", "000").unwrap();
        assert!(gm.fetch_edge("main", "Wrote", "e").unwrap().is_some());

        gm.store_node("main", &Node::new("001", "Author")).unwrap();
        gm.remove_node("main", "Author", "001").unwrap();
        assert!(gm.fetch_edge("main", "Wrote", "e").unwrap().is_none());
    }

    #[test]
    fn test_require_endpoints() {
        let gm = GraphManager::with_config(
            Arc::new(MemoryGraphStorage::new("test")),
            GraphConfig::memory().with_endpoint_policy(EndpointPolicy::RequireEndpoints),
        );

        let err = gm.store_edge("main", &edge("e", "000", "Aria1", true)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphError: Invalid data (Edge e references node Author/000 at end1 which does not exist)"
        );

        gm.store_node("main", &Node::new("000", "Author")).unwrap();
        gm.store_node("main", &Node::new("Aria1", "Song")).unwrap();
        gm.store_edge("main", &edge("e", "000", "Aria1", true)).unwrap();
        assert_eq!(gm.edge_count("main", "Wrote").unwrap(), 1);
    }

    #[test]
    fn test_discovery() {
        let gm = manager();
        assert!(gm.partitions().unwrap().is_empty());

        gm.store_node("main", &Node::new("1", "X")).unwrap();
        gm.store_node("second", &Node::new("1", "Y")).unwrap();
        gm.store_edge("main", &edge("e", "1", "2", false)).unwrap();

        assert_eq!(gm.partitions().unwrap(), vec!["main", "second"]);
        assert_eq!(gm.node_kinds("main").unwrap(), vec!["X"]);
        assert_eq!(gm.node_kinds("second").unwrap(), vec!["Y"]);
        assert_eq!(gm.edge_kinds("main").unwrap(), vec!["Wrote"]);
        assert!(gm.edge_kinds("second").unwrap().is_empty());
    }

    #[test]
    fn test_traverse() {
        let gm = manager();
        gm.store_node("main", &Node::new("000", "Author")).unwrap();
        gm.store_node("main", &Node::new("Aria1", "Song")).unwrap();
        gm.store_node("main", &Node::new("Aria2", "Song")).unwrap();
        gm.store_edge("main", &edge("e1", "000", "Aria1", true)).unwrap();
        gm.store_edge("main", &edge("e2", "000", "Aria2", true)).unwrap();
        gm.store_edge("main", &edge("e3", "000", "Missing", true)).unwrap();

        let spec: TraversalSpec = "Author:Wrote:Song:Song".parse().unwrap();
        let reached = gm.traverse("main", "Author", "000", &spec).unwrap();
        let keys: Vec<_> = reached.iter().map(|(n, _)| n.key().unwrap()).collect();
        assert_eq!(keys, vec!["Aria1", "Aria2"]);
        assert_eq!(reached[0].1.key(), Some("e1"));

        let back = gm.traverse("main", "Song", "Aria1", &TraversalSpec::any()).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].0.key(), Some("000"));

        let none = gm
            .traverse("main", "Author", "000", &TraversalSpec::new("Song", "", "", ""))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_from_config() {
        let gm = GraphManager::from_config(&GraphConfig::memory()).unwrap();
        assert_eq!(gm.name(), "partgraph");

        let err = GraphManager::from_config(&GraphConfig::default()).err().unwrap();
        assert!(err.to_string().contains("requires a database path"));
    }
}
