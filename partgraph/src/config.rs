// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph manager configuration

use crate::graph::{GraphError, GraphResult};
use crate::storage::StorageType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Policy for edges whose endpoint nodes are not stored
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndpointPolicy {
    /// Edges may reference nodes which do not exist (yet)
    #[default]
    AllowDangling,
    /// Both endpoint nodes must exist when an edge is stored
    RequireEndpoints,
}

/// Configuration for building a graph manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Storage backend
    pub storage_type: StorageType,

    /// Name of the graph storage
    pub storage_name: String,

    /// Database directory, required by durable backends
    pub path: Option<PathBuf>,

    /// Referential integrity policy for edges
    pub endpoint_policy: EndpointPolicy,

    /// Flush storage after every mutation
    pub flush_on_write: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Sled,
            storage_name: "partgraph".to_string(),
            path: None,
            endpoint_policy: EndpointPolicy::AllowDangling,
            flush_on_write: false,
        }
    }
}

impl GraphConfig {
    /// In-memory configuration for tests and ephemeral graphs
    pub fn memory() -> Self {
        Self {
            storage_type: StorageType::Memory,
            ..Self::default()
        }
    }

    /// Durable configuration rooted at a directory
    pub fn durable<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            storage_type: StorageType::Sled,
            path: Some(path.into()),
            flush_on_write: true,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> GraphResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&text).map_err(|e| {
            GraphError::invalid(format!(
                "Could not parse configuration {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    pub fn with_endpoint_policy(mut self, policy: EndpointPolicy) -> Self {
        self.endpoint_policy = policy;
        self
    }

    pub fn with_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets() {
        let config = GraphConfig::default();
        assert_eq!(config.storage_type, StorageType::Sled);
        assert_eq!(config.endpoint_policy, EndpointPolicy::AllowDangling);

        let config = GraphConfig::memory();
        assert_eq!(config.storage_type, StorageType::Memory);
        assert!(config.path.is_none());

        let config = GraphConfig::durable("/tmp/db");
        assert_eq!(config.path, Some(PathBuf::from("/tmp/db")));
        assert!(config.flush_on_write);
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"storage_type": "memory", "endpoint_policy": "require_endpoints"}}"#
        )
        .unwrap();

        let config = GraphConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage_type, StorageType::Memory);
        assert_eq!(config.endpoint_policy, EndpointPolicy::RequireEndpoints);
        assert_eq!(config.storage_name, "partgraph");
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GraphConfig::from_file(file.path()).is_err());
    }
}
