// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage types and error handling
//!
//! This module defines the backend selector and the error type shared by all
//! storage managers and graph storages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage backend configuration
///
/// Specifies which underlying storage technology backs a graph storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Sled - Pure Rust embedded database
    /// Best for: durable single-process deployments
    Sled,

    /// Memory - In-memory storage
    /// Best for: Unit testing, ephemeral graphs
    Memory,
}

impl Default for StorageType {
    fn default() -> Self {
        StorageType::Sled
    }
}

impl std::str::FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sled" => Ok(StorageType::Sled),
            "memory" => Ok(StorageType::Memory),
            _ => Err(format!(
                "Unknown storage type: {}. Valid options: sled, memory",
                s
            )),
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StorageType::Sled => "sled",
            StorageType::Memory => "memory",
        };
        write!(f, "{}", name)
    }
}

/// Classification of a storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// The operation failed but the store is consistent; a caller may retry
    Transient,
    /// Data is likely inconsistent; the caller must abort and surface it
    Serious,
}

/// Error type for storage manager operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O related errors (file system etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No record lives at the requested position
    #[error("Slot not found (position {0})")]
    SlotNotFound(u64),

    /// A record failed its checksum or could not be decoded
    #[error("Corrupted record at position {position}: {reason}")]
    Corrupted { position: u64, reason: String },

    /// Record serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The record store temporarily refused the operation
    #[error("Storage temporarily unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific error (Sled etc.)
    #[error("Storage driver error: {0}")]
    BackendSpecific(String),
}

impl StorageError {
    /// Classify this error as transient or serious
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::Unavailable(_) => StorageErrorKind::Transient,
            StorageError::Io(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                StorageErrorKind::Transient
            }
            _ => StorageErrorKind::Serious,
        }
    }

    /// Check whether a caller may retry the failed operation
    pub fn is_transient(&self) -> bool {
        self.kind() == StorageErrorKind::Transient
    }

    pub fn corrupted<S: Into<String>>(position: u64, reason: S) -> Self {
        Self::Corrupted {
            position,
            reason: reason.into(),
        }
    }
}

impl From<bincode::Error> for StorageError {
    fn from(e: bincode::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

#[cfg(feature = "sled-backend")]
impl From<sled::Error> for StorageError {
    fn from(e: sled::Error) -> Self {
        match e {
            sled::Error::Io(io) => StorageError::Io(io),
            other => StorageError::BackendSpecific(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_parsing() {
        assert_eq!("SLED".parse::<StorageType>().unwrap(), StorageType::Sled);
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::Memory);
        assert!("rocksdb".parse::<StorageType>().is_err());
        assert_eq!(StorageType::Memory.to_string(), "memory");
    }

    #[test]
    fn test_error_classification() {
        assert!(StorageError::Unavailable("busy".to_string()).is_transient());
        assert_eq!(
            StorageError::SlotNotFound(3).kind(),
            StorageErrorKind::Serious
        );
        assert_eq!(
            StorageError::corrupted(1, "bad checksum").kind(),
            StorageErrorKind::Serious
        );
    }
}
