// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph error types

use crate::storage::{StorageError, StorageErrorKind};
use thiserror::Error;

/// Errors raised by the graph manager and the import/export pipelines
#[derive(Error, Debug)]
pub enum GraphError {
    /// An entity is missing required fields or uses an invalid name
    #[error("GraphError: Invalid data ({0})")]
    InvalidData(String),

    /// A storage region could not be opened, created or indexed
    #[error("GraphError: Failed to access graph storage component ({detail})")]
    AccessComponent {
        detail: String,
        #[source]
        source: StorageError,
    },

    /// A record could not be fetched from an open region
    #[error("GraphError: Could not read graph information ({detail})")]
    Reading {
        detail: String,
        #[source]
        source: StorageError,
    },

    /// A record could not be inserted, updated or freed
    #[error("GraphError: Could not write graph information ({detail})")]
    Writing {
        detail: String,
        #[source]
        source: StorageError,
    },

    /// An import document could not be decoded
    #[error("Could not decode file content as object with list of nodes and edges: {0}")]
    Decode(String),

    /// An import stream could not be decoded
    #[error("Could not decode stream {name}: {reason}")]
    DecodeStream { name: String, reason: String },

    /// Reading input or writing output failed
    #[error("GraphError: I/O failure ({0})")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidData(msg.into())
    }

    pub fn access<S: Into<String>>(detail: S, source: StorageError) -> Self {
        Self::AccessComponent {
            detail: detail.into(),
            source,
        }
    }

    pub fn reading<S: Into<String>>(detail: S, source: StorageError) -> Self {
        Self::Reading {
            detail: detail.into(),
            source,
        }
    }

    pub fn writing<S: Into<String>>(detail: S, source: StorageError) -> Self {
        Self::Writing {
            detail: detail.into(),
            source,
        }
    }

    /// The storage classification of the underlying failure, if any
    pub fn storage_kind(&self) -> Option<StorageErrorKind> {
        match self {
            GraphError::AccessComponent { source, .. }
            | GraphError::Reading { source, .. }
            | GraphError::Writing { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Check whether the failed operation may be retried by the caller
    pub fn is_transient(&self) -> bool {
        self.storage_kind() == Some(StorageErrorKind::Transient)
    }
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefixes() {
        let err = GraphError::reading("mainbla.nodes", StorageError::SlotNotFound(6));
        assert!(err
            .to_string()
            .starts_with("GraphError: Could not read graph information"));
        assert!(!err.is_transient());

        let err = GraphError::access(
            "mainbla.nodes",
            StorageError::Unavailable("busy".to_string()),
        );
        assert!(err
            .to_string()
            .starts_with("GraphError: Failed to access graph storage component"));
        assert!(err.is_transient());

        assert_eq!(
            GraphError::invalid("Node is missing a kind value").to_string(),
            "GraphError: Invalid data (Node is missing a kind value)"
        );
    }
}
