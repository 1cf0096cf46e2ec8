// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Record codec for entities stored in regions
//!
//! Layout: `crc32 (4 bytes, little endian) | bincode payload`. Every decode
//! verifies the checksum; a mismatch is a corrupted record.

use super::types::{StorageError, StorageResult};
use crc32fast::Hasher;
use serde::de::DeserializeOwned;
use serde::Serialize;

const CHECKSUM_LEN: usize = 4;

fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Encode a value into a checksummed record
pub fn encode_record<T: Serialize>(value: &T) -> StorageResult<Vec<u8>> {
    let payload = bincode::serialize(value)?;
    let mut record = Vec::with_capacity(CHECKSUM_LEN + payload.len());
    record.extend_from_slice(&compute_checksum(&payload).to_le_bytes());
    record.extend_from_slice(&payload);
    Ok(record)
}

/// Decode a checksummed record read from a position
pub fn decode_record<T: DeserializeOwned>(position: u64, record: &[u8]) -> StorageResult<T> {
    if record.len() < CHECKSUM_LEN {
        return Err(StorageError::corrupted(position, "record too short"));
    }
    let (checksum, payload) = record.split_at(CHECKSUM_LEN);
    let mut expected = [0u8; CHECKSUM_LEN];
    expected.copy_from_slice(checksum);

    if compute_checksum(payload) != u32::from_le_bytes(expected) {
        return Err(StorageError::corrupted(position, "checksum mismatch"));
    }

    bincode::deserialize(payload).map_err(|e| StorageError::corrupted(position, e.to_string()))
}
