//! Serialized form of a hasher's internal state.
//!
//! The blob is the bincode encoding of [`StateRecord`] under a fixed option
//! set (fixed-width little-endian integers, no trailing bytes). Fields are
//! encoded in declaration order: state words, buffer, valid count, length.

use bincode::Options;
use serde::{Deserialize, Serialize};

use super::MD5_BLOCK_SIZE;
use crate::error::{Error, Result};

/// Snapshot of `{state, buffer, nx, len}`.
///
/// `buffer` always holds all 64 bytes, including the stale ones past `nx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StateRecord {
    pub state: [u32; 4],
    pub buffer: Vec<u8>,
    pub nx: u64,
    pub len: u64,
}

/// A decoded record whose fields have been checked against the engine's shapes.
pub(crate) struct DecodedState {
    pub state: [u32; 4],
    pub buffer: [u8; MD5_BLOCK_SIZE],
    pub nx: usize,
    pub len: u64,
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

pub(crate) fn encode(record: &StateRecord) -> Vec<u8> {
    // Serializing a plain struct of integers and a byte vector into memory cannot fail.
    match options().serialize(record) {
        Ok(bytes) => bytes,
        Err(err) => unreachable!("in-memory state encoding failed: {}", err),
    }
}

pub(crate) fn decode(blob: &[u8]) -> Result<DecodedState> {
    let record: StateRecord = options().deserialize(blob)?;

    let buffer: [u8; MD5_BLOCK_SIZE] = record.buffer.as_slice().try_into().map_err(|_| {
        Error::InvalidState(format!(
            "buffer holds {} bytes, expected {}",
            record.buffer.len(),
            MD5_BLOCK_SIZE
        ))
    })?;

    let nx = usize::try_from(record.nx)
        .ok()
        .filter(|&nx| nx < MD5_BLOCK_SIZE)
        .ok_or_else(|| {
            Error::InvalidState(format!(
                "buffered byte count {} is not below the block size {}",
                record.nx, MD5_BLOCK_SIZE
            ))
        })?;

    Ok(DecodedState {
        state: record.state,
        buffer,
        nx,
        len: record.len,
    })
}
