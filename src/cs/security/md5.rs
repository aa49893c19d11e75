//! MD5 (RFC 1321) with a resumable hasher.
//!
//! MD5 is broken and must not be used for anything security-sensitive. This
//! implementation exists for compatibility with systems that still exchange
//! MD5 digests, e.g. checkpointed uploads that hash a stream in pieces.
//!
//! Besides the usual `update`/`sum` flow, [`Md5`] can export its complete
//! internal state with [`Md5::get_state`] and be rebuilt from that blob with
//! [`Md5::from_state`], so hashing can continue in another process.
//!
//! ```
//! use md5_resume::Md5;
//!
//! let mut first = Md5::new();
//! first.update(b"hello ");
//! let blob = first.get_state();
//!
//! let mut resumed = Md5::from_state(&blob).unwrap();
//! resumed.update(b"world");
//! assert_eq!(resumed.sum(), md5_resume::md5_digest(b"hello world"));
//! ```

pub mod block;
mod state;

use std::io;

use log::{debug, trace, warn};

use crate::error::Result;
use state::StateRecord;

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// The size of one MD5 compression block in bytes.
pub const MD5_BLOCK_SIZE: usize = 64;

/// The initial values for (A, B, C, D) from the MD5 specification.
const INIT: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];

/// An incremental MD5 hasher.
///
/// `Clone` gives an independent hasher at the same stream position;
/// `PartialEq` compares every internal byte, including buffer bytes past
/// the valid prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Md5 {
    /// Running state (A, B, C, D).
    s: [u32; 4],
    /// Partial block. Bytes at `nx..` are leftovers from earlier blocks.
    x: [u8; MD5_BLOCK_SIZE],
    /// Valid bytes in `x`, always below `MD5_BLOCK_SIZE` between calls.
    nx: usize,
    /// Total bytes written, padding excluded.
    len: u64,
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Creates a hasher in the initial state.
    pub fn new() -> Self {
        Self {
            s: INIT,
            x: [0u8; MD5_BLOCK_SIZE],
            nx: 0,
            len: 0,
        }
    }

    /// Rebuilds a hasher from a blob produced by [`Md5::get_state`].
    pub fn from_state(blob: &[u8]) -> Result<Self> {
        let mut d = Self::new();
        d.set_state(blob)?;
        Ok(d)
    }

    /// Returns the hasher to its initial state.
    ///
    /// The buffer contents are left alone; only the valid count is cleared.
    pub fn reset(&mut self) {
        self.s = INIT;
        self.nx = 0;
        self.len = 0;
    }

    /// Digest size in bytes.
    pub fn output_size(&self) -> usize {
        MD5_OUTPUT_SIZE
    }

    /// Compression block size in bytes.
    pub fn block_size(&self) -> usize {
        MD5_BLOCK_SIZE
    }

    /// Number of bytes written since the last reset.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feeds `data` into the hasher and returns the number of bytes consumed,
    /// which is always `data.len()`.
    pub fn update(&mut self, data: &[u8]) -> usize {
        let written = data.len();
        self.len = self.len.wrapping_add(written as u64);
        let mut p = data;

        if self.nx > 0 {
            let n = p.len().min(MD5_BLOCK_SIZE - self.nx);
            self.x[self.nx..self.nx + n].copy_from_slice(&p[..n]);
            self.nx += n;
            if self.nx == MD5_BLOCK_SIZE {
                block::compress(&mut self.s, &self.x);
                self.nx = 0;
            }
            p = &p[n..];
        }

        if p.len() >= MD5_BLOCK_SIZE {
            let n = p.len() & !(MD5_BLOCK_SIZE - 1);
            trace!("compressing {} whole blocks from input", n / MD5_BLOCK_SIZE);
            block::compress(&mut self.s, &p[..n]);
            p = &p[n..];
        }

        if !p.is_empty() {
            self.x[..p.len()].copy_from_slice(p);
            self.nx = p.len();
        }

        written
    }

    /// Digest of everything written so far.
    ///
    /// Works on a copy, so the hasher can keep accepting data afterwards.
    pub fn sum(&self) -> [u8; MD5_OUTPUT_SIZE] {
        self.clone().checksum()
    }

    /// Appends the current digest to `out`.
    pub fn sum_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.sum());
    }

    /// Lowercase hex form of [`Md5::sum`].
    pub fn hex_digest(&self) -> String {
        hex::encode(self.sum())
    }

    /// Consumes the hasher and returns the digest.
    pub fn finalize(mut self) -> [u8; MD5_OUTPUT_SIZE] {
        self.checksum()
    }

    fn checksum(&mut self) -> [u8; MD5_OUTPUT_SIZE] {
        // Padding: a 1 bit, then 0 bits until 56 bytes mod 64.
        let len = self.len;
        let mut tmp = [0u8; MD5_BLOCK_SIZE];
        tmp[0] = 0x80;
        let rem = (len % MD5_BLOCK_SIZE as u64) as usize;
        if rem < 56 {
            self.update(&tmp[..56 - rem]);
        } else {
            self.update(&tmp[..MD5_BLOCK_SIZE + 56 - rem]);
        }

        // Length in bits, little-endian.
        self.update(&len.wrapping_shl(3).to_le_bytes());

        assert_eq!(self.nx, 0, "MD5 padding left {} bytes buffered", self.nx);

        let mut digest = [0u8; MD5_OUTPUT_SIZE];
        for (out, word) in digest.chunks_exact_mut(4).zip(self.s) {
            out.copy_from_slice(&word.to_le_bytes());
        }
        digest
    }

    /// Exports the full internal state as an opaque blob.
    ///
    /// The blob carries all 64 buffer bytes, not just the valid prefix.
    pub fn get_state(&self) -> Vec<u8> {
        let blob = state::encode(&StateRecord {
            state: self.s,
            buffer: self.x.to_vec(),
            nx: self.nx as u64,
            len: self.len,
        });
        debug!(
            "exported MD5 state at byte {} ({} buffered, {} byte blob)",
            self.len,
            self.nx,
            blob.len()
        );
        blob
    }

    /// Replaces the internal state with one decoded from `blob`.
    ///
    /// On error the hasher is left exactly as it was. Only the blob's shape is
    /// checked, so it must come from a trusted [`Md5::get_state`] call.
    pub fn set_state(&mut self, blob: &[u8]) -> Result<()> {
        let decoded = state::decode(blob).map_err(|err| {
            warn!("rejected MD5 state blob of {} bytes: {}", blob.len(), err);
            err
        })?;

        self.s = decoded.state;
        self.x = decoded.buffer;
        self.nx = decoded.nx;
        self.len = decoded.len;
        debug!("restored MD5 state at byte {} ({} buffered)", self.len, self.nx);
        Ok(())
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.update(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Convenience function to compute an MD5 digest in a single shot.
pub fn md5_digest(data: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize()
}

/// Lowercase hex MD5 of `data`.
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5_digest(data))
}
