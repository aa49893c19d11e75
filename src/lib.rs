//! MD5 (RFC 1321) with a hasher whose full internal state can be exported
//! and later restored, so a digest can be computed across process
//! boundaries or resumed after a checkpoint.
//!
//! MD5 is cryptographically broken. It is provided for compatibility only.

pub mod cs;
pub mod error;

pub use cs::security;
pub use cs::security::md5::{md5_digest, md5_hex, Md5, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};
pub use error::{Error, Result};
