use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Only restoring a hasher from a state blob can fail; hashing itself is total.
#[derive(Error, Debug)]
pub enum Error {
    /// The state blob could not be decoded (truncated, trailing bytes, bad length prefix).
    #[error("failed to decode hasher state: {0}")]
    Decode(#[from] bincode::Error),

    /// The blob decoded, but a field has the wrong shape.
    #[error("invalid hasher state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, Error>;
