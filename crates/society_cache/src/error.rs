//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Nothing in the cache is fail-safe: a missing slot on read, a corrupt slot,
/// or a storage failure is always surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A slot was read that does not exist.
    ///
    /// The driver only reads slots that a partition proved to exist, so this
    /// indicates a logic error or a concurrent modification of the cache.
    #[error("cache miss on read for {path}: slot {slot} does not exist")]
    Miss {
        /// The source file whose slot was requested.
        path: PathBuf,
        /// The slot path that was expected.
        slot: PathBuf,
    },

    /// A source path cannot be mapped to a slot (e.g. it has no file name).
    #[error("cannot derive a cache slot for {path}: {reason}")]
    InvalidPath {
        /// The offending source path.
        path: PathBuf,
        /// Why no slot can be derived.
        reason: String,
    },

    /// A slot file has an invalid or missing header.
    #[error("invalid slot header in {path}: {reason}")]
    InvalidHeader {
        /// The slot file path.
        path: PathBuf,
        /// Description of the header problem.
        reason: String,
    },

    /// The stored checksum does not match the computed checksum of the payload.
    #[error("checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The slot file path.
        path: PathBuf,
        /// The expected checksum from the header.
        expected: String,
        /// The actual checksum computed from the payload.
        actual: String,
    },

    /// The slot format version does not match the current version.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The slot file path.
        path: PathBuf,
        /// The expected format version.
        expected: u32,
        /// The actual format version found in the file.
        actual: u32,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

impl CacheError {
    /// Builds an [`CacheError::Io`] from a path and an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
