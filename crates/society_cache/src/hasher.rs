//! Source file fingerprinting.

use std::path::Path;

use society_common::ContentHash;

use crate::error::CacheError;

/// Utility for computing content fingerprints of source files.
pub struct SourceHasher;

impl SourceHasher {
    /// Computes the content hash of a single file.
    ///
    /// Reads the whole file and returns its XXH3-128 content hash. The file is
    /// read on every call, so the result always reflects current content.
    pub fn hash_file(path: &Path) -> Result<ContentHash, CacheError> {
        let content = std::fs::read(path).map_err(|e| CacheError::io(path, e))?;
        Ok(ContentHash::from_bytes(&content))
    }
}
