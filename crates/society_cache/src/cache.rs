//! The content-addressed file cache.
//!
//! `FileCache` ties together directory expansion, fingerprinting, slot layout
//! and slot encoding. It is constructed over a fixed candidate file set and
//! answers which of those files already have a stored result for their current
//! content.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::artifact;
use crate::discover::expand_paths;
use crate::error::CacheError;
use crate::hasher::SourceHasher;
use crate::slot;

/// Default cache root, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "doc/society/cache";

/// Classification of the candidate files against the cache.
///
/// Both lists keep the candidate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Files whose current-content slot already exists.
    pub unchanged: Vec<PathBuf>,

    /// Files whose current-content slot does not exist yet.
    pub updated: Vec<PathBuf>,
}

impl Partition {
    /// Total number of classified files.
    pub fn len(&self) -> usize {
        self.unchanged.len() + self.updated.len()
    }

    /// Returns `true` if no files were classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Content-addressed cache of per-file values.
///
/// Slots are never overwritten with different content: a file edit moves the
/// file to a new slot and the old one is left behind until [`FileCache::prune`]
/// removes it.
///
/// The cache is not safe for concurrent use across processes. A slot that
/// [`FileCache::partition`] reports as present may disappear before it is
/// retrieved if another process clears the cache in between.
#[derive(Debug)]
pub struct FileCache {
    /// Root directory for all slots.
    cache_dir: PathBuf,

    /// The expanded candidate file set.
    files: Vec<PathBuf>,
}

impl FileCache {
    /// Creates a cache rooted at `cache_dir` over the given paths.
    ///
    /// Directories in `paths` are expanded once, here, to the files beneath
    /// them whose extension is in `extensions`.
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        paths: &[PathBuf],
        extensions: &[String],
    ) -> Result<Self, CacheError> {
        let files = expand_paths(paths, extensions)?;
        Ok(Self {
            cache_dir: cache_dir.into(),
            files,
        })
    }

    /// Returns the expanded candidate file set.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the slot for the current content of `path`.
    pub fn slot_path(&self, path: &Path) -> Result<PathBuf, CacheError> {
        let fingerprint = SourceHasher::hash_file(path)?;
        slot::slot_path(&self.cache_dir, &fingerprint, path)
    }

    /// Splits the candidate files into unchanged and updated.
    ///
    /// A file is unchanged iff the slot for its current content exists. Slot
    /// contents are not inspected.
    pub fn partition(&self) -> Result<Partition, CacheError> {
        let mut partition = Partition::default();
        for path in &self.files {
            let slot = self.slot_path(path)?;
            if slot.is_file() {
                log::debug!("cache hit: {} -> {}", path.display(), slot.display());
                partition.unchanged.push(path.clone());
            } else {
                log::debug!("cache miss: {}", path.display());
                partition.updated.push(path.clone());
            }
        }
        Ok(partition)
    }

    /// Candidate files with a stored result for their current content.
    pub fn unchanged_files(&self) -> Result<Vec<PathBuf>, CacheError> {
        Ok(self.partition()?.unchanged)
    }

    /// Candidate files without a stored result for their current content.
    pub fn updated_files(&self) -> Result<Vec<PathBuf>, CacheError> {
        Ok(self.partition()?.updated)
    }

    /// Stores `value` in the slot for the current content of `path`.
    ///
    /// Creates intermediate directories as needed and returns the slot path.
    /// Storing again for unchanged content rewrites the same slot.
    pub fn store<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<PathBuf, CacheError> {
        let slot = self.slot_path(path)?;
        if let Some(dir) = slot.parent() {
            std::fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, e))?;
        }
        let bytes = artifact::encode(value)?;
        artifact::write_atomic(&slot, &bytes)?;
        log::trace!("stored {} bytes at {}", bytes.len(), slot.display());
        Ok(slot)
    }

    /// Loads the value stored for the current content of `path`.
    ///
    /// Fails with [`CacheError::Miss`] if no such slot exists.
    pub fn retrieve<T: DeserializeOwned>(&self, path: &Path) -> Result<T, CacheError> {
        let slot = self.slot_path(path)?;
        let raw = match std::fs::read(&slot) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CacheError::Miss {
                    path: path.to_path_buf(),
                    slot,
                });
            }
            Err(e) => return Err(CacheError::io(slot, e)),
        };
        artifact::decode(&slot, &raw)
    }

    /// Removes superseded slots of the candidate files.
    ///
    /// For each candidate, deletes the sibling slots that belong to the same
    /// basename but a different fingerprint. Slots of files outside the
    /// candidate set are left alone. Returns the number of files removed.
    pub fn prune(&self) -> Result<usize, CacheError> {
        let mut removed = 0;
        for path in &self.files {
            let current = self.slot_path(path)?;
            let Some(dir) = current.parent() else { continue };
            if !dir.is_dir() {
                continue;
            }
            let Some(basename) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };

            let entries = std::fs::read_dir(dir).map_err(|e| CacheError::io(dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| CacheError::io(dir, e))?;
                let candidate = entry.path();
                if candidate == current {
                    continue;
                }
                let name = entry.file_name();
                let name = name.to_string_lossy();
                let superseded = matches!(
                    slot::parse_slot_file_name(&name),
                    Some((_, base)) if base == basename
                );
                if superseded && candidate.is_file() {
                    std::fs::remove_file(&candidate).map_err(|e| CacheError::io(&candidate, e))?;
                    log::debug!("pruned {}", candidate.display());
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    /// Deletes the whole cache directory at `cache_dir`.
    ///
    /// Returns `false` if there was nothing to delete.
    pub fn clear(cache_dir: &Path) -> Result<bool, CacheError> {
        if !cache_dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(cache_dir).map_err(|e| CacheError::io(cache_dir, e))?;
        Ok(true)
    }
}
