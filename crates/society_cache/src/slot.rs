//! Mapping from (source path, fingerprint) pairs to slot files.
//!
//! A slot lives at `<cache_root>/<dir of path>/<fingerprint>_<basename>`. The
//! directory part mirrors the source tree so that slots for one source file
//! are siblings, which is what [`FileCache::prune`](crate::FileCache::prune)
//! relies on.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use society_common::ContentHash;

use crate::error::CacheError;

/// Directory name substituted for `..` components so slots stay under the root.
pub const PARENT_DIR_SEGMENT: &str = "_parent_";

/// Directory name standing for the filesystem root of an absolute path.
pub const ROOT_DIR_SEGMENT: &str = "_root_";

/// Returns the directory under `cache_root` that holds the slots for `path`.
///
/// See [`logical_dir`] for how the directory part of `path` is mapped.
pub fn slot_dir(cache_root: &Path, path: &Path) -> PathBuf {
    cache_root.join(logical_dir(path))
}

/// Maps the directory part of `path` to a relative path of safe segments.
///
/// `.` components are dropped. `..` becomes [`PARENT_DIR_SEGMENT`], the root
/// of an absolute path becomes [`ROOT_DIR_SEGMENT`], and a drive prefix becomes
/// `_root_` followed by its letters. Real components starting with `_` get one
/// more `_` in front, so two distinct logical directories never share a
/// mapping.
pub fn logical_dir(path: &Path) -> PathBuf {
    let mut dir = PathBuf::new();
    let Some(parent) = path.parent() else {
        return dir;
    };
    for component in parent.components() {
        match component {
            Component::Normal(part) => {
                if part.to_string_lossy().starts_with('_') {
                    let mut escaped = OsString::from("_");
                    escaped.push(part);
                    dir.push(escaped);
                } else {
                    dir.push(part);
                }
            }
            Component::ParentDir => dir.push(PARENT_DIR_SEGMENT),
            Component::RootDir => {
                if !dir.as_os_str().is_empty() {
                    // already named by the drive prefix
                    continue;
                }
                dir.push(ROOT_DIR_SEGMENT);
            }
            Component::Prefix(prefix) => {
                let letters: String = prefix
                    .as_os_str()
                    .to_string_lossy()
                    .chars()
                    .filter(char::is_ascii_alphanumeric)
                    .collect();
                dir.push(format!("{ROOT_DIR_SEGMENT}{letters}"));
            }
            Component::CurDir => {}
        }
    }
    dir
}

/// The identity of `path` as the cache sees it: its [`logical_dir`] joined
/// with its file name.
///
/// Two paths with the same key share slots, so candidate lists are
/// deduplicated on this key.
pub fn logical_key(path: &Path) -> PathBuf {
    let dir = logical_dir(path);
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}

/// Returns the slot file name `<fingerprint>_<basename>` for `path`.
pub fn slot_file_name(fingerprint: &ContentHash, path: &Path) -> Result<String, CacheError> {
    let base = path.file_name().ok_or_else(|| CacheError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path has no file name".to_string(),
    })?;
    Ok(format!("{fingerprint}_{}", base.to_string_lossy()))
}

/// Returns the full slot path for `path` at the given fingerprint.
pub fn slot_path(
    cache_root: &Path,
    fingerprint: &ContentHash,
    path: &Path,
) -> Result<PathBuf, CacheError> {
    let name = slot_file_name(fingerprint, path)?;
    Ok(slot_dir(cache_root, path).join(name))
}

/// Splits a slot file name into its fingerprint and basename parts.
///
/// Returns `None` for names that were not produced by [`slot_file_name`].
pub fn parse_slot_file_name(name: &str) -> Option<(&str, &str)> {
    let (fingerprint, basename) = name.split_once('_')?;
    if ContentHash::looks_like_hex(fingerprint) && !basename.is_empty() {
        Some((fingerprint, basename))
    } else {
        None
    }
}
