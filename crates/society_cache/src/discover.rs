//! Expansion of user-given paths into a flat list of source files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CacheError;
use crate::slot::logical_key;

/// Expands directories in `paths` into the source files beneath them.
///
/// A directory becomes every file below it (recursively) whose extension is in
/// `extensions`, ordered by file name at each level. Symlinked files are
/// listed but symlinked directories are not descended into. Any other path is
/// kept as given, even if its extension does not match. Input order is
/// preserved and a file reached twice is only listed the first time, where
/// paths that differ only in `.` components count as the same file.
pub fn expand_paths(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, CacheError> {
    let mut files = Vec::new();
    for path in paths {
        let meta = std::fs::metadata(path).map_err(|e| CacheError::io(path, e))?;
        if meta.is_dir() {
            walk_dir(path, extensions, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    let mut seen = HashSet::new();
    files.retain(|f| seen.insert(logical_key(f)));
    Ok(files)
}

/// Recursively collects matching source files under `dir`.
fn walk_dir(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<(), CacheError> {
    let walker = WalkDir::new(dir).follow_links(false).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            CacheError::io(path, e.into())
        })?;
        let is_file =
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && has_source_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

/// Returns `true` if `path` ends in one of `extensions` (given without the dot).
pub fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}
