//! Content-addressed cache for per-file analysis results.
//!
//! Each source file's result is stored in a slot named after the fingerprint
//! of the file's current content. A file whose current slot already exists is
//! unchanged since some earlier run and its stored result can be reused.

#![warn(missing_docs)]

pub mod artifact;
pub mod cache;
pub mod discover;
pub mod error;
pub mod hasher;
pub mod slot;

pub use cache::{FileCache, Partition, DEFAULT_CACHE_DIR};
pub use discover::expand_paths;
pub use error::CacheError;
pub use hasher::SourceHasher;
