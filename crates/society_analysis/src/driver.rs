//! The incremental analysis driver.
//!
//! A build partitions the candidate files against the cache, analyzes the
//! updated ones in a single batch, stores each updated file's facts (empty
//! lists included) and reloads the facts of unchanged files.

use std::collections::HashMap;
use std::path::PathBuf;

use society_cache::FileCache;
use society_common::ClassFact;

use crate::error::BuildError;
use crate::traits::Analyzer;

/// Result of one incremental build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    /// Fresh facts (analyzer order) followed by cached facts (file order).
    pub classes: Vec<ClassFact>,

    /// Files that were analyzed in this build.
    pub updated: Vec<PathBuf>,

    /// Files whose facts came from the cache.
    pub unchanged: Vec<PathBuf>,
}

/// Builds the class collection, reusing cached results where content is unchanged.
pub struct IncrementalBuilder<A> {
    analyzer: A,
    cache_dir: PathBuf,
    extensions: Vec<String>,
}

impl<A: Analyzer> IncrementalBuilder<A> {
    /// Creates a builder that caches under `cache_dir` and expands
    /// directories to `.rb` files.
    pub fn new(analyzer: A, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            analyzer,
            cache_dir: cache_dir.into(),
            extensions: vec!["rb".to_string()],
        }
    }

    /// Sets the extensions (without dot) that directory expansion picks up.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Returns the analyzer.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Runs an incremental build over `candidate_paths`.
    pub fn build(&self, candidate_paths: &[PathBuf]) -> Result<BuildOutcome, BuildError> {
        let cache = FileCache::new(&self.cache_dir, candidate_paths, &self.extensions)?;
        let partition = cache.partition()?;
        log::info!(
            "{} files: {} updated, {} unchanged",
            partition.len(),
            partition.updated.len(),
            partition.unchanged.len()
        );

        let mut classes = self.process_updated(&cache, &partition.updated)?;
        classes.extend(Self::process_unchanged(&cache, &partition.unchanged)?);

        Ok(BuildOutcome {
            classes,
            updated: partition.updated,
            unchanged: partition.unchanged,
        })
    }

    /// Analyzes the updated files and stores one fact list per file.
    ///
    /// Nothing is stored unless the whole batch analyzed successfully and
    /// every fact belongs to one of the batch's files.
    fn process_updated(
        &self,
        cache: &FileCache,
        updated: &[PathBuf],
    ) -> Result<Vec<ClassFact>, BuildError> {
        if updated.is_empty() {
            return Ok(Vec::new());
        }

        let facts = self.analyzer.analyze(updated).map_err(BuildError::Analyzer)?;

        let index: HashMap<String, usize> = updated
            .iter()
            .enumerate()
            .map(|(i, path)| (path.to_string_lossy().into_owned(), i))
            .collect();
        let mut groups: Vec<Vec<ClassFact>> = vec![Vec::new(); updated.len()];
        for fact in &facts {
            let Some(&i) = index.get(fact.source_file()) else {
                return Err(BuildError::StrayFact {
                    location: fact.location.clone(),
                });
            };
            groups[i].push(fact.clone());
        }

        for (path, group) in updated.iter().zip(&groups) {
            cache.store(path, group)?;
            log::debug!("cached {} classes for {}", group.len(), path.display());
        }

        Ok(facts)
    }

    /// Loads the stored fact lists of the unchanged files.
    fn process_unchanged(
        cache: &FileCache,
        unchanged: &[PathBuf],
    ) -> Result<Vec<ClassFact>, BuildError> {
        let mut classes = Vec::new();
        for path in unchanged {
            let stored: Vec<ClassFact> = cache.retrieve(path)?;
            classes.extend(stored);
        }
        Ok(classes)
    }
}
