//! Error types for incremental builds.

use society_cache::CacheError;

use crate::traits::AnalyzerError;

/// Errors that can occur while building the class collection.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Reading source files or cache slots, or storing results, failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The analyzer failed. No results from the failing batch were stored.
    #[error("analysis failed: {0}")]
    Analyzer(#[source] AnalyzerError),

    /// The analyzer returned a fact for a file that was not in its batch.
    #[error("analyzer returned a class at {location}, which is not one of the analyzed files")]
    StrayFact {
        /// The offending fact's location.
        location: String,
    },
}
