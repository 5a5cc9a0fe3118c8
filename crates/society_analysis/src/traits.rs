//! Seams to the external analyzer and edge extractors.

use std::path::PathBuf;

use society_common::{ClassFact, Edge};

/// Error type returned by analyzers. Passed through the driver unchanged.
pub type AnalyzerError = Box<dyn std::error::Error + Send + Sync>;

/// Turns source files into class facts.
pub trait Analyzer {
    /// Analyzes a batch of files together.
    ///
    /// Every returned fact's location must name one of `paths`, spelled the
    /// way the path displays.
    fn analyze(&self, paths: &[PathBuf]) -> Result<Vec<ClassFact>, AnalyzerError>;

    /// Analyzes an in-memory source, using `label` in place of a file path.
    fn analyze_source(&self, label: &str, source: &str) -> Result<Vec<ClassFact>, AnalyzerError>;
}

/// Derives edges from the complete set of class facts.
pub trait EdgeExtractor {
    /// Returns the edges found among `classes`.
    fn extract(&self, classes: &[ClassFact]) -> Vec<Edge>;
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    fn analyze(&self, paths: &[PathBuf]) -> Result<Vec<ClassFact>, AnalyzerError> {
        (**self).analyze(paths)
    }

    fn analyze_source(&self, label: &str, source: &str) -> Result<Vec<ClassFact>, AnalyzerError> {
        (**self).analyze_source(label, source)
    }
}
