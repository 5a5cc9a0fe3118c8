//! The [`Analyzer`] implementation backed by the line scanner.

use std::path::PathBuf;

use society_analysis::{Analyzer, AnalyzerError};
use society_common::ClassFact;

use crate::scanner::scan_source;

/// Analyzes Ruby files with [`scan_source`].
///
/// Locations use each path as it displays, so facts group back onto the
/// paths they were requested with.
#[derive(Debug, Default, Clone, Copy)]
pub struct RubyAnalyzer;

impl Analyzer for RubyAnalyzer {
    fn analyze(&self, paths: &[PathBuf]) -> Result<Vec<ClassFact>, AnalyzerError> {
        let mut facts = Vec::new();
        for path in paths {
            let source = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            let found = scan_source(&path.display().to_string(), &source);
            log::trace!("{}: {} classes", path.display(), found.len());
            facts.extend(found);
        }
        Ok(facts)
    }

    fn analyze_source(&self, label: &str, source: &str) -> Result<Vec<ClassFact>, AnalyzerError> {
        Ok(scan_source(label, source))
    }
}
