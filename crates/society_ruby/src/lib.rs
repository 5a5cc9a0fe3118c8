//! Default Ruby analyzer and edge extractors.
//!
//! [`RubyAnalyzer`] recognizes classes, modules, association macros and
//! constant references line by line. [`AssociationExtractor`] and
//! [`ReferenceExtractor`] turn those facts into graph edges.

#![warn(missing_docs)]

pub mod analyzer;
pub mod extract;
pub mod scanner;

pub use analyzer::RubyAnalyzer;
pub use extract::{AssociationExtractor, ReferenceExtractor};
pub use scanner::scan_source;

use society_analysis::GraphAssembler;

/// A graph assembler wired with the Ruby association and reference passes.
pub fn default_assembler() -> GraphAssembler {
    GraphAssembler::new(AssociationExtractor, ReferenceExtractor)
}
