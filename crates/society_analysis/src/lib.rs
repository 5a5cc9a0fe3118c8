//! Incremental class analysis and graph assembly.
//!
//! [`IncrementalBuilder`] runs the external [`Analyzer`] only over files whose
//! content changed since the last run and merges the fresh facts with cached
//! ones. [`ClassModel`] turns the merged facts into an [`ObjectGraph`] using the
//! association and reference [`EdgeExtractor`]s.

#![warn(missing_docs)]

pub mod driver;
pub mod error;
pub mod graph;
pub mod model;
pub mod traits;

pub use driver::{BuildOutcome, IncrementalBuilder};
pub use error::BuildError;
pub use graph::{GraphAssembler, ObjectGraph};
pub use model::ClassModel;
pub use traits::{Analyzer, AnalyzerError, EdgeExtractor};
