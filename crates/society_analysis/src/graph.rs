//! Graph assembly from class facts and extracted edges.

use society_common::{ClassFact, Edge};

use crate::traits::EdgeExtractor;

/// Classes and the relationships between them.
///
/// Nodes and edges are kept exactly as produced: a class found twice appears
/// twice, and identical edges are not merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectGraph {
    /// Every class fact, in build order.
    pub nodes: Vec<ClassFact>,
    /// Association edges followed by reference edges.
    pub edges: Vec<Edge>,
}

/// Runs the association and reference extractors over a class collection.
pub struct GraphAssembler {
    associations: Box<dyn EdgeExtractor>,
    references: Box<dyn EdgeExtractor>,
}

impl GraphAssembler {
    /// Creates an assembler from the two extraction passes.
    pub fn new(
        associations: impl EdgeExtractor + 'static,
        references: impl EdgeExtractor + 'static,
    ) -> Self {
        Self {
            associations: Box::new(associations),
            references: Box::new(references),
        }
    }

    /// Builds the graph over the complete class collection.
    ///
    /// Both extractors see every class, so edges between a freshly analyzed
    /// class and a cached one are found.
    pub fn assemble(&self, classes: &[ClassFact]) -> ObjectGraph {
        let mut edges = self.associations.extract(classes);
        edges.extend(self.references.extract(classes));
        log::debug!("assembled graph: {} nodes, {} edges", classes.len(), edges.len());
        ObjectGraph {
            nodes: classes.to_vec(),
            edges,
        }
    }
}
