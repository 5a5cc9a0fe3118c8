//! The class model handed to the report layer.

use std::cell::OnceCell;

use society_common::ClassFact;

use crate::error::BuildError;
use crate::graph::{GraphAssembler, ObjectGraph};
use crate::traits::Analyzer;

/// A class collection together with its lazily assembled graph.
///
/// The graph is computed on the first call to [`ClassModel::graph`] and
/// reused for the lifetime of the model.
pub struct ClassModel {
    classes: Vec<ClassFact>,
    assembler: GraphAssembler,
    graph: OnceCell<ObjectGraph>,
}

impl ClassModel {
    /// Wraps a class collection.
    pub fn new(classes: Vec<ClassFact>, assembler: GraphAssembler) -> Self {
        Self {
            classes,
            assembler,
            graph: OnceCell::new(),
        }
    }

    /// Analyzes an in-memory source without consulting the cache.
    pub fn for_source<A: Analyzer>(
        analyzer: &A,
        label: &str,
        source: &str,
        assembler: GraphAssembler,
    ) -> Result<Self, BuildError> {
        let classes = analyzer
            .analyze_source(label, source)
            .map_err(BuildError::Analyzer)?;
        Ok(Self::new(classes, assembler))
    }

    /// The class facts this model was built from.
    pub fn classes(&self) -> &[ClassFact] {
        &self.classes
    }

    /// The assembled graph, computed on first access.
    pub fn graph(&self) -> &ObjectGraph {
        self.graph
            .get_or_init(|| self.assembler.assemble(&self.classes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{AnalyzerError, EdgeExtractor};
    use society_common::{Edge, EdgeKind};
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl EdgeExtractor for Counting {
        fn extract(&self, classes: &[ClassFact]) -> Vec<Edge> {
            self.calls.set(self.calls.get() + 1);
            classes
                .windows(2)
                .map(|w| Edge::new(&w[0].name, &w[1].name, EdgeKind::Reference))
                .collect()
        }
    }

    struct OneClass;

    impl Analyzer for OneClass {
        fn analyze(&self, _paths: &[PathBuf]) -> Result<Vec<ClassFact>, AnalyzerError> {
            Err("not used".into())
        }

        fn analyze_source(&self, label: &str, source: &str) -> Result<Vec<ClassFact>, AnalyzerError> {
            if source.is_empty() {
                return Err("empty source".into());
            }
            Ok(vec![ClassFact::new(source.trim(), format!("{label}:1"))])
        }
    }

    #[test]
    fn graph_is_assembled_once() {
        let assoc = Rc::new(Cell::new(0));
        let refs = Rc::new(Cell::new(0));
        let assembler = GraphAssembler::new(
            Counting { calls: assoc.clone() },
            Counting { calls: refs.clone() },
        );
        let model = ClassModel::new(
            vec![ClassFact::new("A", "a.rb:1"), ClassFact::new("B", "b.rb:1")],
            assembler,
        );
        assert_eq!(assoc.get(), 0);

        let first = model.graph().edges.len();
        let second = model.graph().edges.len();

        assert_eq!(first, 2);
        assert_eq!(first, second);
        assert_eq!(assoc.get(), 1);
        assert_eq!(refs.get(), 1);
    }

    #[test]
    fn for_source_uses_label_as_location() {
        let calls = Rc::new(Cell::new(0));
        let assembler = GraphAssembler::new(
            Counting { calls: calls.clone() },
            Counting { calls },
        );
        let model = ClassModel::for_source(&OneClass, "(inline)", "Widget", assembler).unwrap();
        assert_eq!(model.classes().len(), 1);
        assert_eq!(model.classes()[0].location, "(inline):1");
    }

    #[test]
    fn for_source_propagates_analyzer_error() {
        let calls = Rc::new(Cell::new(0));
        let assembler = GraphAssembler::new(
            Counting { calls: calls.clone() },
            Counting { calls },
        );
        let err = ClassModel::for_source(&OneClass, "(inline)", "", assembler)
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::Analyzer(_)));
    }
}
