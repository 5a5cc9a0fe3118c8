//! The report façade.

use std::path::Path;

use society_analysis::ClassModel;

use crate::data::GraphData;
use crate::error::ReportError;
use crate::registry::FormatRegistry;

/// Renders a [`ClassModel`] in any registered format.
#[derive(Default)]
pub struct Reporter {
    registry: FormatRegistry,
}

impl Reporter {
    /// A reporter over `registry`.
    pub fn new(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    /// A reporter with the built-in `html` and `json` formats.
    pub fn with_defaults() -> Self {
        Self::new(FormatRegistry::with_defaults())
    }

    /// Format names this reporter accepts.
    pub fn formats(&self) -> Vec<String> {
        self.registry.formats()
    }

    /// Renders the model's graph as `format`.
    ///
    /// The format is resolved before the graph is touched, so an unknown
    /// format never triggers graph assembly.
    pub fn report(
        &self,
        model: &ClassModel,
        format: &str,
        output: Option<&Path>,
    ) -> Result<(), ReportError> {
        let renderer = self
            .registry
            .get(format)
            .ok_or_else(|| ReportError::UnknownFormat {
                format: format.to_string(),
                known: self.registry.formats(),
            })?;

        let data = GraphData::from_graph(model.graph());
        log::debug!(
            "rendering {format} report: {} nodes, {} edges",
            data.nodes.len(),
            data.edges.len()
        );
        renderer.render(&data, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Renderer;
    use society_analysis::{EdgeExtractor, GraphAssembler};
    use society_common::{ClassFact, Edge, EdgeKind};
    use std::cell::{Cell, RefCell};
    use std::path::PathBuf;
    use std::rc::Rc;

    struct Counting(Rc<Cell<usize>>);

    impl EdgeExtractor for Counting {
        fn extract(&self, classes: &[ClassFact]) -> Vec<Edge> {
            self.0.set(self.0.get() + 1);
            classes
                .windows(2)
                .map(|w| Edge::new(&w[0].name, &w[1].name, EdgeKind::Association))
                .collect()
        }
    }

    struct Nothing;

    impl EdgeExtractor for Nothing {
        fn extract(&self, _classes: &[ClassFact]) -> Vec<Edge> {
            Vec::new()
        }
    }

    type Calls = Rc<RefCell<Vec<(String, usize, Option<PathBuf>)>>>;

    struct Recording {
        label: &'static str,
        calls: Calls,
    }

    impl Renderer for Recording {
        fn render(&self, data: &GraphData, output: Option<&Path>) -> Result<(), ReportError> {
            self.calls.borrow_mut().push((
                self.label.to_string(),
                data.edges.len(),
                output.map(Path::to_path_buf),
            ));
            Ok(())
        }
    }

    fn setup() -> (Reporter, ClassModel, Calls, Rc<Cell<usize>>) {
        let calls: Calls = Rc::default();
        let mut registry = FormatRegistry::new();
        for label in ["html", "json"] {
            registry.register(
                label,
                Recording {
                    label,
                    calls: Rc::clone(&calls),
                },
            );
        }

        let assembled = Rc::new(Cell::new(0));
        let model = ClassModel::new(
            vec![
                ClassFact::new("Post", "post.rb:1"),
                ClassFact::new("Comment", "comment.rb:1"),
            ],
            GraphAssembler::new(Counting(Rc::clone(&assembled)), Nothing),
        );
        (Reporter::new(registry), model, calls, assembled)
    }

    #[test]
    fn unknown_format_renders_nothing() {
        let (reporter, model, calls, assembled) = setup();
        let err = reporter.report(&model, "xml", None).unwrap_err();

        match err {
            ReportError::UnknownFormat { format, known } => {
                assert_eq!(format, "xml");
                assert_eq!(known, vec!["html", "json"]);
            }
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
        assert!(calls.borrow().is_empty());
        assert_eq!(assembled.get(), 0);
    }

    #[test]
    fn json_invokes_only_the_json_renderer() {
        let (reporter, model, calls, _) = setup();
        let out = PathBuf::from("graph.json");
        reporter.report(&model, "json", Some(&out)).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("json".to_string(), 1, Some(out)));
    }

    #[test]
    fn graph_is_assembled_once_across_reports() {
        let (reporter, model, calls, assembled) = setup();
        reporter.report(&model, "html", None).unwrap();
        reporter.report(&model, "json", None).unwrap();

        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(assembled.get(), 1);
    }

    #[test]
    fn defaults_accept_html_and_json() {
        assert_eq!(Reporter::with_defaults().formats(), vec!["html", "json"]);
    }
}
