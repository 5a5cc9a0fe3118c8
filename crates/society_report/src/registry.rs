//! The table of supported report formats.

use std::collections::BTreeMap;
use std::path::Path;

use crate::data::GraphData;
use crate::error::ReportError;
use crate::html::HtmlRenderer;
use crate::json::JsonRenderer;

/// Writes a graph in one output format.
pub trait Renderer {
    /// Renders `data` to `output`, or to the renderer's default destination
    /// when no path is given.
    fn render(&self, data: &GraphData, output: Option<&Path>) -> Result<(), ReportError>;
}

/// Mapping from format name to renderer.
pub struct FormatRegistry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// A registry with the built-in `html` and `json` renderers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("html", HtmlRenderer::default());
        registry.register("json", JsonRenderer);
        registry
    }

    /// Adds `renderer` under `format`, replacing any previous entry.
    pub fn register(&mut self, format: impl Into<String>, renderer: impl Renderer + 'static) {
        self.renderers.insert(format.into(), Box::new(renderer));
    }

    /// Looks up the renderer for `format`.
    pub fn get(&self, format: &str) -> Option<&dyn Renderer> {
        self.renderers.get(format).map(|r| &**r)
    }

    /// Registered format names, sorted.
    pub fn formats(&self) -> Vec<String> {
        self.renderers.keys().cloned().collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
