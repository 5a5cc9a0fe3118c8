//! HTML report output.
//!
//! Produces a self-contained page from the `report.html` askama template: a
//! table of classes with their outgoing relationships, plus the full graph
//! data embedded as JSON for scripts that want to draw it.

use std::path::{Path, PathBuf};

use askama::Template;
use society_common::EdgeKind;

use crate::data::GraphData;
use crate::error::ReportError;
use crate::json::write_file;
use crate::registry::Renderer;

/// Where the HTML report goes when no output path is given.
pub const DEFAULT_HTML_OUTPUT: &str = "doc/society/society.html";

/// Renders the graph into a standalone HTML page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    default_output: PathBuf,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            default_output: PathBuf::from(DEFAULT_HTML_OUTPUT),
        }
    }
}

impl HtmlRenderer {
    /// A renderer writing to `default_output` when no path is given.
    pub fn with_default_output(default_output: impl Into<PathBuf>) -> Self {
        Self {
            default_output: default_output.into(),
        }
    }

    /// Renders the page to a string.
    pub fn to_html(data: &GraphData) -> Result<String, ReportError> {
        let graph_json = serde_json::to_string(data)
            .map_err(|e| ReportError::Serialization {
                reason: e.to_string(),
            })?
            // keep the embedded JSON from closing the script element
            .replace('<', "\\u003c");

        let page = HtmlPage {
            title: "Society class graph",
            version: env!("CARGO_PKG_VERSION"),
            node_count: data.nodes.len(),
            edge_count: data.edges.len(),
            rows: rows(data),
            graph_json,
        };
        page.render().map_err(|e| ReportError::Template {
            reason: e.to_string(),
        })
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, data: &GraphData, output: Option<&Path>) -> Result<(), ReportError> {
        let html = Self::to_html(data)?;
        write_file(output.unwrap_or(self.default_output.as_path()), html.as_bytes())
    }
}

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlPage {
    title: &'static str,
    version: &'static str,
    node_count: usize,
    edge_count: usize,
    rows: Vec<HtmlRow>,
    graph_json: String,
}

struct HtmlRow {
    name: String,
    superclass: String,
    location: String,
    outgoing: Vec<HtmlLink>,
}

struct HtmlLink {
    target: String,
    kind: &'static str,
}

fn rows(data: &GraphData) -> Vec<HtmlRow> {
    let mut rows: Vec<HtmlRow> = data
        .nodes
        .iter()
        .map(|node| HtmlRow {
            name: node.name.clone(),
            superclass: node.superclass.clone().unwrap_or_default(),
            location: node.location.clone(),
            outgoing: Vec::new(),
        })
        .collect();
    for edge in &data.edges {
        let Some(target) = data.nodes.get(edge.target) else {
            log::debug!("skipping edge to missing node {}", edge.target);
            continue;
        };
        let Some(row) = rows.get_mut(edge.source) else {
            log::debug!("skipping edge from missing node {}", edge.source);
            continue;
        };
        let kind = match edge.kind {
            EdgeKind::Association => "association",
            EdgeKind::Reference => "reference",
        };
        row.outgoing.push(HtmlLink {
            target: target.name.clone(),
            kind,
        });
    }
    rows
}
