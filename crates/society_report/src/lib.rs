//! Report rendering for class graphs.
//!
//! The [`Reporter`] owns a [`FormatRegistry`] mapping format names to
//! [`Renderer`]s. Reports are rendered from [`GraphData`], a serializable view
//! of the model's graph.

#![warn(missing_docs)]

pub mod data;
pub mod error;
pub mod html;
pub mod json;
pub mod registry;
pub mod reporter;

pub use data::{EdgeData, GraphData, NodeData};
pub use error::ReportError;
pub use html::{HtmlRenderer, DEFAULT_HTML_OUTPUT};
pub use json::JsonRenderer;
pub use registry::{FormatRegistry, Renderer};
pub use reporter::Reporter;
