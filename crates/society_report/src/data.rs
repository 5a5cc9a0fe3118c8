//! Serializable view of an [`ObjectGraph`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use society_analysis::ObjectGraph;
use society_common::EdgeKind;

/// The graph as renderers receive it: nodes plus index-based edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// One entry per class node, in graph order.
    pub nodes: Vec<NodeData>,
    /// Edges whose endpoints both name a node.
    pub edges: Vec<EdgeData>,
}

/// A class node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Qualified class name.
    pub name: String,
    /// `"<file>:<line>"` of the declaration.
    pub location: String,
    /// Declared superclass, if any.
    pub superclass: Option<String>,
}

/// An edge between two entries of [`GraphData::nodes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
    /// Relationship kind.
    pub kind: EdgeKind,
}

impl GraphData {
    /// Builds the view of `graph`.
    ///
    /// Edge endpoints refer to the first node carrying the edge's class name.
    /// An edge naming a class that is not a node cannot be drawn and is left
    /// out of the view.
    pub fn from_graph(graph: &ObjectGraph) -> Self {
        let nodes: Vec<NodeData> = graph
            .nodes
            .iter()
            .map(|class| NodeData {
                name: class.name.clone(),
                location: class.location.clone(),
                superclass: class.superclass.clone(),
            })
            .collect();

        let mut first_index: HashMap<&str, usize> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            first_index.entry(node.name.as_str()).or_insert(i);
        }

        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            match (first_index.get(edge.from.as_str()), first_index.get(edge.to.as_str())) {
                (Some(&source), Some(&target)) => edges.push(EdgeData {
                    source,
                    target,
                    kind: edge.kind,
                }),
                _ => log::debug!("edge {} -> {} has no node, not drawn", edge.from, edge.to),
            }
        }

        Self { nodes, edges }
    }
}
