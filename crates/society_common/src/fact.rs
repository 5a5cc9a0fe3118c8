//! Structural facts produced by source analysis.
//!
//! A [`ClassFact`] describes one class found in one file. Everything except
//! the `location` is opaque to the cache layer; the edge extractors read the
//! association and reference lists to derive [`Edge`]s.

use serde::{Deserialize, Serialize};

/// A structural fact about a single class or type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFact {
    /// Fully qualified class name (e.g. `Billing::Invoice`).
    pub name: String,

    /// Origin of the declaration, formatted `"<file-path>:<line>"`.
    pub location: String,

    /// Declared superclass, if any.
    pub superclass: Option<String>,

    /// Association macros declared in the class body.
    pub associations: Vec<AssociationDecl>,

    /// Constant names referenced from the class body, in first-seen order.
    pub references: Vec<String>,
}

/// A declared association such as `has_many :invoices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDecl {
    /// The macro used (`has_many`, `belongs_to`, ...).
    pub kind: String,

    /// The association name as written (e.g. `invoices`).
    pub name: String,

    /// Explicit `class_name:` option, if given.
    pub class_name: Option<String>,
}

impl ClassFact {
    /// Creates a fact with no superclass, associations, or references.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            superclass: None,
            associations: Vec::new(),
            references: Vec::new(),
        }
    }

    /// The file this fact was found in: everything before the last `:`.
    pub fn source_file(&self) -> &str {
        source_file_of(&self.location)
    }

    /// The last `::` segment of the name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

/// Returns the file part of a `"<file-path>:<line>"` location.
///
/// Splits on the last `:` so that paths containing colons (Windows drive
/// letters) keep their prefix. A location without any `:` is returned whole.
pub fn source_file_of(location: &str) -> &str {
    match location.rsplit_once(':') {
        Some((file, _)) => file,
        None => location,
    }
}

/// The kind of relationship an [`Edge`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A declared structural association (`has_many`, `belongs_to`, ...).
    Association,
    /// A constant reference from one class body to another class.
    Reference,
}

/// A directed relationship between two classes, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Name of the class the edge starts at.
    pub from: String,
    /// Name of the class the edge points to.
    pub to: String,
    /// What kind of relationship this is.
    pub kind: EdgeKind,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}
