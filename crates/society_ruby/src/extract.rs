//! Association and reference edge extraction over Ruby class facts.

use std::collections::HashMap;

use society_analysis::EdgeExtractor;
use society_common::{ClassFact, Edge, EdgeKind};

/// Lookup from class names to the fully qualified name of the first class
/// declaring them.
struct NameIndex<'a> {
    qualified: HashMap<&'a str, &'a str>,
    short: HashMap<&'a str, &'a str>,
}

impl<'a> NameIndex<'a> {
    fn new(classes: &'a [ClassFact]) -> Self {
        let mut qualified = HashMap::new();
        let mut short = HashMap::new();
        for class in classes {
            qualified.entry(class.name.as_str()).or_insert(class.name.as_str());
            short.entry(class.short_name()).or_insert(class.name.as_str());
        }
        Self { qualified, short }
    }

    /// Resolves `name` as seen from inside `scope`.
    ///
    /// Tries the name relative to each enclosing namespace of `scope`, then as
    /// an absolute name, then by its last segment.
    fn resolve(&self, scope: &str, name: &str) -> Option<&'a str> {
        let mut namespace = scope;
        while let Some((outer, _)) = namespace.rsplit_once("::") {
            if let Some(found) = self.qualified.get(format!("{outer}::{name}").as_str()) {
                return Some(*found);
            }
            namespace = outer;
        }
        if let Some(found) = self.qualified.get(name) {
            return Some(*found);
        }
        let last = name.rsplit("::").next().unwrap_or(name);
        self.short.get(last).copied()
    }
}

/// Edges for `has_many`, `belongs_to` and the other association macros.
///
/// The target class is the `class_name:` option when given, otherwise the
/// camelized association name (singularized for collection associations).
/// Associations to classes outside the collection produce no edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssociationExtractor;

impl EdgeExtractor for AssociationExtractor {
    fn extract(&self, classes: &[ClassFact]) -> Vec<Edge> {
        let index = NameIndex::new(classes);
        let mut edges = Vec::new();
        for class in classes {
            for assoc in &class.associations {
                let target = match &assoc.class_name {
                    Some(explicit) => explicit.clone(),
                    None if is_collection(&assoc.kind) => camelize(&singularize(&assoc.name)),
                    None => camelize(&assoc.name),
                };
                if let Some(to) = index.resolve(&class.name, &target) {
                    edges.push(Edge::new(&class.name, to, EdgeKind::Association));
                }
            }
        }
        edges
    }
}

/// Edges for constants referenced from a class body.
///
/// References that do not resolve to a class in the collection, and
/// references of a class to itself, produce no edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceExtractor;

impl EdgeExtractor for ReferenceExtractor {
    fn extract(&self, classes: &[ClassFact]) -> Vec<Edge> {
        let index = NameIndex::new(classes);
        let mut edges = Vec::new();
        for class in classes {
            for reference in &class.references {
                match index.resolve(&class.name, reference) {
                    Some(to) if to != class.name => {
                        edges.push(Edge::new(&class.name, to, EdgeKind::Reference));
                    }
                    _ => {}
                }
            }
        }
        edges
    }
}

fn is_collection(kind: &str) -> bool {
    matches!(kind, "has_many" | "has_and_belongs_to_many")
}

/// `line_items` -> `LineItems`, `admin/user` -> `Admin::User`.
pub fn camelize(name: &str) -> String {
    name.split('/')
        .map(|segment| {
            segment
                .split('_')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let mut chars = part.chars();
                    match chars.next() {
                        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("::")
}

/// English singular of a plural association name, using the common suffix rules.
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if name.ends_with(suffix) {
            return name[..name.len() - 2].to_string();
        }
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.ends_with('s') && !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}
