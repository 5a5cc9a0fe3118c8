//! Shared foundational types used across the society workspace.
//!
//! This crate provides the content fingerprint used to address cache slots and
//! the structural facts (classes and edges) that flow from the analyzer to the
//! report renderers.

#![warn(missing_docs)]

pub mod fact;
pub mod hash;

pub use fact::{source_file_of, AssociationDecl, ClassFact, Edge, EdgeKind};
pub use hash::ContentHash;
