//! Sylva DOM - Mutable XML document tree
//!
//! A namespace-aware node tree (Document, Element, Attribute, Text,
//! DocumentFragment) with structural editing, lazily resolved qualified
//! names, and an element-side attribute store.
//!
//! Nodes live in an arena owned by their [`Document`] and are addressed
//! through copyable [`NodeId`] handles. A handle carries the identity of the
//! document that created it, so structural operations across documents are
//! rejected rather than silently mixing trees.

use std::sync::atomic::{AtomicU32, Ordering};

mod document;
mod dump;
mod element;
mod node;
mod nodelist;
mod operations;
mod qname;
mod query;

pub use document::Document;
pub use dump::dump;
pub use nodelist::NodeList;
pub use operations::{DomError, NewContent};
pub use qname::QName;
pub use query::{Namespaces, PathEvaluator};

/// Identity of a [`Document`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u32);

static NEXT_DOCUMENT_ID: AtomicU32 = AtomicU32::new(1);

impl DocumentId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a node: the owning document's identity plus its arena slot.
///
/// Handles are cheap to copy and never own the node they point at; the
/// document does. A handle presented to the wrong document resolves to
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) doc: DocumentId,
    pub(crate) idx: u32,
}

impl NodeId {
    /// Identity of the document this handle belongs to.
    pub fn document_id(&self) -> DocumentId {
        self.doc
    }
}

/// Node kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Element,
    Attribute,
    Text,
    DocumentFragment,
}
