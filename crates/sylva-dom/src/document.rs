//! Document - arena owner and node factory
//!
//! Slot 0 of every arena is the Document node itself: it behaves as a Node
//! for read access but its structural mutation methods always fail, and its
//! child view is a singleton holding the current root element or fragment,
//! recomputed on every access.

use crate::node::{DETACHED, Node, NodeData};
use crate::nodelist::NodeList;
use crate::qname::QName;
use crate::{DocumentId, NodeId, NodeType};

/// An XML document: transitive owner of every node created through its
/// factory methods.
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    nodes: Vec<Node>,
    root: Option<usize>,
    fragment: Option<usize>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            id: DocumentId::next(),
            nodes: vec![Node::document()],
            root: None,
            fragment: None,
        }
    }

    /// This document's identity.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Handle to the Document node itself (arena slot 0).
    pub fn document_node(&self) -> NodeId {
        self.handle(0)
    }

    // ------------------------------------------------------------------
    // Arena plumbing
    // ------------------------------------------------------------------

    pub(crate) fn handle(&self, idx: usize) -> NodeId {
        NodeId {
            doc: self.id,
            idx: idx as u32,
        }
    }

    /// Resolve a handle to an arena index; foreign or out-of-range handles
    /// resolve to nothing.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<usize> {
        if id.doc != self.id {
            return None;
        }
        let idx = id.idx as usize;
        (idx < self.nodes.len()).then_some(idx)
    }

    pub(crate) fn node_raw(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn node_raw_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.handle(idx)
    }

    /// Number of nodes in the arena, the Document node included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------
    // Factories: nodes are born detached
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(Node::text(data))
    }

    pub fn create_attribute(&mut self, name: &str, value: &str) -> NodeId {
        self.alloc(Node::attribute(name, value))
    }

    pub fn create_document_fragment(&mut self) -> NodeId {
        self.alloc(Node::fragment())
    }

    // ------------------------------------------------------------------
    // Root slots
    // ------------------------------------------------------------------

    /// Current root element, if the document holds one.
    pub fn document_element(&self) -> Option<NodeId> {
        self.root.map(|idx| self.handle(idx))
    }

    /// Current root fragment, if the document holds one.
    pub fn fragment(&self) -> Option<NodeId> {
        self.fragment.map(|idx| self.handle(idx))
    }

    /// Install `elem` as the root element, clearing any root fragment, and
    /// run a qualified-name resolution pass over it.
    pub fn set_document_element(&mut self, elem: NodeId) -> bool {
        let Some(idx) = self.resolve(elem) else {
            tracing::trace!("set_document_element: foreign handle rejected");
            return false;
        };
        if !self.nodes[idx].is_element() {
            tracing::trace!("set_document_element: not an element");
            return false;
        }
        self.root = Some(idx);
        self.fragment = None;
        self.fix_qname(idx);
        true
    }

    /// Install `frag` as the root fragment, clearing any root element.
    pub fn set_fragment(&mut self, frag: NodeId) -> bool {
        let Some(idx) = self.resolve(frag) else {
            tracing::trace!("set_fragment: foreign handle rejected");
            return false;
        };
        if !matches!(self.nodes[idx].data, NodeData::Fragment) {
            tracing::trace!("set_fragment: not a fragment");
            return false;
        }
        self.root = None;
        self.fragment = Some(idx);
        self.fix_qname(idx);
        true
    }

    // ------------------------------------------------------------------
    // Per-node accessors
    // ------------------------------------------------------------------

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.resolve(id).map(|idx| self.nodes[idx].node_type())
    }

    /// Raw name as given at creation ("prefix:local" for prefixed names).
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.resolve(id).map(|idx| self.nodes[idx].name.as_str())
    }

    /// Resolved qualified name.
    pub fn node_qname(&self, id: NodeId) -> Option<&QName> {
        self.resolve(id).map(|idx| &self.nodes[idx].qname)
    }

    /// Literal value; empty for kinds that carry none.
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        self.resolve(id).map(|idx| self.nodes[idx].value.as_str())
    }

    /// Set the literal value. Ignored for Element and Document nodes, whose
    /// values are not writable.
    pub fn set_node_value(&mut self, id: NodeId, value: &str) -> bool {
        let Some(idx) = self.resolve(id) else {
            return false;
        };
        match self.nodes[idx].data {
            NodeData::Element(_) | NodeData::Document => {}
            _ => self.nodes[idx].value = value.to_string(),
        }
        true
    }

    /// Inner text for Elements, the literal value for everything else.
    pub fn string_value(&self, id: NodeId) -> Option<String> {
        let idx = self.resolve(id)?;
        if self.nodes[idx].is_element() {
            self.inner_text(id)
        } else {
            Some(self.nodes[idx].value.clone())
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id)?;
        self.nodes[idx].parent.map(|p| self.handle(p))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id)?;
        if self.nodes[idx].is_document() {
            return self.document_element();
        }
        self.nodes[idx].children.first().map(|&c| self.handle(c))
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id)?;
        if self.nodes[idx].is_document() {
            return self.document_element();
        }
        self.nodes[idx].children.last().map(|&c| self.handle(c))
    }

    /// Sibling before this node, through the parent's child vector at the
    /// cached index minus one.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id)?;
        let parent = self.nodes[idx].parent?;
        let at = self.nodes[idx].index;
        if at == DETACHED || at == 0 {
            return None;
        }
        self.nodes[parent]
            .children
            .get(at - 1)
            .map(|&c| self.handle(c))
    }

    /// Sibling after this node, through the parent's child vector at the
    /// cached index plus one.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id)?;
        let parent = self.nodes[idx].parent?;
        let at = self.nodes[idx].index;
        if at == DETACHED {
            return None;
        }
        self.nodes[parent]
            .children
            .get(at + 1)
            .map(|&c| self.handle(c))
    }

    /// Snapshot of a node's children. For the Document node this is the live
    /// singleton view of the current root element or fragment, recomputed on
    /// every call.
    pub fn child_nodes(&self, id: NodeId) -> NodeList {
        let Some(idx) = self.resolve(id) else {
            return NodeList::default();
        };
        if self.nodes[idx].is_document() {
            return self
                .root
                .or(self.fragment)
                .map(|r| NodeList::new(vec![self.handle(r)]))
                .unwrap_or_default();
        }
        NodeList::new(
            self.nodes[idx]
                .children
                .iter()
                .map(|&c| self.handle(c))
                .collect(),
        )
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
