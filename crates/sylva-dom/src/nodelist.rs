//! NodeList - ordered snapshot of node handles
//!
//! Fixed at construction; indexed access is bounds-checked and `remove`
//! bulk-detaches members from whatever parents currently hold them.

use crate::{Document, NodeId, NodeType};

/// An ordered, fixed-at-construction sequence of node handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList {
    items: Vec<NodeId>,
}

impl NodeList {
    pub fn new(items: Vec<NodeId>) -> Self {
        Self { items }
    }

    /// Bounds-checked indexed access.
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().copied()
    }

    /// The item at `index`, only when it is an Element.
    pub fn element(&self, doc: &Document, index: usize) -> Option<NodeId> {
        self.item_of_type(doc, index, NodeType::Element)
    }

    /// The item at `index`, only when it is a Text node.
    pub fn text(&self, doc: &Document, index: usize) -> Option<NodeId> {
        self.item_of_type(doc, index, NodeType::Text)
    }

    /// The item at `index`, only when it is an Attribute.
    pub fn attr(&self, doc: &Document, index: usize) -> Option<NodeId> {
        self.item_of_type(doc, index, NodeType::Attribute)
    }

    fn item_of_type(&self, doc: &Document, index: usize, kind: NodeType) -> Option<NodeId> {
        self.item(index).filter(|&n| doc.node_type(n) == Some(kind))
    }

    /// Detach every member from its current parent, in order, stopping at
    /// the first failure. Members detached before the failure stay
    /// detached; members at and after it are untouched.
    pub fn remove(&self, doc: &mut Document) -> bool {
        for node in self.items.clone() {
            if !doc.remove(node) {
                return false;
            }
        }
        true
    }
}

impl FromIterator<NodeId> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}
