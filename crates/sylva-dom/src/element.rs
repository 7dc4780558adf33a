//! Element behavior
//!
//! The name-keyed attribute store, tag-name subtree search, and text
//! aggregation. Attributes act like children through the public interface
//! but live here, not in the child vector.

use crate::node::NodeData;
use crate::nodelist::NodeList;
use crate::operations::DomError;
use crate::{Document, NodeId};

impl Document {
    // ------------------------------------------------------------------
    // Store internals, shared with the structural operations
    // ------------------------------------------------------------------

    /// Install an attribute on an element. A same-name collision overwrites
    /// the stored node's value in place; the stored node's identity is
    /// preserved.
    pub(crate) fn set_attr_idx(&mut self, elem: usize, attr: usize) -> Result<(), DomError> {
        if !self.node_raw(elem).is_element() || !self.node_raw(attr).is_attribute() {
            return Err(DomError::InvalidArgument);
        }
        self.node_raw_mut(attr).parent = Some(elem);

        let name = self.node_raw(attr).name.clone();
        let existing = self
            .node_raw(elem)
            .as_element()
            .and_then(|el| el.attrs.get(&name).copied());
        match existing {
            Some(stored) if stored != attr => {
                let value = self.node_raw(attr).value.clone();
                self.node_raw_mut(stored).value = value;
            }
            Some(_) => {}
            None => {
                if let Some(el) = self.node_raw_mut(elem).as_element_mut() {
                    el.attrs.insert(name, attr);
                }
            }
        }
        Ok(())
    }

    /// Erase the store entry carrying this attribute's name and detach the
    /// stored node.
    pub(crate) fn remove_attr_idx(&mut self, elem: usize, attr: usize) -> Result<(), DomError> {
        if !self.node_raw(elem).is_element() || !self.node_raw(attr).is_attribute() {
            return Err(DomError::InvalidArgument);
        }
        let name = self.node_raw(attr).name.clone();
        self.remove_attr_by_name(elem, &name)
    }

    fn remove_attr_by_name(&mut self, elem: usize, name: &str) -> Result<(), DomError> {
        let stored = match self.node_raw_mut(elem).as_element_mut() {
            Some(el) => el.attrs.remove(name),
            None => None,
        };
        match stored {
            Some(attr) => {
                let node = self.node_raw_mut(attr);
                node.parent = None;
                node.index = crate::node::DETACHED;
                Ok(())
            }
            None => Err(DomError::NotFound),
        }
    }

    // ------------------------------------------------------------------
    // Attribute API
    // ------------------------------------------------------------------

    /// Value of the named attribute, if present.
    pub fn get_attribute(&self, elem: NodeId, name: &str) -> Option<&str> {
        let attr = self.get_attribute_node(elem, name)?;
        self.node_value(attr)
    }

    /// The stored Attribute node for `name`, if present.
    pub fn get_attribute_node(&self, elem: NodeId, name: &str) -> Option<NodeId> {
        let idx = self.resolve(elem)?;
        let el = self.node_raw(idx).as_element()?;
        el.attrs.get(name).map(|&attr| self.handle(attr))
    }

    /// Install an attribute node on an element, reparenting it. Returns
    /// false for wrong-kind or foreign handles.
    pub fn set_attribute_node(&mut self, elem: NodeId, attr: NodeId) -> bool {
        let (Some(elem_idx), Some(attr_idx)) = (self.resolve(elem), self.resolve(attr)) else {
            tracing::trace!("set_attribute_node: unresolved handle");
            return false;
        };
        self.set_attr_idx(elem_idx, attr_idx).is_ok()
    }

    /// Fabricate a fresh Attribute node and install it. Re-setting an
    /// existing name overwrites the stored node's value rather than
    /// replacing the node.
    pub fn set_attribute(&mut self, elem: NodeId, name: &str, value: &str) -> bool {
        if self.resolve(elem).is_none() {
            return false;
        }
        let attr = self.create_attribute(name, value);
        self.set_attribute_node(elem, attr)
    }

    /// Erase the named attribute. False when absent.
    pub fn remove_attribute(&mut self, elem: NodeId, name: &str) -> bool {
        let Some(idx) = self.resolve(elem) else {
            return false;
        };
        if !self.node_raw(idx).is_element() {
            return false;
        }
        self.remove_attr_by_name(idx, name).is_ok()
    }

    /// Erase the store entry carrying this node's name. False when absent.
    pub fn remove_attribute_node(&mut self, elem: NodeId, attr: NodeId) -> bool {
        let (Some(elem_idx), Some(attr_idx)) = (self.resolve(elem), self.resolve(attr)) else {
            return false;
        };
        self.remove_attr_idx(elem_idx, attr_idx).is_ok()
    }

    pub fn has_attribute(&self, elem: NodeId, name: &str) -> bool {
        self.get_attribute_node(elem, name).is_some()
    }

    /// Snapshot of the element's attributes, ordered by name (not by
    /// insertion order).
    pub fn get_attributes(&self, elem: NodeId) -> NodeList {
        let Some(idx) = self.resolve(elem) else {
            return NodeList::default();
        };
        match self.node_raw(idx).as_element() {
            Some(el) => NodeList::new(el.attrs.values().map(|&a| self.handle(a)).collect()),
            None => NodeList::default(),
        }
    }

    // ------------------------------------------------------------------
    // Subtree search and text aggregation
    // ------------------------------------------------------------------

    /// Pre-order depth-first search of the subtree rooted at `node`
    /// (inclusive) for elements whose raw name equals `tag` exactly.
    /// Called on the Document node, delegates to the current root.
    pub fn get_elements_by_tag_name(&self, node: NodeId, tag: &str) -> NodeList {
        let Some(idx) = self.resolve(node) else {
            return NodeList::default();
        };
        let start = if self.node_raw(idx).is_document() {
            match self.document_element().or_else(|| self.fragment()) {
                Some(root) => self.resolve(root).unwrap_or(idx),
                None => return NodeList::default(),
            }
        } else {
            idx
        };
        let mut out = Vec::new();
        self.collect_tag_names(start, tag, &mut out);
        NodeList::new(out)
    }

    fn collect_tag_names(&self, idx: usize, tag: &str, out: &mut Vec<NodeId>) {
        let node = self.node_raw(idx);
        if node.is_element() && node.name == tag {
            out.push(self.handle(idx));
        }
        for &child in &node.children {
            self.collect_tag_names(child, tag, out);
        }
    }

    /// Concatenated text of an element's subtree: a lone Text child is
    /// returned verbatim, otherwise Text values and nested element text are
    /// concatenated in document order, other kinds skipped.
    pub fn inner_text(&self, elem: NodeId) -> Option<String> {
        let idx = self.resolve(elem)?;
        if !self.node_raw(idx).is_element() {
            return None;
        }
        Some(self.inner_text_idx(idx))
    }

    fn inner_text_idx(&self, idx: usize) -> String {
        let children = &self.node_raw(idx).children;
        if children.len() == 1 && self.node_raw(children[0]).is_text() {
            return self.node_raw(children[0]).value.clone();
        }

        let mut out = String::new();
        for &child in children {
            match self.node_raw(child).data {
                NodeData::Text => out.push_str(&self.node_raw(child).value),
                NodeData::Element(_) => out.push_str(&self.inner_text_idx(child)),
                _ => {}
            }
        }
        out
    }
}
