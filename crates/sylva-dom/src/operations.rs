//! Structural tree operations
//!
//! The insert/remove/replace family, implemented once against the common
//! node fields and specialized by kind: Attribute children are routed to the
//! element's attribute store, the Document node rejects all mutation.
//!
//! Public operations report failure as `false` (see [`DomError`] for the
//! taxonomy behind it); the `try_` variants expose the classified error.

use crate::node::DETACHED;
use crate::nodelist::NodeList;
use crate::{Document, NodeId};

/// Why a structural operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Handle does not resolve, or the target cannot take part in the
    /// operation (e.g. the Document node as a splice target).
    #[error("invalid argument")]
    InvalidArgument,
    /// The node's owning document differs from the target tree's.
    #[error("node belongs to a different document")]
    CrossDocument,
    /// The node is not present as a child (or attribute) at the point of
    /// removal.
    #[error("node not found as a child")]
    NotFound,
}

/// Input accepted by the `before`/`after`/`replace`/`prepend`/`append`
/// conveniences: a single node, a node list, or a literal string that is
/// materialized into a Text node owned by the target's document.
pub enum NewContent<'a> {
    Node(NodeId),
    List(&'a NodeList),
    Text(&'a str),
}

impl From<NodeId> for NewContent<'_> {
    fn from(node: NodeId) -> Self {
        NewContent::Node(node)
    }
}

impl<'a> From<&'a NodeList> for NewContent<'a> {
    fn from(list: &'a NodeList) -> Self {
        NewContent::List(list)
    }
}

impl<'a> From<&'a str> for NewContent<'a> {
    fn from(data: &'a str) -> Self {
        NewContent::Text(data)
    }
}

impl Document {
    // ------------------------------------------------------------------
    // Shared internals
    // ------------------------------------------------------------------

    fn index_of_handle(&self, id: NodeId) -> Result<usize, DomError> {
        if id.doc != self.id() {
            return Err(DomError::CrossDocument);
        }
        self.resolve(id).ok_or(DomError::InvalidArgument)
    }

    /// Position of `node` in `parent`'s child vector, using the node's
    /// cached index. The cache is authoritative: a mismatch means "absent"
    /// (reported as the vector length, the append position), with no linear
    /// fallback scan.
    fn child_position(&self, parent: usize, node: Option<usize>) -> usize {
        let children = &self.node_raw(parent).children;
        match node {
            Some(n) => {
                let at = self.node_raw(n).index;
                if at < children.len() && children[at] == n {
                    at
                } else {
                    children.len()
                }
            }
            None => children.len(),
        }
    }

    /// Refresh the cached index of every child from `from` to the end.
    fn renumber_from(&mut self, parent: usize, from: usize) {
        let tail: Vec<usize> = self.node_raw(parent).children[from..].to_vec();
        for (offset, child) in tail.into_iter().enumerate() {
            self.node_raw_mut(child).index = from + offset;
        }
    }

    /// Remove a node from whatever parent currently holds it. An orphan
    /// detach trivially succeeds.
    pub(crate) fn detach_idx(&mut self, node: usize) -> Result<(), DomError> {
        match self.node_raw(node).parent {
            None => Ok(()),
            Some(parent) => self.remove_child_idx(parent, node),
        }
    }

    fn remove_child_idx(&mut self, parent: usize, child: usize) -> Result<(), DomError> {
        if self.node_raw(child).is_attribute() {
            return self.remove_attr_idx(parent, child);
        }
        let pos = self.child_position(parent, Some(child));
        if pos >= self.node_raw(parent).children.len() {
            return Err(DomError::NotFound);
        }
        {
            let node = self.node_raw_mut(child);
            node.parent = None;
            node.index = DETACHED;
        }
        self.node_raw_mut(parent).children.remove(pos);
        self.renumber_from(parent, pos);
        Ok(())
    }

    // ------------------------------------------------------------------
    // insert / remove / replace
    // ------------------------------------------------------------------

    /// Insert `new_child` into `parent`'s children before `before`
    /// (append when `before` is absent or not found as a child).
    ///
    /// The target position is computed before `new_child` is detached, so
    /// re-inserting a node relative to itself keeps the child order stable.
    /// An Attribute `new_child` is routed to the attribute store instead of
    /// being spliced.
    pub fn try_insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), DomError> {
        let parent_idx = self.index_of_handle(parent)?;
        if self.node_raw(parent_idx).is_document() {
            return Err(DomError::InvalidArgument);
        }
        let child_idx = self.index_of_handle(new_child)?;

        let before_idx = before.and_then(|b| self.resolve(b));
        let mut pos = self.child_position(parent_idx, before_idx);

        let old_parent = self.node_raw(child_idx).parent;
        let old_pos = old_parent.map(|p| self.child_position(p, Some(child_idx)));

        self.detach_idx(child_idx)?;

        if self.node_raw(child_idx).is_attribute() {
            return self.set_attr_idx(parent_idx, child_idx);
        }

        // Reinsert into the same list: the detach freed a slot ahead of the
        // target position.
        if old_parent == Some(parent_idx) {
            if let Some(op) = old_pos {
                if op < pos {
                    pos -= 1;
                }
            }
        }
        let pos = pos.min(self.node_raw(parent_idx).children.len());

        self.node_raw_mut(child_idx).parent = Some(parent_idx);
        self.node_raw_mut(parent_idx).children.insert(pos, child_idx);
        self.fix_qname(child_idx);
        self.renumber_from(parent_idx, pos);
        Ok(())
    }

    /// Batch insert. Every member is validated against this document before
    /// anything mutates; the detach phase then runs in list order and a
    /// failure there fails the call without rolling back prior detaches.
    pub fn try_insert_list_before(
        &mut self,
        parent: NodeId,
        list: &NodeList,
        before: Option<NodeId>,
    ) -> Result<(), DomError> {
        let parent_idx = self.index_of_handle(parent)?;
        if self.node_raw(parent_idx).is_document() {
            return Err(DomError::InvalidArgument);
        }

        let mut members = Vec::with_capacity(list.len());
        for id in list.iter() {
            members.push(self.index_of_handle(id)?);
        }

        let before_idx = before.and_then(|b| self.resolve(b));
        let pos = self.child_position(parent_idx, before_idx);

        for &member in &members {
            self.detach_idx(member)?;
        }

        let mut at = pos.min(self.node_raw(parent_idx).children.len());
        let renumber_from = at;
        for &member in &members {
            if self.node_raw(member).is_attribute() {
                self.set_attr_idx(parent_idx, member)?;
                continue;
            }
            self.node_raw_mut(member).parent = Some(parent_idx);
            self.node_raw_mut(parent_idx).children.insert(at, member);
            at += 1;
            self.fix_qname(member);
        }
        self.renumber_from(parent_idx, renumber_from);
        Ok(())
    }

    /// Insert-before-old then remove-old. A successful insert is not rolled
    /// back when the removal fails.
    pub fn try_replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        self.try_insert_before(parent, new_child, Some(old_child))?;
        self.try_remove_child(parent, old_child)
    }

    /// List form of [`Document::try_replace_child`].
    pub fn try_replace_children(
        &mut self,
        parent: NodeId,
        new_children: &NodeList,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        self.try_insert_list_before(parent, new_children, Some(old_child))?;
        self.try_remove_child(parent, old_child)
    }

    /// Remove `child` from `parent`. Attribute children are routed to the
    /// attribute store removal.
    pub fn try_remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_idx = self.index_of_handle(parent)?;
        if self.node_raw(parent_idx).is_document() {
            return Err(DomError::InvalidArgument);
        }
        let child_idx = self.index_of_handle(child)?;
        self.remove_child_idx(parent_idx, child_idx)
    }

    // ------------------------------------------------------------------
    // Boolean façade of the structural API
    // ------------------------------------------------------------------

    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, before: Option<NodeId>) -> bool {
        report(self.try_insert_before(parent, new_child, before), "insert_before")
    }

    pub fn insert_list_before(&mut self, parent: NodeId, list: &NodeList, before: Option<NodeId>) -> bool {
        report(
            self.try_insert_list_before(parent, list, before),
            "insert_list_before",
        )
    }

    pub fn append_child(&mut self, parent: NodeId, new_child: NodeId) -> bool {
        self.insert_before(parent, new_child, None)
    }

    pub fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> bool {
        report(self.try_replace_child(parent, new_child, old_child), "replace_child")
    }

    pub fn replace_children(&mut self, parent: NodeId, new_children: &NodeList, old_child: NodeId) -> bool {
        report(
            self.try_replace_children(parent, new_children, old_child),
            "replace_children",
        )
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        report(self.try_remove_child(parent, child), "remove_child")
    }

    // ------------------------------------------------------------------
    // Child-node conveniences
    // ------------------------------------------------------------------

    /// Insert content before this node, resolving the parent implicitly.
    pub fn before<'a>(&mut self, node: NodeId, content: impl Into<NewContent<'a>>) -> bool {
        let Some(parent) = self.parent_node(node) else {
            return false;
        };
        match content.into() {
            NewContent::Node(n) => self.insert_before(parent, n, Some(node)),
            NewContent::List(list) => self.insert_list_before(parent, list, Some(node)),
            NewContent::Text(data) => {
                let text = self.create_text_node(data);
                self.insert_before(parent, text, Some(node))
            }
        }
    }

    /// Insert content after this node.
    ///
    /// The anchor is the parent's own next sibling, which is never one of
    /// the parent's children, so the content lands at the end of the sibling
    /// list.
    pub fn after<'a>(&mut self, node: NodeId, content: impl Into<NewContent<'a>>) -> bool {
        let Some(parent) = self.parent_node(node) else {
            return false;
        };
        let anchor = self.next_sibling(parent);
        match content.into() {
            NewContent::Node(n) => self.insert_before(parent, n, anchor),
            NewContent::List(list) => self.insert_list_before(parent, list, anchor),
            NewContent::Text(data) => {
                let text = self.create_text_node(data);
                self.insert_before(parent, text, anchor)
            }
        }
    }

    /// Replace this node with the given content.
    pub fn replace<'a>(&mut self, node: NodeId, content: impl Into<NewContent<'a>>) -> bool {
        let Some(parent) = self.parent_node(node) else {
            return false;
        };
        match content.into() {
            NewContent::Node(n) => self.replace_child(parent, n, node),
            NewContent::List(list) => self.replace_children(parent, list, node),
            NewContent::Text(data) => {
                let text = self.create_text_node(data);
                self.replace_child(parent, text, node)
            }
        }
    }

    /// Detach this node from its parent. An orphan counts as already
    /// removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if self.resolve(node).is_none() {
            return false;
        }
        match self.parent_node(node) {
            None => true,
            Some(parent) => self.remove_child(parent, node),
        }
    }

    // ------------------------------------------------------------------
    // Parent-node conveniences
    // ------------------------------------------------------------------

    /// Insert content at the first-child position.
    pub fn prepend<'a>(&mut self, parent: NodeId, content: impl Into<NewContent<'a>>) -> bool {
        let anchor = self.first_child(parent);
        match content.into() {
            NewContent::Node(n) => self.insert_before(parent, n, anchor),
            NewContent::List(list) => self.insert_list_before(parent, list, anchor),
            NewContent::Text(data) => {
                let text = self.create_text_node(data);
                self.insert_before(parent, text, anchor)
            }
        }
    }

    /// Insert content at the end.
    pub fn append<'a>(&mut self, parent: NodeId, content: impl Into<NewContent<'a>>) -> bool {
        match content.into() {
            NewContent::Node(n) => self.insert_before(parent, n, None),
            NewContent::List(list) => self.insert_list_before(parent, list, None),
            NewContent::Text(data) => {
                let text = self.create_text_node(data);
                self.insert_before(parent, text, None)
            }
        }
    }
}

fn report(result: Result<(), DomError>, op: &'static str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::trace!(%err, op, "structural operation rejected");
            false
        }
    }
}
