//! Qualified names and prefix resolution
//!
//! A raw "prefix:local" name resolves into a (namespace URI, local name)
//! pair by walking the declared `xmlns` bindings of enclosing elements.

use std::fmt;

use crate::document::Document;
use crate::node::NodeData;

/// A (namespace URI, local name) pair, independent of prefix spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QName {
    /// Namespace URI; empty when the name is in no namespace.
    pub ns: String,
    /// Local part of the name.
    pub local: String,
}

impl QName {
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            ns: String::new(),
            local: local.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ns.is_empty() {
            write!(f, "{{{}}}", self.ns)?;
        }
        write!(f, "{}", self.local)
    }
}

/// True for `xmlns` and `xmlns:<prefix>` attribute names.
pub(crate) fn is_xmlns(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

impl Document {
    /// Recompute the qualified name of a node after it has been attached or
    /// a root slot has been set.
    ///
    /// Only Elements (own name, then every non-`xmlns*` attribute) and
    /// prefixed Attributes participate; Text, Document and DocumentFragment
    /// names are constant.
    pub(crate) fn fix_qname(&mut self, node: usize) {
        match self.node_raw(node).data {
            NodeData::Element(_) => {
                self.resolve_node_name(node, true);
                let attrs: Vec<usize> = match &self.node_raw(node).data {
                    NodeData::Element(el) => el
                        .attrs
                        .iter()
                        .filter(|(name, _)| !is_xmlns(name))
                        .map(|(_, &attr)| attr)
                        .collect(),
                    _ => Vec::new(),
                };
                for attr in attrs {
                    self.resolve_node_name(attr, false);
                }
            }
            NodeData::Attribute => self.resolve_node_name(node, false),
            _ => {}
        }
    }

    /// Resolve one node's raw name against the enclosing xmlns bindings.
    ///
    /// A colon-free name on a non-element keeps its local-name-only form. An
    /// unresolvable prefix leaves the stored qname untouched.
    fn resolve_node_name(&mut self, node: usize, for_elem: bool) {
        let name = self.node_raw(node).name.clone();
        let (prefix, local) = match name.find(':') {
            Some(col) => (name[..col].to_string(), name[col + 1..].to_string()),
            None if for_elem => (String::new(), name.clone()),
            None => return,
        };
        let start = match self.node_raw(node).data {
            NodeData::Element(_) => Some(node),
            _ => self.node_raw(node).parent,
        };
        if let Some(ns) = self.lookup_prefix(start, &prefix) {
            let n = self.node_raw_mut(node);
            n.qname = QName { ns, local };
        }
    }

    /// Cascading prefix lookup: nearest enclosing element first, then up the
    /// parent chain to the root.
    pub(crate) fn lookup_prefix(&mut self, start: Option<usize>, prefix: &str) -> Option<String> {
        let mut cur = start;
        while let Some(i) = cur {
            if matches!(self.node_raw(i).data, NodeData::Element(_)) {
                self.ensure_ns_table(i);
                if let NodeData::Element(el) = &self.node_raw(i).data {
                    if let Some(ns) = el.namespaces.get(prefix) {
                        return Some(ns.clone());
                    }
                }
            }
            cur = self.node_raw(i).parent;
        }
        None
    }

    /// Rebuild an element's prefix table from its current attribute store.
    ///
    /// NOTE: the table is rebuilt at most once per element; xmlns attributes
    /// added or changed after the first lookup are not picked up.
    fn ensure_ns_table(&mut self, elem: usize) {
        let stale = match &self.node_raw(elem).data {
            NodeData::Element(el) => !el.ns_resolved,
            _ => false,
        };
        if !stale {
            return;
        }

        let mut bindings: Vec<(String, usize)> = Vec::new();
        if let NodeData::Element(el) = &self.node_raw(elem).data {
            for (name, &attr) in &el.attrs {
                if name == "xmlns" {
                    bindings.push((String::new(), attr));
                } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                    bindings.push((prefix.to_string(), attr));
                }
            }
        }
        let resolved: Vec<(String, String)> = bindings
            .into_iter()
            .map(|(prefix, attr)| (prefix, self.node_raw(attr).value.clone()))
            .collect();

        if let NodeData::Element(el) = &mut self.node_raw_mut(elem).data {
            el.namespaces.clear();
            for (prefix, uri) in resolved {
                el.namespaces.insert(prefix, uri);
            }
            el.ns_resolved = true;
        }
    }
}
