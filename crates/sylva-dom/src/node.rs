//! Node storage
//!
//! Common fields shared by every node kind plus a closed variant for the
//! kind-specific part. Mutation algorithms in `operations` work against the
//! common fields and dispatch on the variant.

use std::collections::{BTreeMap, HashMap};

use crate::NodeType;
use crate::qname::QName;

/// Cached sibling index of a detached node.
pub(crate) const DETACHED: usize = usize::MAX;

/// One arena slot.
///
/// `index` is the cached position inside the parent's child vector and is
/// authoritative: a lookup that finds `parent.children[index] != self`
/// treats the node as absent instead of scanning.
#[derive(Debug)]
pub(crate) struct Node {
    /// Raw name as given ("prefix:local" for prefixed names).
    pub name: String,
    /// Literal value; meaningful for Text and Attribute.
    pub value: String,
    /// Resolved qualified name, lazily recomputed on attach.
    pub qname: QName,
    /// Arena index of the parent, if attached.
    pub parent: Option<usize>,
    /// Cached position in the parent's child vector, `DETACHED` otherwise.
    pub index: usize,
    /// Ordered children (arena indices). Attributes never appear here.
    pub children: Vec<usize>,
    /// Kind-specific data.
    pub data: NodeData,
}

/// Kind-specific node data.
#[derive(Debug)]
pub(crate) enum NodeData {
    Document,
    Element(ElementData),
    Attribute,
    Text,
    Fragment,
}

/// Element-side state: the attribute store and the lazily rebuilt
/// prefix-to-namespace table.
#[derive(Debug, Default)]
pub(crate) struct ElementData {
    /// Attribute store keyed by raw name; map order gives the deterministic
    /// by-name enumeration of `get_attributes`.
    pub attrs: BTreeMap<String, usize>,
    /// Local prefix -> namespace URI bindings, from `xmlns*` attributes.
    pub namespaces: HashMap<String, String>,
    /// Latched once the binding table has been rebuilt.
    pub ns_resolved: bool,
}

impl Node {
    fn detached(name: String, value: String, data: NodeData) -> Self {
        Self {
            qname: QName::local(name.clone()),
            name,
            value,
            parent: None,
            index: DETACHED,
            children: Vec::new(),
            data,
        }
    }

    pub fn document() -> Self {
        Self::detached("#document".to_string(), String::new(), NodeData::Document)
    }

    pub fn element(tag: &str) -> Self {
        Self::detached(
            tag.to_string(),
            String::new(),
            NodeData::Element(ElementData::default()),
        )
    }

    pub fn text(data: &str) -> Self {
        Self::detached(String::new(), data.to_string(), NodeData::Text)
    }

    pub fn attribute(name: &str, value: &str) -> Self {
        Self::detached(name.to_string(), value.to_string(), NodeData::Attribute)
    }

    pub fn fragment() -> Self {
        Self::detached(
            "#document-fragment".to_string(),
            String::new(),
            NodeData::Fragment,
        )
    }

    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Attribute => NodeType::Attribute,
            NodeData::Text => NodeType::Text,
            NodeData::Fragment => NodeType::DocumentFragment,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.data, NodeData::Attribute)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text)
    }

    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }
}
