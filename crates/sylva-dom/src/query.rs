//! Path-query seam
//!
//! The tree does not evaluate path expressions itself; an external
//! evaluator walks it through the node accessors. `find`/`findall` hand the
//! context node and a prefix side table to whatever evaluator the caller
//! supplies.

use crate::nodelist::NodeList;
use crate::{Document, NodeId};

/// Prefix-to-namespace side table for resolving prefixed steps in a query
/// string. Distinct from the tree's own `xmlns` bindings.
pub type Namespaces<'a> = &'a [(&'a str, &'a str)];

/// A path-expression evaluator working against the node interface.
pub trait PathEvaluator {
    /// First node matching `path` with `context` as the context node.
    fn find(
        &self,
        doc: &Document,
        context: NodeId,
        path: &str,
        namespaces: Namespaces<'_>,
    ) -> Option<NodeId>;

    /// Every node matching `path`, in document order.
    fn findall(
        &self,
        doc: &Document,
        context: NodeId,
        path: &str,
        namespaces: Namespaces<'_>,
    ) -> NodeList;
}

impl Document {
    /// Evaluate `path` against `context`, returning the first match.
    pub fn find(
        &self,
        evaluator: &dyn PathEvaluator,
        context: NodeId,
        path: &str,
        namespaces: Namespaces<'_>,
    ) -> Option<NodeId> {
        evaluator.find(self, context, path, namespaces)
    }

    /// Evaluate `path` against `context`, returning every match.
    pub fn findall(
        &self,
        evaluator: &dyn PathEvaluator,
        context: NodeId,
        path: &str,
        namespaces: Namespaces<'_>,
    ) -> NodeList {
        evaluator.findall(self, context, path, namespaces)
    }
}
