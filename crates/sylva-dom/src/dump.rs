//! Diagnostic tree rendering
//!
//! Read-only, indented rendering of a subtree for logging and debugging.
//! Consumes only the public node accessors; not part of the structural
//! contract.

use crate::{Document, NodeId, NodeType};

/// Render `node` and its subtree as indented text.
///
/// Text values are optionally whitespace-trimmed (dropping all-whitespace
/// nodes) and truncated past 80 characters. Elements with a single Text
/// child collapse onto one line.
pub fn dump(doc: &Document, node: NodeId, ignore_ws: bool) -> String {
    let mut out = String::new();
    dump_node(doc, node, ignore_ws, 0, &mut out);
    out
}

fn dump_node(doc: &Document, node: NodeId, ignore_ws: bool, depth: usize, out: &mut String) {
    let Some(kind) = doc.node_type(node) else {
        return;
    };
    let subs = doc.child_nodes(node);
    let indent = "    ".repeat(depth);

    match kind {
        NodeType::Text => {
            let Some(value) = clean_value(doc.node_value(node).unwrap_or(""), ignore_ws) else {
                return;
            };
            out.push_str(&indent);
            out.push_str("# ");
            out.push_str(&value);
            out.push('\n');
        }
        NodeType::Element => {
            let qname = doc
                .node_qname(node)
                .map(|q| q.to_string())
                .unwrap_or_default();
            let mut sattrs = String::new();
            for attr in doc.get_attributes(node).iter() {
                let aq = doc
                    .node_qname(attr)
                    .map(|q| q.to_string())
                    .unwrap_or_default();
                let value = doc.node_value(attr).unwrap_or("");
                sattrs.push_str(&format!(" {}='{}'", aq, value));
            }

            // Lone text child collapses onto the element's line.
            if subs.len() == 1 {
                if let Some(text) = subs.text(doc, 0) {
                    let Some(value) = clean_value(doc.node_value(text).unwrap_or(""), ignore_ws)
                    else {
                        return;
                    };
                    out.push_str(&indent);
                    out.push_str(&qname);
                    if !sattrs.is_empty() {
                        out.push('[');
                        out.push_str(&sattrs);
                        out.push_str(" ]");
                    }
                    out.push_str(": ");
                    out.push_str(&value);
                    out.push('\n');
                    return;
                }
            }

            if subs.is_empty() {
                out.push_str(&indent);
                out.push_str(&qname);
                if !sattrs.is_empty() {
                    out.push('[');
                    out.push_str(&sattrs);
                    out.push_str(" ]");
                }
                out.push('\n');
                return;
            }

            out.push_str(&indent);
            out.push('<');
            out.push_str(&qname);
            out.push_str(&sattrs);
            out.push_str(">\n");
            for child in subs.iter() {
                dump_node(doc, child, ignore_ws, depth + 1, out);
            }
        }
        _ => {
            // Document, fragment: a bare line, then the children indented.
            out.push_str(&indent);
            out.push('\n');
            for child in subs.iter() {
                dump_node(doc, child, ignore_ws, depth + 1, out);
            }
        }
    }
}

/// Trim (when requested) and truncate a text value; `None` drops the node.
fn clean_value(raw: &str, ignore_ws: bool) -> Option<String> {
    let value = if ignore_ws { raw.trim() } else { raw };
    if ignore_ws && value.is_empty() {
        return None;
    }
    if value.chars().count() > 80 {
        let head: String = value.chars().take(77).collect();
        Some(format!("{}[...]", head))
    } else {
        Some(value.to_string())
    }
}
