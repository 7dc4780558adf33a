//! Edge case tests for sylva-dom
//!
//! Pins the deliberate quirks of the tree: partial completion of compound
//! operations, the at-most-once namespace table, attach-time-only name
//! resolution, anchor fallbacks, and the Document node's special child view.

use sylva_dom::{Document, NodeList, dump};

// ============================================================================
// PARTIAL COMPLETION
// ============================================================================

#[test]
fn test_replace_child_completes_the_insert_when_old_is_absent() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let a = doc.create_element("a");
    doc.append_child(root, a);

    let stranger = doc.create_element("stranger");
    let fresh = doc.create_element("fresh");

    // the insert lands (appended, stranger is no anchor), the removal fails
    assert!(!doc.replace_child(root, fresh, stranger));
    let kids = doc.child_nodes(root);
    assert_eq!(kids.len(), 2);
    assert_eq!(kids.item(1), Some(fresh));
    assert!(doc.parent_node(stranger).is_none());
}

#[test]
fn test_attribute_insert_into_wrong_kind_detaches_first() {
    let mut doc = Document::new();
    let owner = doc.create_element("owner");
    doc.set_attribute(owner, "k", "v");
    let attr = doc.get_attribute_node(owner, "k").unwrap();

    let text = doc.create_text_node("t");
    // the detach phase ran before the kind check failed
    assert!(!doc.insert_before(text, attr, None));
    assert!(!doc.has_attribute(owner, "k"));
    assert!(doc.parent_node(attr).is_none());
}

#[test]
fn test_node_list_remove_stops_at_first_failure() {
    let mut doc1 = Document::new();
    let mut doc2 = Document::new();
    let root = doc1.create_element("root");
    let a = doc1.create_element("a");
    let b = doc1.create_element("b");
    doc1.append_child(root, a);
    doc1.append_child(root, b);
    let foreign = doc2.create_element("f");

    let list = NodeList::new(vec![a, foreign, b]);
    assert!(!list.remove(&mut doc1));
    // a was removed, the foreign member failed, b was never reached
    assert!(doc1.parent_node(a).is_none());
    assert_eq!(doc1.parent_node(b), Some(root));
}

// ============================================================================
// BATCH INSERT
// ============================================================================

#[test]
fn test_batch_validation_leaves_tree_untouched() {
    let mut doc1 = Document::new();
    let mut doc2 = Document::new();
    let root = doc1.create_element("root");
    let holder = doc1.create_element("holder");
    let local = doc1.create_element("local");
    doc1.append_child(holder, local);
    let foreign = doc2.create_element("f");

    let list = NodeList::new(vec![local, foreign]);
    assert!(!doc1.insert_list_before(root, &list, None));
    assert_eq!(doc1.parent_node(local), Some(holder));
    assert!(doc1.child_nodes(root).is_empty());
}

#[test]
fn test_batch_routes_attribute_members_to_the_store() {
    let mut doc = Document::new();
    let el = doc.create_element("e");
    let text = doc.create_text_node("t");
    let attr = doc.create_attribute("k", "v");
    let tail = doc.create_element("tail");

    let list = NodeList::new(vec![text, attr, tail]);
    assert!(doc.insert_list_before(el, &list, None));

    let kids = doc.child_nodes(el);
    assert_eq!(kids.len(), 2);
    assert_eq!(kids.item(0), Some(text));
    assert_eq!(kids.item(1), Some(tail));
    assert_eq!(doc.get_attribute(el, "k"), Some("v"));
}

#[test]
fn test_batch_insert_keeps_list_order_mid_tree() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let head = doc.create_element("head");
    let tail = doc.create_element("tail");
    doc.append_child(root, head);
    doc.append_child(root, tail);

    let x = doc.create_element("x");
    let y = doc.create_element("y");
    let list = NodeList::new(vec![x, y]);
    assert!(doc.insert_list_before(root, &list, Some(tail)));

    let kids = doc.child_nodes(root);
    let names: Vec<&str> = kids.iter().map(|n| doc.node_name(n).unwrap()).collect();
    assert_eq!(names, ["head", "x", "y", "tail"]);
}

// ============================================================================
// ANCHOR FALLBACKS
// ============================================================================

#[test]
fn test_foreign_anchor_appends() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let a = doc.create_element("a");
    let b = doc.create_element("b");
    doc.append_child(root, a);
    doc.append_child(root, b);

    let other = doc.create_element("other");
    let elsewhere = doc.create_element("x");
    doc.append_child(other, elsewhere);

    // the anchor belongs to a different parent: fall back to append
    let n = doc.create_element("n");
    assert!(doc.insert_before(root, n, Some(elsewhere)));
    let kids = doc.child_nodes(root);
    assert_eq!(kids.item(2), Some(n));
}

#[test]
fn test_after_lands_at_the_end_of_the_sibling_list() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    let a = doc.create_element("a");
    let b = doc.create_element("b");
    let c = doc.create_element("c");
    doc.append_child(root, a);
    doc.append_child(root, b);
    doc.append_child(root, c);

    let x = doc.create_element("x");
    assert!(doc.after(a, x));
    let kids = doc.child_nodes(root);
    assert_eq!(kids.item(3), Some(x));
}

#[test]
fn test_after_with_an_attached_grandparent_still_appends() {
    let mut doc = Document::new();
    let top = doc.create_element("top");
    let mid = doc.create_element("mid");
    let sib = doc.create_element("sib");
    doc.append_child(top, mid);
    doc.append_child(top, sib);
    let a = doc.create_element("a");
    doc.append_child(mid, a);

    let x = doc.create_element("x");
    assert!(doc.after(a, x));
    let kids = doc.child_nodes(mid);
    assert_eq!(kids.len(), 2);
    assert_eq!(kids.item(1), Some(x));
    // the uncle element did not move
    assert_eq!(doc.parent_node(sib), Some(top));
}

// ============================================================================
// NAMESPACE TABLE STALENESS
// ============================================================================

#[test]
fn test_bindings_declared_after_first_lookup_are_not_seen() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    // resolving the root latches its (empty) prefix table
    doc.set_document_element(a);
    doc.set_attribute(a, "xmlns:p", "urn:p");

    let c = doc.create_element("p:c");
    doc.append_child(a, c);

    let q = doc.node_qname(c).unwrap();
    assert_eq!(q.ns, "");
    assert_eq!(q.local, "p:c");
}

#[test]
fn test_names_resolve_at_attach_time_only() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attribute(a, "xmlns:p", "urn:p");
    doc.set_document_element(a);

    // assembled bottom-up: c attaches to a detached b, out of scope of the
    // binding, and attaching b later does not revisit c
    let b = doc.create_element("b");
    let c = doc.create_element("p:c");
    doc.append_child(b, c);
    doc.append_child(a, b);

    let q = doc.node_qname(c).unwrap();
    assert_eq!(q.ns, "");
    assert_eq!(q.local, "p:c");
}

#[test]
fn test_reattach_resolves_with_bindings_now_in_scope() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attribute(a, "xmlns:p", "urn:p");
    doc.set_document_element(a);

    let c = doc.create_element("p:c");
    let limbo = doc.create_element("limbo");
    doc.append_child(limbo, c);
    assert_eq!(doc.node_qname(c).unwrap().ns, "");

    // moving under the declaring element re-runs resolution
    doc.append_child(a, c);
    assert_eq!(doc.node_qname(c).unwrap().ns, "urn:p");
    assert_eq!(doc.node_qname(c).unwrap().local, "c");
}

// ============================================================================
// TAG NAME SEARCH
// ============================================================================

#[test]
fn test_search_compares_raw_names_not_qnames() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attribute(a, "xmlns:p", "urn:p");
    doc.set_document_element(a);
    let c = doc.create_element("p:c");
    doc.append_child(a, c);

    assert_eq!(doc.get_elements_by_tag_name(a, "p:c").len(), 1);
    assert!(doc.get_elements_by_tag_name(a, "c").is_empty());
}

#[test]
fn test_search_includes_the_start_node() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    let inner = doc.create_element("a");
    doc.append_child(a, inner);

    let found = doc.get_elements_by_tag_name(a, "a");
    assert_eq!(found.len(), 2);
    assert_eq!(found.item(0), Some(a));
    assert_eq!(found.item(1), Some(inner));
}

#[test]
fn test_search_on_document_node_uses_the_fragment_root() {
    let mut doc = Document::new();
    let frag = doc.create_document_fragment();
    doc.set_fragment(frag);
    let a = doc.create_element("a");
    doc.append_child(frag, a);

    let found = doc.get_elements_by_tag_name(doc.document_node(), "a");
    assert_eq!(found.len(), 1);
}

// ============================================================================
// DOCUMENT NODE QUIRKS
// ============================================================================

#[test]
fn test_fragment_root_shows_in_child_view_but_not_first_child() {
    let mut doc = Document::new();
    let frag = doc.create_document_fragment();
    doc.set_fragment(frag);

    let d = doc.document_node();
    let view = doc.child_nodes(d);
    assert_eq!(view.len(), 1);
    assert_eq!(view.item(0), Some(frag));
    // the element-root accessor stays empty for a fragment root
    assert!(doc.first_child(d).is_none());
    assert!(doc.last_child(d).is_none());
}

#[test]
fn test_document_node_value_is_inert() {
    let mut doc = Document::new();
    let d = doc.document_node();
    assert!(doc.set_node_value(d, "nope"));
    assert_eq!(doc.node_value(d), Some(""));
}

#[test]
fn test_setting_a_root_does_not_reparent_it() {
    let mut doc = Document::new();
    let el = doc.create_element("root");
    doc.set_document_element(el);
    assert!(doc.parent_node(el).is_none());
}

// ============================================================================
// TYPED LIST ACCESSORS
// ============================================================================

#[test]
fn test_typed_item_accessors_filter_by_kind() {
    let mut doc = Document::new();
    let el = doc.create_element("e");
    let text = doc.create_text_node("t");
    let attr = doc.create_attribute("k", "v");

    let list = NodeList::new(vec![el, text, attr]);
    assert_eq!(list.element(&doc, 0), Some(el));
    assert!(list.element(&doc, 1).is_none());
    assert_eq!(list.text(&doc, 1), Some(text));
    assert_eq!(list.attr(&doc, 2), Some(attr));
    assert!(list.attr(&doc, 0).is_none());
    assert!(list.item(3).is_none());
}

// ============================================================================
// DIAGNOSTIC RENDERING
// ============================================================================

#[test]
fn test_dump_renders_namespaced_names() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attribute(a, "xmlns:p", "urn:p");
    doc.set_document_element(a);
    let c = doc.create_element("p:c");
    doc.append_child(a, c);

    let text = dump(&doc, a, false);
    assert_eq!(text, "<a xmlns:p='urn:p'>\n    {urn:p}c\n");
}

#[test]
fn test_dump_collapses_a_lone_text_child() {
    let mut doc = Document::new();
    let item = doc.create_element("item");
    doc.append(item, "hello");

    assert_eq!(dump(&doc, item, false), "item: hello\n");
}

#[test]
fn test_dump_of_the_document_node_indents_the_root() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    doc.set_document_element(root);
    let a = doc.create_element("a");
    doc.append_child(root, a);

    let text = dump(&doc, doc.document_node(), false);
    assert_eq!(text, "\n    <root>\n        a\n");
}

#[test]
fn test_foreign_handles_never_panic() {
    let mut doc1 = Document::new();
    let doc2 = Document::new();
    let el = doc1.create_element("a");

    assert!(doc2.node_type(el).is_none());
    assert!(doc2.parent_node(el).is_none());
    assert!(doc2.child_nodes(el).is_empty());
    assert_eq!(dump(&doc2, el, false), "");
}
