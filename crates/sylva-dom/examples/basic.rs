//! Example: Building and dumping a small document

use sylva_dom::{Document, dump};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut doc = Document::new();
    let manifest = doc.create_element("manifest");
    doc.set_attribute(manifest, "xmlns:r", "urn:repo");
    doc.set_document_element(manifest);

    let remote = doc.create_element("r:remote");
    doc.set_attribute(remote, "name", "origin");
    doc.append_child(manifest, remote);

    let revision = doc.create_element("revision");
    doc.append(revision, "v1");
    doc.append_child(manifest, revision);

    println!("{}", dump(&doc, manifest, true));
}
