//! Serialization of a DOM subtree back to HTML text.
//!
//! The output mirrors the structures the parser builds: tag names come out
//! lower-case, attributes keep their insertion order with double-quoted
//! values, and a self-closing element without children serializes as
//! `<name/>`. Text payloads are written verbatim; the serializer performs
//! no entity escaping, so text containing markup-significant characters
//! will not survive a reparse unchanged.

use std::fmt::Write;

use crate::tree::{Dom, NodeId, NodeKind};

/// Serialize the subtree rooted at `id` to HTML. Serializing the Document
/// node yields the whole document; unknown ids yield the empty string.
#[must_use]
pub fn serialize(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

/// The serialized form of a node's children only, without the node's own
/// open and close tags.
#[must_use]
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    for &child in dom.children(id) {
        write_node(dom, child, &mut out);
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(kind) = dom.kind(id) else {
        return;
    };
    // Writing into a String can not fail.
    match kind {
        NodeKind::Document => {
            for &child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        NodeKind::Element(data) => {
            let tag = data.tag_name.to_ascii_lowercase();
            let _ = write!(out, "<{tag}");
            for attribute in &data.attributes {
                let _ = write!(out, " {}=\"{}\"", attribute.name, attribute.value);
            }
            if data.self_closing && dom.children(id).is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for &child in dom.children(id) {
                    write_node(dom, child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Cdata(data) => {
            let _ = write!(out, "<![CDATA[{data}]]>");
        }
        NodeKind::ProcessingInstruction { target, data } => {
            let _ = write!(out, "<?{target} {data} ?>");
        }
        NodeKind::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
        NodeKind::Doctype(name) => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
    }
}
