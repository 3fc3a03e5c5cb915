//! A portable, serde-backed description of a DOM subtree.
//!
//! [`PortableNode`] is a plain data mirror of the tree, suitable for JSON
//! interchange with other tooling. Every node kind maps to a kind string;
//! element attributes ride along as `attr` pseudo-nodes so the whole
//! structure stays a single recursive type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::{Dom, NodeId, NodeKind};

/// Errors raised while converting a portable description back into a tree.
#[derive(Debug, Error)]
pub enum PortableError {
    /// The `kind` field held a string outside the known set.
    #[error("unknown portable node kind `{0}`")]
    UnknownKind(String),
    /// A kind was missing a field it requires, e.g. an element without a
    /// name.
    #[error("portable `{kind}` node is missing its `{field}` field")]
    MissingField {
        /// The absent field.
        field: &'static str,
        /// The kind that required it.
        kind: String,
    },
    /// The JSON text could not be parsed at all.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Rebuilding the tree violated a placement rule.
    #[error(transparent)]
    Tree(#[from] crate::error::TreeError),
}

/// One node of the portable form.
///
/// Kind strings: `document`, `element`, `singletag` (a self-closing
/// element), `attr`, `text`, `cdata`, `proc`, `comment`, and `doctype`.
/// Optional fields are omitted from the JSON when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortableNode {
    /// The node kind string.
    pub kind: String,
    /// Tag name for elements, attribute name for `attr`, target for
    /// `proc`, declaration name for `doctype`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Character payload: text, cdata and comment content, attribute and
    /// `proc` values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Child nodes, document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PortableNode>,
    /// Element attributes as `attr` pseudo-nodes, insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PortableNode>,
}

impl PortableNode {
    fn leaf(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: None,
            value: None,
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

/// Convert the subtree rooted at `id` into its portable form. Unknown ids
/// yield an empty `document` node.
#[must_use]
pub fn to_portable(dom: &Dom, id: NodeId) -> PortableNode {
    let Some(kind) = dom.kind(id) else {
        return PortableNode::leaf("document");
    };
    let mut out = match kind {
        NodeKind::Document => PortableNode::leaf("document"),
        NodeKind::Element(data) => {
            let mut node = PortableNode::leaf(if data.self_closing {
                "singletag"
            } else {
                "element"
            });
            node.name = Some(data.tag_name.to_ascii_lowercase());
            node.attributes = data
                .attributes
                .iter()
                .map(|a| {
                    let mut attr = PortableNode::leaf("attr");
                    attr.name = Some(a.name.clone());
                    attr.value = Some(a.value.clone());
                    attr
                })
                .collect();
            node
        }
        NodeKind::Text(text) => {
            let mut node = PortableNode::leaf("text");
            // Carriage returns never survive interchange with text editors.
            node.value = Some(text.replace('\r', ""));
            node
        }
        NodeKind::Cdata(data) => {
            let mut node = PortableNode::leaf("cdata");
            node.value = Some(data.clone());
            node
        }
        NodeKind::ProcessingInstruction { target, data } => {
            let mut node = PortableNode::leaf("proc");
            node.name = Some(target.clone());
            node.value = Some(data.clone());
            node
        }
        NodeKind::Comment(text) => {
            let mut node = PortableNode::leaf("comment");
            node.value = Some(text.clone());
            node
        }
        NodeKind::Doctype(name) => {
            let mut node = PortableNode::leaf("doctype");
            node.name = Some(name.clone());
            node
        }
    };
    out.children = dom
        .children(id)
        .iter()
        .map(|&child| to_portable(dom, child))
        .collect();
    out
}

/// Rebuild a full tree from a portable description. A non-`document` top
/// node is rooted under a fresh Document.
///
/// # Errors
///
/// [`PortableError::UnknownKind`] or [`PortableError::MissingField`] for a
/// malformed description, [`PortableError::Tree`] if the described shape
/// violates a placement rule (e.g. children under a leaf kind).
pub fn from_portable(portable: &PortableNode) -> Result<Dom, PortableError> {
    let mut dom = Dom::new();
    if portable.kind == "document" {
        for child in &portable.children {
            let id = build_node(&mut dom, child)?;
            dom.append_child(NodeId::ROOT, id)?;
        }
    } else {
        let id = build_node(&mut dom, portable)?;
        dom.append_child(NodeId::ROOT, id)?;
    }
    Ok(dom)
}

fn build_node(dom: &mut Dom, portable: &PortableNode) -> Result<NodeId, PortableError> {
    let require = |field: &'static str, value: &Option<String>| {
        value.clone().ok_or(PortableError::MissingField {
            field,
            kind: portable.kind.clone(),
        })
    };
    let id = match portable.kind.as_str() {
        "element" | "singletag" => {
            let id = dom.create_element(&require("name", &portable.name)?);
            for attr in &portable.attributes {
                if attr.kind != "attr" {
                    return Err(PortableError::UnknownKind(attr.kind.clone()));
                }
                let name = require("name", &attr.name)?;
                dom.set_attribute(id, &name, attr.value.as_deref().unwrap_or(""))?;
            }
            if portable.kind == "singletag" {
                if let Some(data) = dom.as_element_mut(id) {
                    data.self_closing = true;
                }
            }
            id
        }
        "text" => dom.create_text(portable.value.as_deref().unwrap_or("")),
        "cdata" => dom.alloc(NodeKind::Cdata(
            portable.value.clone().unwrap_or_default(),
        )),
        "proc" => dom.alloc(NodeKind::ProcessingInstruction {
            target: require("name", &portable.name)?,
            data: portable.value.clone().unwrap_or_default(),
        }),
        "comment" => dom.create_comment(portable.value.as_deref().unwrap_or("")),
        "doctype" => dom.alloc(NodeKind::Doctype(require("name", &portable.name)?)),
        "document" | "attr" => {
            return Err(PortableError::UnknownKind(portable.kind.clone()));
        }
        other => return Err(PortableError::UnknownKind(other.to_string())),
    };
    for child in &portable.children {
        let child_id = build_node(dom, child)?;
        dom.append_child(id, child_id)?;
    }
    Ok(id)
}

/// Serialize the subtree rooted at `id` to pretty-printed JSON.
///
/// # Errors
///
/// [`PortableError::Json`] if serialization fails.
pub fn to_json(dom: &Dom, id: NodeId) -> Result<String, PortableError> {
    Ok(serde_json::to_string_pretty(&to_portable(dom, id))?)
}

/// Rebuild a tree from JSON text produced by [`to_json`] (or compatible
/// tooling).
///
/// # Errors
///
/// [`PortableError::Json`] for unparsable text, plus everything
/// [`from_portable`] raises.
pub fn from_json(text: &str) -> Result<Dom, PortableError> {
    let portable: PortableNode = serde_json::from_str(text)?;
    from_portable(&portable)
}
