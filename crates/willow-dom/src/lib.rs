//! In-memory DOM tree.
//!
//! Nodes live in a single arena ([`Dom`]) and reference each other through
//! [`NodeId`] indices: child lists own their entries, parent links are weak
//! identifiers, and the Document root always sits at [`NodeId::ROOT`].
//! On top of the tree sit attribute views (class list, inline style,
//! dataset), an HTML serializer, and a serde-backed portable form for JSON
//! interchange.

pub mod attributes;
pub mod error;
pub mod portable;
pub mod serializer;
pub mod tree;
pub mod views;

pub use attributes::{Attribute, Attributes};
pub use error::TreeError;
pub use portable::{from_json, from_portable, to_json, to_portable, PortableError, PortableNode};
pub use serializer::{inner_html, serialize};
pub use tree::{Dom, ElementData, Node, NodeId, NodeKind};
