//! Arena-based DOM tree with stable-identifier node access.
//!
//! The tree stores all nodes in a contiguous vector, using [`NodeId`] indices
//! for all relationships. Child lists own their entries; the parent link is a
//! plain identifier, weak by construction, so no reference cycles can form.

use crate::attributes::Attributes;
use crate::error::TreeError;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues. Identifiers stay valid for the lifetime of the [`Dom`]; detaching
/// a node never invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The node's kind together with its kind-specific payload.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The current parent, or `None` for roots and detached nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The closed set of node kinds.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node type."
///
/// Leaf kinds carry their payload directly and never accept children; the
/// mutation API enforces this with [`TreeError::Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    ///
    /// The root container. A Document is always a root; it can never become
    /// a child of another node.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.12 Interface `CDATASection`](https://dom.spec.whatwg.org/#interface-cdatasection)
    ///
    /// The raw character data between `<![CDATA[` and `]]>`.
    Cdata(String),
    /// [§ 4.7 Interface `ProcessingInstruction`](https://dom.spec.whatwg.org/#interface-processinginstruction)
    ///
    /// A `<?target data ?>` instruction.
    ProcessingInstruction {
        /// The instruction target (the leading name, e.g. `php`).
        target: String,
        /// The instruction body.
        data: String,
    },
    /// [§ 4.8 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
    /// [§ 4.6 Interface `DocumentType`](https://dom.spec.whatwg.org/#interface-documenttype)
    ///
    /// The declaration name, e.g. `html` for `<!DOCTYPE html>`.
    Doctype(String),
}

impl NodeKind {
    /// Whether this kind may own children. Only Document and Element nodes
    /// are containers; every other kind is a leaf.
    #[must_use]
    pub const fn can_have_children(&self) -> bool {
        matches!(self, Self::Document | Self::Element(_))
    }

    /// The portable kind string for this node, also used in error messages.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Cdata(_) => "cdata",
            Self::ProcessingInstruction { .. } => "proc",
            Self::Comment(_) => "comment",
            Self::Doctype(_) => "doctype",
        }
    }

    /// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#dom-node-nodename)
    ///
    /// The node's name: the tag name for elements, a `#`-prefixed sentinel
    /// for unnamed kinds, the target for processing instructions, and the
    /// declaration name for doctypes.
    #[must_use]
    pub fn node_name(&self) -> &str {
        match self {
            Self::Document => "#document",
            Self::Element(data) => &data.tag_name,
            Self::Text(_) => "#text",
            Self::Cdata(_) => "#cdata-section",
            Self::ProcessingInstruction { target, .. } => target,
            Self::Comment(_) => "#comment",
            Self::Doctype(name) => name,
        }
    }
}

/// Element-specific data.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
/// "When an element is created, its local name is always given."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The tag name, stored canonical upper-case.
    pub tag_name: String,
    /// The element's attribute list (insertion-ordered, name-unique).
    pub attributes: Attributes,
    /// Whether the element closes itself: it was parsed or constructed
    /// without a separate closing tag. Serialized as `<name/>` when it has
    /// no children.
    pub self_closing: bool,
}

impl ElementData {
    /// Create element data for the given tag (canonicalized upper-case),
    /// with no attributes and not self-closing.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag_name: tag.to_ascii_uppercase(),
            attributes: Attributes::new(),
            self_closing: false,
        }
    }

    /// The element's `id` attribute value, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id")
    }

    /// The space-separated tokens of the `class` attribute, in order.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|v| v.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
///
/// The Document node is always at [`NodeId::ROOT`]. Detached subtrees stay
/// inside the arena and can be re-attached; they are only released when the
/// whole `Dom` is dropped.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
}

impl Dom {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// The number of nodes in the arena, detached subtrees included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty (never true: the Document is always there).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new detached node and return its id.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element with the given tag name (canonicalized
    /// upper-case).
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Allocate a detached comment node.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Comment(text.to_string()))
    }

    // ===== Kind accessors =====

    /// The node's kind, if the id is valid.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get the text if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    // ===== Traversal =====

    /// The parent of a node, or `None` for roots and detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// The nearest ancestor that is an element.
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.as_element(parent).map(|_| parent)
    }

    /// All children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The element children of a node, in document order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.as_element(c).is_some())
    }

    /// The first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// The last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// The sibling immediately after this node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The sibling immediately before this node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&s| s == id)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p)).copied()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            dom: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings, from immediately before to first.
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            dom: self,
            current: self.prev_sibling(id),
        }
    }

    /// Iterate over all descendants of a node in pre-order depth-first
    /// document order, excluding the node itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { dom: self, stack }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Whether `node` equals `ancestor` or descends from it, by walking
    /// parent links. O(depth).
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return true;
        }
        self.ancestors(node).any(|a| a == ancestor)
    }

    // ===== Mutation =====

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` as the last child of `parent`. A node already attached
    /// elsewhere is first detached (move semantics, never duplication).
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidId`] if either id is not part of this tree.
    /// - [`TreeError::Kind`] if `parent` is a leaf kind or `child` is a
    ///   Document.
    /// - [`TreeError::Cycle`] if `child` contains `parent`.
    ///
    /// All checks run before any mutation; a failed append leaves the tree
    /// unchanged.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_placement(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Insert `child` into `parent` immediately before `reference`.
    /// Inserting a node before itself is a no-op.
    ///
    /// # Errors
    ///
    /// As [`Dom::append_child`], plus [`TreeError::ReferenceNotFound`] when
    /// `reference` is not currently a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), TreeError> {
        self.check_placement(parent, child)?;
        if !self.nodes[parent.0].children.contains(&reference) {
            return Err(TreeError::ReferenceNotFound);
        }
        if child == reference {
            return Ok(());
        }
        self.detach(child);
        // Position looked up after the detach: detaching a sibling shifts it.
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .ok_or(TreeError::ReferenceNotFound)?;
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Unlink `child` from `parent`. The detached node keeps its subtree and
    /// may be re-attached elsewhere.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidId`] if either id is not part of this tree.
    /// - [`TreeError::NotAChild`] if `child`'s parent is not `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(TreeError::InvalidId);
        }
        if self.parent(child) != Some(parent) {
            return Err(TreeError::NotAChild);
        }
        self.detach(child);
        Ok(())
    }

    /// Unlink a node from its parent, keeping its subtree intact. A no-op
    /// for roots, already-detached nodes, and unknown ids.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(pos) = self.nodes[parent.0].children.iter().position(|&c| c == id) {
            let _ = self.nodes[parent.0].children.remove(pos);
        }
        self.nodes[id.0].parent = None;
    }

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-replace)
    ///
    /// Replace `old` with `new` inside `parent`, preserving position.
    /// Equivalent to insert-before-then-remove. Replacing a node with itself
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidId`] if any id is not part of this tree.
    /// - [`TreeError::NotAChild`] if `old`'s parent is not `parent`.
    /// - [`TreeError::Kind`] if `new` is a Document.
    /// - [`TreeError::Cycle`] if `new` contains `parent`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<(), TreeError> {
        if self.get(old).is_none() {
            return Err(TreeError::InvalidId);
        }
        if self.parent(old) != Some(parent) {
            return Err(TreeError::NotAChild);
        }
        self.check_placement(parent, new)?;
        if new == old {
            return Ok(());
        }
        self.detach(new);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or(TreeError::NotAChild)?;
        self.nodes[parent.0].children.insert(index, new);
        self.nodes[new.0].parent = Some(parent);
        self.detach(old);
        Ok(())
    }

    /// [§ 4.2.6 Mixin ParentNode](https://dom.spec.whatwg.org/#dom-parentnode-prepend)
    ///
    /// Insert `child` as the first child of `parent`.
    ///
    /// # Errors
    ///
    /// As [`Dom::append_child`].
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        match self.first_child(parent) {
            Some(first) => self.insert_before(parent, child, first),
            None => self.append_child(parent, child),
        }
    }

    /// [§ 4.2.8 Mixin ChildNode](https://dom.spec.whatwg.org/#dom-childnode-before)
    ///
    /// Insert `node` as the sibling immediately before `reference`, in
    /// `reference`'s parent.
    ///
    /// # Errors
    ///
    /// As [`Dom::insert_before`]; [`TreeError::NotAChild`] when `reference`
    /// has no parent.
    pub fn insert_sibling_before(
        &mut self,
        reference: NodeId,
        node: NodeId,
    ) -> Result<(), TreeError> {
        let parent = self.parent(reference).ok_or(TreeError::NotAChild)?;
        self.insert_before(parent, node, reference)
    }

    /// [§ 4.2.8 Mixin ChildNode](https://dom.spec.whatwg.org/#dom-childnode-after)
    ///
    /// Insert `node` as the sibling immediately after `reference`, in
    /// `reference`'s parent.
    ///
    /// # Errors
    ///
    /// As [`Dom::insert_before`]; [`TreeError::NotAChild`] when `reference`
    /// has no parent.
    pub fn insert_sibling_after(
        &mut self,
        reference: NodeId,
        node: NodeId,
    ) -> Result<(), TreeError> {
        let parent = self.parent(reference).ok_or(TreeError::NotAChild)?;
        match self.next_sibling(reference) {
            Some(next) => self.insert_before(parent, node, next),
            None => self.append_child(parent, node),
        }
    }

    /// [§ 4.2.8 Mixin ChildNode](https://dom.spec.whatwg.org/#dom-childnode-replacewith)
    ///
    /// Replace `old` with `new` inside `old`'s parent, preserving position.
    ///
    /// # Errors
    ///
    /// As [`Dom::replace_child`]; [`TreeError::NotAChild`] when `old` has no
    /// parent.
    pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        let parent = self.parent(old).ok_or(TreeError::NotAChild)?;
        self.replace_child(parent, new, old)
    }

    /// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#dom-node-clonenode)
    ///
    /// Produce a structurally equal, fully detached copy of a node inside
    /// this arena. Element attributes are copied; `deep` clones the whole
    /// subtree, otherwise only the node itself.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidId`] if the id is not part of this tree.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, TreeError> {
        let kind = self.get(id).ok_or(TreeError::InvalidId)?.kind.clone();
        let copy = self.alloc(kind);
        if deep {
            let children = self.children(id).to_vec();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.nodes[copy.0].children.push(child_copy);
                self.nodes[child_copy.0].parent = Some(copy);
            }
        }
        Ok(copy)
    }

    /// Deep-copy a subtree from another tree into this arena, returning the
    /// detached copy's id. Used to graft parsed fragments into an existing
    /// document.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidId`] if `node` is not part of `source`.
    pub fn adopt(&mut self, source: &Self, node: NodeId) -> Result<NodeId, TreeError> {
        let kind = source.get(node).ok_or(TreeError::InvalidId)?.kind.clone();
        let copy = self.alloc(kind);
        for &child in source.children(node) {
            let child_copy = self.adopt(source, child)?;
            self.nodes[copy.0].children.push(child_copy);
            self.nodes[child_copy.0].parent = Some(copy);
        }
        Ok(copy)
    }

    // ===== Text content =====

    /// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenation, in document order, of all descendant Text values.
    /// Non-Text leaf kinds contribute nothing.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for descendant in self.descendants(id) {
            if let Some(NodeKind::Text(text)) = self.kind(descendant) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children of a container node with a single Text node
    /// holding the given string.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidId`] if the id is not part of this tree.
    /// - [`TreeError::Kind`] if the node is a leaf kind.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), TreeError> {
        let node = self.get(id).ok_or(TreeError::InvalidId)?;
        if !node.kind.can_have_children() {
            return Err(TreeError::Kind {
                kind: node.kind.kind_str(),
            });
        }
        let old = node.children.clone();
        for child in old {
            self.detach(child);
        }
        let text_id = self.create_text(text);
        self.nodes[id.0].children.push(text_id);
        self.nodes[text_id.0].parent = Some(id);
        Ok(())
    }

    // ===== Attributes =====

    /// Set an attribute on an element; an existing name is replaced in
    /// place, keeping its position.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidId`] for unknown ids, [`TreeError::Kind`] for
    /// non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        self.element_data_mut(id)?.attributes.set(name, value);
        Ok(())
    }

    /// The attribute value for `name`, if the node is an element carrying
    /// that attribute.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attributes.get(name))
    }

    /// Whether the element carries the named attribute, even with an empty
    /// value.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.as_element(id)
            .is_some_and(|e| e.attributes.contains(name))
    }

    /// Remove an attribute. Removing an absent attribute is a no-op.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidId`] for unknown ids, [`TreeError::Kind`] for
    /// non-element nodes.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), TreeError> {
        let _ = self.element_data_mut(id)?.attributes.remove(name);
        Ok(())
    }

    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#dom-element-toggleattribute)
    ///
    /// Toggle a presence-only attribute. With `force`, adds or removes it
    /// unconditionally. Returns whether the attribute is present afterwards.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidId`] for unknown ids, [`TreeError::Kind`] for
    /// non-element nodes.
    pub fn toggle_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        force: Option<bool>,
    ) -> Result<bool, TreeError> {
        let data = self.element_data_mut(id)?;
        let present = data.attributes.contains(name);
        let wanted = force.unwrap_or(!present);
        if wanted && !present {
            data.attributes.set(name, "");
        } else if !wanted && present {
            let _ = data.attributes.remove(name);
        }
        Ok(wanted)
    }

    fn element_data_mut(&mut self, id: NodeId) -> Result<&mut ElementData, TreeError> {
        let node = self.get(id).ok_or(TreeError::InvalidId)?;
        if !matches!(node.kind, NodeKind::Element(_)) {
            return Err(TreeError::Kind {
                kind: node.kind.kind_str(),
            });
        }
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(data) => Ok(data),
            _ => Err(TreeError::InvalidId),
        }
    }

    // ===== Query helpers =====

    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The id attribute specifies its element's unique identifier (ID)."
    ///
    /// Pre-order depth-first search of the element descendants of `root` for
    /// the first element whose `id` attribute equals `value`.
    #[must_use]
    pub fn get_element_by_id(&self, root: NodeId, value: &str) -> Option<NodeId> {
        self.descendants(root)
            .find(|&d| self.as_element(d).is_some_and(|e| e.id() == Some(value)))
    }

    /// All element descendants of `root` with the given tag name,
    /// case-insensitive, in document order.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&d| {
                self.as_element(d)
                    .is_some_and(|e| e.tag_name.eq_ignore_ascii_case(name))
            })
            .collect()
    }

    /// All element descendants of `root` whose `name` attribute equals the
    /// given value, in document order.
    #[must_use]
    pub fn get_elements_by_name(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&d| {
                self.as_element(d)
                    .is_some_and(|e| e.attributes.get("name") == Some(name))
            })
            .collect()
    }

    /// All element descendants of `root` carrying every space-separated
    /// class token in `names`, in document order. An empty token list
    /// matches nothing.
    #[must_use]
    pub fn get_elements_by_class_name(&self, root: NodeId, names: &str) -> Vec<NodeId> {
        let required: Vec<&str> = names.split_ascii_whitespace().collect();
        if required.is_empty() {
            return Vec::new();
        }
        self.descendants(root)
            .filter(|&d| {
                self.as_element(d).is_some_and(|e| {
                    let classes = e.classes();
                    required.iter().all(|token| classes.contains(token))
                })
            })
            .collect()
    }

    // ===== Document conveniences =====

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// The element child of the Document named `HTML`, or failing that the
    /// first element child (fragment documents rarely carry an `<html>`
    /// wrapper).
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        let mut first = None;
        for child in self.element_children(NodeId::ROOT) {
            if first.is_none() {
                first = Some(child);
            }
            if self
                .as_element(child)
                .is_some_and(|e| e.tag_name == "HTML")
            {
                return Some(child);
            }
        }
        first
    }

    /// The Document's doctype child, if any.
    #[must_use]
    pub fn doctype(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&c| matches!(self.kind(c), Some(NodeKind::Doctype(_))))
    }

    /// The `<head>` element under the document element.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.find_child_element(self.document_element()?, "HEAD")
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// The `<body>` element under the document element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.find_child_element(self.document_element()?, "BODY")
    }

    /// The text of the `<title>` element inside `<head>`. `None` when there
    /// is no head, the empty string when the head has no title.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let head = self.head()?;
        Some(
            self.find_child_element(head, "TITLE")
                .map(|t| self.text_content(t))
                .unwrap_or_default(),
        )
    }

    /// Set the document title, creating `<title>` inside `<head>` when
    /// missing. A no-op without a `<head>`.
    ///
    /// # Errors
    ///
    /// Propagates [`TreeError`] from the underlying mutations.
    pub fn set_title(&mut self, value: &str) -> Result<(), TreeError> {
        let Some(head) = self.head() else {
            return Ok(());
        };
        if let Some(title) = self.find_child_element(head, "TITLE") {
            return self.set_text_content(title, value);
        }
        let title = self.create_element("TITLE");
        self.set_text_content(title, value)?;
        self.append_child(head, title)
    }

    fn find_child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.element_children(parent)
            .find(|&c| self.as_element(c).is_some_and(|e| e.tag_name == tag))
    }

    // ===== Comparison =====

    /// Structural equivalence between a node of this tree and a node of
    /// another (or the same) tree: kinds, payloads, attributes, and children
    /// must all match recursively. Node identity and detached leftovers in
    /// either arena are ignored.
    #[must_use]
    pub fn structural_eq(&self, a: NodeId, other: &Self, b: NodeId) -> bool {
        let (Some(node_a), Some(node_b)) = (self.get(a), other.get(b)) else {
            return false;
        };
        if node_a.kind != node_b.kind {
            return false;
        }
        if node_a.children.len() != node_b.children.len() {
            return false;
        }
        node_a
            .children
            .iter()
            .zip(node_b.children.iter())
            .all(|(&ca, &cb)| self.structural_eq(ca, other, cb))
    }

    // ===== Internal placement checks =====

    fn check_placement(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_node = self.get(parent).ok_or(TreeError::InvalidId)?;
        let child_node = self.get(child).ok_or(TreeError::InvalidId)?;
        if !parent_node.kind.can_have_children() {
            return Err(TreeError::Kind {
                kind: parent_node.kind.kind_str(),
            });
        }
        if matches!(child_node.kind, NodeKind::Document) {
            return Err(TreeError::Kind {
                kind: child_node.kind.kind_str(),
            });
        }
        if self.contains(child, parent) {
            return Err(TreeError::Cycle);
        }
        Ok(())
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    dom: &'a Dom,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.dom.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    dom: &'a Dom,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.dom.prev_sibling(id);
        Some(id)
    }
}

/// Iterator over all descendants of a node, pre-order depth-first.
pub struct DescendantIterator<'a> {
    dom: &'a Dom,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        for &child in self.dom.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
