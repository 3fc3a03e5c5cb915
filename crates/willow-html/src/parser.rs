//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree builder consumes the token stream and assembles a [`Dom`].
//! Completed nodes sit on a single stack; a closing tag pops entries until
//! it finds its matching open element, reparenting everything popped on the
//! way, so unclosed descendants are closed implicitly. Whatever remains on
//! the stack at end of input becomes a child of the Document.

use willow_common::warning::clear_warnings;
use willow_dom::{Dom, NodeId, NodeKind, TreeError};

use crate::error::ParseError;
use crate::token::Token;
use crate::tokenizer::tokenize;

#[derive(Debug, Clone, Copy)]
struct StackEntry {
    id: NodeId,
    /// Still waiting for its closing tag. Leaf nodes and closed elements
    /// are finished and merely await a parent.
    open: bool,
}

/// Incremental tree builder over a token stream.
#[derive(Debug)]
pub struct TreeBuilder {
    dom: Dom,
    stack: Vec<StackEntry>,
}

impl TreeBuilder {
    /// Create a builder with an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dom: Dom::new(),
            stack: Vec::new(),
        }
    }

    /// Feed one token.
    ///
    /// # Errors
    ///
    /// [`ParseError::NoMatchingOpeningTag`] when a closing tag matches
    /// nothing on the stack; [`ParseError::Tree`] if a placement rule is
    /// violated while linking nodes.
    pub fn process(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::Text { data } => self.push_closed(NodeKind::Text(data)),
            Token::Comment { data } => self.push_closed(NodeKind::Comment(data)),
            Token::Cdata { data } => self.push_closed(NodeKind::Cdata(data)),
            Token::Doctype { name } => self.push_closed(NodeKind::Doctype(name)),
            Token::ProcessingInstruction { target, data } => {
                self.push_closed(NodeKind::ProcessingInstruction { target, data });
            }
            Token::OpenTag {
                name,
                attributes,
                self_closing,
            } => {
                let id = self.dom.create_element(&name);
                for attribute in attributes {
                    // Duplicate names collapse to the last value, in the
                    // position of the first occurrence.
                    self.dom
                        .set_attribute(id, &attribute.name, &attribute.value)?;
                }
                if self_closing {
                    if let Some(data) = self.dom.as_element_mut(id) {
                        data.self_closing = true;
                    }
                }
                self.stack.push(StackEntry { id, open: true });
            }
            Token::CloseTag { name } => self.close(&name)?,
        }
        Ok(())
    }

    fn push_closed(&mut self, kind: NodeKind) {
        let id = self.dom.alloc(kind);
        self.stack.push(StackEntry { id, open: false });
    }

    /// Pop stack entries until the nearest open element whose tag matches
    /// `name` (case-insensitive), then reparent everything popped under it.
    fn close(&mut self, name: &str) -> Result<(), ParseError> {
        let mut collected: Vec<NodeId> = Vec::new();
        while let Some(entry) = self.stack.pop() {
            let matched = entry.open
                && self
                    .dom
                    .as_element(entry.id)
                    .is_some_and(|e| e.tag_name.eq_ignore_ascii_case(name));
            if matched {
                collected.reverse();
                for child in collected {
                    self.dom.append_child(entry.id, child)?;
                }
                if let Some(data) = self.dom.as_element_mut(entry.id) {
                    // An explicitly closed element is not self-closing,
                    // whatever its opening tag claimed.
                    data.self_closing = false;
                }
                self.stack.push(StackEntry {
                    id: entry.id,
                    open: false,
                });
                return Ok(());
            }
            collected.push(entry.id);
        }
        Err(ParseError::NoMatchingOpeningTag {
            tag: name.to_string(),
        })
    }

    /// Attach everything left on the stack to the Document and return the
    /// finished tree. Unclosed elements become Document children as-is.
    ///
    /// # Errors
    ///
    /// [`ParseError::Tree`] if linking the leftovers violates a placement
    /// rule.
    pub fn finish(mut self) -> Result<Dom, ParseError> {
        let entries = std::mem::take(&mut self.stack);
        for entry in entries {
            self.dom.append_child(NodeId::ROOT, entry.id)?;
        }
        Ok(self.dom)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a complete HTML string into a new document.
///
/// # Errors
///
/// Everything [`tokenize`] and [`TreeBuilder::process`] raise.
pub fn parse(input: &str) -> Result<Dom, ParseError> {
    clear_warnings();
    let mut builder = TreeBuilder::new();
    for token in tokenize(input)? {
        builder.process(token)?;
    }
    builder.finish()
}

/// Replace the children of `id` with the parse result of `html`, grafted
/// into `dom`.
///
/// # Errors
///
/// [`ParseError::Tree`] with [`TreeError::Kind`] when `id` is a leaf node,
/// or [`TreeError::InvalidId`] for unknown ids, plus everything [`parse`]
/// raises for the fragment itself. A fragment that fails to parse leaves
/// the existing children untouched.
pub fn set_inner_html(dom: &mut Dom, id: NodeId, html: &str) -> Result<(), ParseError> {
    let fragment = parse(html)?;
    let kind = dom.kind(id).ok_or(TreeError::InvalidId)?;
    if !kind.can_have_children() {
        return Err(ParseError::Tree(TreeError::Kind {
            kind: kind.kind_str(),
        }));
    }
    let old = dom.children(id).to_vec();
    for child in old {
        dom.detach(child);
    }
    for &child in fragment.children(fragment.root()) {
        let copy = dom.adopt(&fragment, child)?;
        dom.append_child(id, copy)?;
    }
    Ok(())
}
