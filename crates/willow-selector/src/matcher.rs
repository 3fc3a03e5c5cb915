//! Selector matching against a DOM tree.
//!
//! Matching is right-to-left: a candidate element is tested against the
//! subject compound first, then the combinator chain walks up through
//! ancestors and back through preceding element siblings, backtracking
//! where a combinator permits more than one anchor. Queries visit the
//! element descendants of the search root in pre-order document order and
//! never skip a sibling subtree, so the first reported match is the first
//! match in document order.

use willow_dom::{Dom, NodeId, NodeKind};

use crate::ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList,
};
use crate::error::SelectorError;
use crate::parser::parse_selector_list;

/// [§ 5.2 `querySelector`](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
///
/// The first element below `root` (in document order, `root` excluded)
/// matching the selector.
///
/// # Errors
///
/// Propagates [`SelectorError`] from parsing the selector string.
pub fn query_selector(
    dom: &Dom,
    root: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, SelectorError> {
    let list = parse_selector_list(selector)?;
    Ok(dom
        .descendants(root)
        .find(|&id| dom.as_element(id).is_some() && matches_list(dom, id, &list)))
}

/// [§ 5.2 `querySelectorAll`](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
///
/// Every element below `root` matching any alternative of the selector,
/// in document order, each element reported once.
///
/// # Errors
///
/// Propagates [`SelectorError`] from parsing the selector string.
pub fn query_selector_all(
    dom: &Dom,
    root: NodeId,
    selector: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    let list = parse_selector_list(selector)?;
    Ok(dom
        .descendants(root)
        .filter(|&id| dom.as_element(id).is_some() && matches_list(dom, id, &list))
        .collect())
}

/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#dom-element-matches)
///
/// Whether the given element matches the selector. Non-element nodes
/// never match.
///
/// # Errors
///
/// Propagates [`SelectorError`] from parsing the selector string.
pub fn matches(dom: &Dom, id: NodeId, selector: &str) -> Result<bool, SelectorError> {
    let list = parse_selector_list(selector)?;
    Ok(dom.as_element(id).is_some() && matches_list(dom, id, &list))
}

/// Whether the element matches any alternative of an already-parsed list.
#[must_use]
pub fn matches_list(dom: &Dom, id: NodeId, list: &SelectorList) -> bool {
    list.alternatives
        .iter()
        .any(|complex| matches_complex(dom, id, complex))
}

fn matches_complex(dom: &Dom, id: NodeId, complex: &ComplexSelector) -> bool {
    matches_compound(dom, id, &complex.subject) && matches_steps(dom, id, &complex.combinators)
}

/// Walk the combinator chain away from a matched subject. Descendant and
/// subsequent-sibling steps backtrack over every admissible anchor.
fn matches_steps(dom: &Dom, id: NodeId, steps: &[(Combinator, CompoundSelector)]) -> bool {
    let Some(((combinator, compound), rest)) = steps.split_first() else {
        return true;
    };
    match combinator {
        Combinator::Child => dom
            .parent_element(id)
            .is_some_and(|p| matches_compound(dom, p, compound) && matches_steps(dom, p, rest)),
        Combinator::Descendant => element_ancestors(dom, id)
            .any(|a| matches_compound(dom, a, compound) && matches_steps(dom, a, rest)),
        Combinator::NextSibling => preceding_elements(dom, id)
            .next()
            .is_some_and(|s| matches_compound(dom, s, compound) && matches_steps(dom, s, rest)),
        Combinator::SubsequentSibling => preceding_elements(dom, id)
            .any(|s| matches_compound(dom, s, compound) && matches_steps(dom, s, rest)),
    }
}

fn element_ancestors(dom: &Dom, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    dom.ancestors(id).filter(|&a| dom.as_element(a).is_some())
}

fn preceding_elements(dom: &Dom, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    dom.preceding_siblings(id)
        .filter(|&s| dom.as_element(s).is_some())
}

fn matches_compound(dom: &Dom, id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(element) = dom.as_element(id) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !element.tag_name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(wanted) = &compound.id {
        if element.id() != Some(wanted.as_str()) {
            return false;
        }
    }
    let classes = element.classes();
    if !compound.classes.iter().all(|c| classes.contains(&c.as_str())) {
        return false;
    }
    if !compound
        .attributes
        .iter()
        .all(|a| matches_attribute(dom, id, a))
    {
        return false;
    }
    compound
        .pseudo_classes
        .iter()
        .all(|p| matches_pseudo(dom, id, p))
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A missing attribute fails every test mode.
fn matches_attribute(dom: &Dom, id: NodeId, attribute: &AttributeSelector) -> bool {
    let Some(value) = dom.get_attribute(id, attribute.name()) else {
        return false;
    };
    match attribute {
        AttributeSelector::Exists(_) => true,
        AttributeSelector::Equals(_, wanted) => value == wanted,
        AttributeSelector::Prefix(_, wanted) => value.starts_with(wanted),
        AttributeSelector::Suffix(_, wanted) => value.ends_with(wanted),
        AttributeSelector::Substring(_, wanted) => value.contains(wanted),
    }
}

fn matches_pseudo(dom: &Dom, id: NodeId, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::FirstChild => sibling_index(dom, id, false) == 1,
        PseudoClass::LastChild => sibling_index_from_end(dom, id, false) == 1,
        PseudoClass::OnlyChild => sibling_count(dom, id, false) == 1,
        PseudoClass::FirstOfType => sibling_index(dom, id, true) == 1,
        PseudoClass::LastOfType => sibling_index_from_end(dom, id, true) == 1,
        PseudoClass::Empty => is_empty_lenient(dom, id),
        PseudoClass::NthChild(form) => form.matches(sibling_index(dom, id, false)),
        PseudoClass::NthLastChild(form) => form.matches(sibling_index_from_end(dom, id, false)),
        PseudoClass::NthOfType(form) => form.matches(sibling_index(dom, id, true)),
        PseudoClass::NthLastOfType(form) => form.matches(sibling_index_from_end(dom, id, true)),
        PseudoClass::Not(list) => !matches_list(dom, id, list),
        PseudoClass::Unsupported(_) => false,
    }
}

/// The element siblings considered by the indexed pseudo-classes: the
/// element children of the parent, optionally narrowed to the same tag.
/// A parentless element counts as an only child.
fn siblings_of(dom: &Dom, id: NodeId, of_type: bool) -> Vec<NodeId> {
    let Some(parent) = dom.parent(id) else {
        return vec![id];
    };
    let tag = dom.as_element(id).map(|e| e.tag_name.as_str());
    dom.element_children(parent)
        .filter(|&s| !of_type || dom.as_element(s).map(|e| e.tag_name.as_str()) == tag)
        .collect()
}

fn sibling_index(dom: &Dom, id: NodeId, of_type: bool) -> i32 {
    let siblings = siblings_of(dom, id, of_type);
    siblings
        .iter()
        .position(|&s| s == id)
        .map_or(0, |p| i32::try_from(p).unwrap_or(i32::MAX - 1) + 1)
}

fn sibling_index_from_end(dom: &Dom, id: NodeId, of_type: bool) -> i32 {
    let siblings = siblings_of(dom, id, of_type);
    siblings
        .iter()
        .rev()
        .position(|&s| s == id)
        .map_or(0, |p| i32::try_from(p).unwrap_or(i32::MAX - 1) + 1)
}

fn sibling_count(dom: &Dom, id: NodeId, of_type: bool) -> usize {
    siblings_of(dom, id, of_type).len()
}

/// [§ 14.4.2 :empty](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
///
/// Lenient reading: comments and whitespace-only text do not disqualify
/// an element from being empty.
fn is_empty_lenient(dom: &Dom, id: NodeId) -> bool {
    dom.children(id).iter().all(|&child| match dom.kind(child) {
        Some(NodeKind::Comment(_)) => true,
        Some(NodeKind::Text(text)) => text.trim().is_empty(),
        _ => false,
    })
}
