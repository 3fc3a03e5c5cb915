//! The parsed selector representation.
//!
//! A selector string parses into a [`SelectorList`] of comma-separated
//! alternatives. Each alternative is a [`ComplexSelector`]: a subject
//! compound plus a chain of combinator steps stored right-to-left, the
//! order the matcher walks them.

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// The relation between two adjacent compounds in a complex selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `A B`: B anywhere below A.
    Descendant,
    /// `A > B`: B directly below A.
    Child,
    /// `A + B`: B immediately after A among element siblings.
    NextSibling,
    /// `A ~ B`: B anywhere after A among element siblings.
    SubsequentSibling,
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// One `[...]` test. Every variant requires the attribute to be present;
/// exactly one match mode applies per test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[name]`: present with any value.
    Exists(String),
    /// `[name=value]`: value equals exactly.
    Equals(String, String),
    /// `[name^=value]`: value starts with.
    Prefix(String, String),
    /// `[name$=value]`: value ends with.
    Suffix(String, String),
    /// `[name*=value]`: value contains.
    Substring(String, String),
}

impl AttributeSelector {
    /// The attribute name this test inspects.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::Prefix(name, _)
            | Self::Suffix(name, _)
            | Self::Substring(name, _) => name,
        }
    }
}

/// [§ 14.3 The An+B notation](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// The `an+b` formula of an indexed pseudo-class. Matches sibling index
/// `i` (1-based) when `i == a*k + b` for some integer `k >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthForm {
    /// The step.
    pub a: i32,
    /// The offset.
    pub b: i32,
}

impl NthForm {
    /// Whether the 1-based sibling index `index` satisfies the formula.
    #[must_use]
    pub const fn matches(self, index: i32) -> bool {
        if self.a == 0 {
            return index == self.b;
        }
        let delta = index - self.b;
        delta % self.a == 0 && delta / self.a >= 0
    }
}

/// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
///
/// The supported structural pseudo-classes. Anything else parses into
/// [`PseudoClass::Unsupported`], which never matches; dynamic state like
/// `:hover` has no meaning in a static tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:only-child`
    OnlyChild,
    /// `:first-of-type`
    FirstOfType,
    /// `:last-of-type`
    LastOfType,
    /// `:empty` (lenient: whitespace-only text and comments do not count)
    Empty,
    /// `:nth-child(an+b)`
    NthChild(NthForm),
    /// `:nth-last-child(an+b)`
    NthLastChild(NthForm),
    /// `:nth-of-type(an+b)`
    NthOfType(NthForm),
    /// `:nth-last-of-type(an+b)`
    NthLastOfType(NthForm),
    /// `:not(...)`, carrying a full parsed selector list.
    Not(SelectorList),
    /// A recognized-but-unsupported pseudo-class, kept for diagnostics.
    Unsupported(String),
}

/// [§ 4.1 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// All the simple selectors that apply to one element: optional tag,
/// optional id, classes, attribute tests, and pseudo-classes. A missing
/// tag acts as the universal selector `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Tag name test, matched case-insensitively. `None` matches any tag.
    pub tag: Option<String>,
    /// `#id` test.
    pub id: Option<String>,
    /// `.class` tests; all must be present.
    pub classes: Vec<String>,
    /// `[...]` tests; all must hold.
    pub attributes: Vec<AttributeSelector>,
    /// `:pseudo` tests; all must hold.
    pub pseudo_classes: Vec<PseudoClass>,
}

/// [§ 4.2 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// The subject compound plus the combinator chain leading away from it,
/// stored right-to-left: the first entry relates the subject to its
/// nearest constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound; matched elements are subjects.
    pub subject: CompoundSelector,
    /// The remaining steps, rightmost first.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// [§ 4.3 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// The comma-separated alternatives of one selector string. An element
/// matches the list when it matches any alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The alternatives, in source order.
    pub alternatives: Vec<ComplexSelector>,
}
