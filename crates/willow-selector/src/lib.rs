//! CSS selector parsing and matching.
//!
//! Selector strings parse through an explicit character-level state
//! machine into a [`SelectorList`] of comma-separated alternatives, each
//! a subject compound plus a right-to-left combinator chain. The matcher
//! tests candidates subject-first and walks the chain through ancestors
//! and preceding element siblings, so queries report subjects (never
//! their anchors) in document order.
//!
//! Supported: tag, `*`, `#id`, `.class`, `[attr]` with `=`, `^=`, `$=`
//! and `*=`, the child/descendant/sibling combinators, `,` grouping,
//! the structural pseudo-classes including the `an+b` forms, and `:not`.
//! Recognized-but-unsupported pseudo-classes parse fine and never match.

pub mod ast;
pub mod error;
pub mod matcher;
pub mod parser;

pub use ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthForm, PseudoClass,
    SelectorList,
};
pub use error::SelectorError;
pub use matcher::{matches, matches_list, query_selector, query_selector_all};
pub use parser::parse_selector_list;
