//! Selector errors.

use thiserror::Error;

/// Errors raised while parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector string does not follow the supported grammar.
    #[error("`{selector}` is not a valid selector")]
    Syntax {
        /// The offending selector string.
        selector: String,
    },
    /// One compound carried more than one `#id` part.
    #[error("`{selector}` uses more than one id in a single compound selector")]
    DuplicateId {
        /// The offending selector string.
        selector: String,
    },
    /// `:not(...)` nesting exceeded the supported depth.
    #[error("`{selector}` nests `:not(...)` too deeply")]
    TooDeep {
        /// The offending selector string.
        selector: String,
    },
}
