//! Parse errors.

use thiserror::Error;
use willow_dom::TreeError;

/// Errors raised while tokenizing input or building the tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A closing tag appeared with no open element to match it anywhere on
    /// the stack.
    #[error("closing tag `</{tag}>` has no matching opening tag")]
    NoMatchingOpeningTag {
        /// The tag name as written in the closing tag.
        tag: String,
    },
    /// A `<?...>` tag did not form a valid processing instruction.
    #[error("`<{text}>` is not a valid processing instruction")]
    MalformedProcessingInstruction {
        /// The tag contents between `<` and `>`.
        text: String,
    },
    /// A tree placement rule was violated while assembling the document.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
