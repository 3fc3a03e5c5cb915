//! Streaming HTML tokenizer and tree builder.
//!
//! Parsing happens in two stages. The [`tokenizer`] walks the input one
//! character at a time through two states (text and tag) with quote
//! tracking, and classifies each finished tag into a [`Token`]. The
//! [`parser`] then pairs opening and closing tags over a single stack and
//! assembles a [`willow_dom::Dom`], closing unclosed descendants
//! implicitly and attaching stray top-level nodes to the Document.

pub mod error;
pub mod parser;
pub mod token;
pub mod tokenizer;

pub use error::ParseError;
pub use parser::{parse, set_inner_html, TreeBuilder};
pub use token::Token;
pub use tokenizer::{tokenize, Tokenizer, TokenizerState};
