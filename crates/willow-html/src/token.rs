//! Tokens emitted by the HTML tokenizer.

/// A single `name="value"` pair as it appeared inside a tag, before any
/// de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, as written.
    pub name: String,
    /// The attribute value with surrounding quotes stripped; empty for
    /// presence-only attributes.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The flat token stream the tokenizer produces. Tag contents have already
/// been classified and split; the tree builder only has to pair open and
/// close tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of character data between tags.
    Text {
        /// The raw text, unescaped.
        data: String,
    },
    /// An opening tag such as `<div class="a">` or `<br/>`.
    OpenTag {
        /// The tag name, as written.
        name: String,
        /// The attribute pairs in source order, duplicates included.
        attributes: Vec<Attribute>,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
    },
    /// A closing tag such as `</div>`.
    CloseTag {
        /// The tag name, as written.
        name: String,
    },
    /// A `<!-- ... -->` comment.
    Comment {
        /// The comment body.
        data: String,
    },
    /// A `<![CDATA[ ... ]]>` section.
    Cdata {
        /// The raw character data.
        data: String,
    },
    /// A `<!DOCTYPE ...>` declaration.
    Doctype {
        /// The declaration body after the keyword, e.g. `html`.
        name: String,
    },
    /// A `<?target data ?>` processing instruction.
    ProcessingInstruction {
        /// The instruction target.
        target: String,
        /// The instruction body.
        data: String,
    },
}
