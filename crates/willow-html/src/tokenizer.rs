//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! A two-state streaming tokenizer. Outside a tag every character is text;
//! `<` switches into the tag state, where characters accumulate until an
//! unquoted `>` closes the tag and the buffered contents get classified
//! into a [`Token`]. Quoted attribute values may contain `>` and `<`
//! freely, since a quote character suspends tag-end detection until the
//! same quote character appears again.

use strum_macros::Display;
use willow_common::warning::warn_once;

use crate::error::ParseError;
use crate::token::{Attribute, Token};

/// The two tokenizer states.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerState {
    /// Accumulating character data between tags.
    #[strum(serialize = "text")]
    Text,
    /// Accumulating the contents of a `<...>` tag.
    #[strum(serialize = "tag")]
    Tag,
}

/// Streaming HTML tokenizer. Feed it characters with [`Tokenizer::push`]
/// and collect the token stream with [`Tokenizer::finish`].
#[derive(Debug)]
pub struct Tokenizer {
    state: TokenizerState,
    buffer: String,
    quote: Option<char>,
    tokens: Vec<Token>,
}

impl Tokenizer {
    /// Create a tokenizer in the text state with an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TokenizerState::Text,
            buffer: String::new(),
            quote: None,
            tokens: Vec::new(),
        }
    }

    /// The current state, for diagnostics.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Feed one character.
    ///
    /// # Errors
    ///
    /// [`ParseError::MalformedProcessingInstruction`] when a closing `>`
    /// finishes a `<?...>` tag whose contents do not form a valid
    /// instruction.
    pub fn push(&mut self, ch: char) -> Result<(), ParseError> {
        match self.state {
            TokenizerState::Text => {
                if ch == '<' {
                    if !self.buffer.is_empty() {
                        let data = std::mem::take(&mut self.buffer);
                        self.tokens.push(Token::Text { data });
                    }
                    self.state = TokenizerState::Tag;
                } else {
                    self.buffer.push(ch);
                }
            }
            TokenizerState::Tag => {
                if let Some(quote) = self.quote {
                    self.buffer.push(ch);
                    if ch == quote {
                        self.quote = None;
                    }
                } else if ch == '"' || ch == '\'' {
                    self.quote = Some(ch);
                    self.buffer.push(ch);
                } else if ch == '>' {
                    let raw = std::mem::take(&mut self.buffer);
                    self.state = TokenizerState::Text;
                    if let Some(token) = classify(&raw)? {
                        self.tokens.push(token);
                    }
                } else {
                    self.buffer.push(ch);
                }
            }
        }
        Ok(())
    }

    /// Flush the tokenizer and return the collected token stream. Trailing
    /// text is emitted as a final text token; an unterminated tag is
    /// dropped with a warning.
    #[must_use]
    pub fn finish(mut self) -> Vec<Token> {
        match self.state {
            TokenizerState::Text => {
                if !self.buffer.is_empty() {
                    let data = std::mem::take(&mut self.buffer);
                    self.tokens.push(Token::Text { data });
                }
            }
            TokenizerState::Tag => {
                warn_once(
                    "tokenizer",
                    &format!("input ended inside an unterminated tag `<{}`", self.buffer),
                );
            }
        }
        self.tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize a complete input string.
///
/// # Errors
///
/// [`ParseError::MalformedProcessingInstruction`] for `<?...>` tags whose
/// contents do not form a valid instruction.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokenizer = Tokenizer::new();
    for ch in input.chars() {
        tokenizer.push(ch)?;
    }
    Ok(tokenizer.finish())
}

/// Classify the buffered contents of one tag (the text between `<` and the
/// closing `>`). Returns `None` for tags that are recognized but dropped.
fn classify(raw: &str) -> Result<Option<Token>, ParseError> {
    if let Some(rest) = raw.strip_prefix("!--") {
        if let Some(data) = rest.strip_suffix("--") {
            return Ok(Some(Token::Comment {
                data: data.to_string(),
            }));
        }
        warn_once("tokenizer", &format!("dropping malformed comment `<{raw}>`"));
        return Ok(None);
    }
    if let Some(rest) = raw.strip_prefix("![CDATA[") {
        if let Some(data) = rest.strip_suffix("]]") {
            return Ok(Some(Token::Cdata {
                data: data.to_string(),
            }));
        }
        warn_once(
            "tokenizer",
            &format!("dropping malformed CDATA section `<{raw}>`"),
        );
        return Ok(None);
    }
    if raw.get(..9).is_some_and(|p| p.eq_ignore_ascii_case("!doctype ")) {
        return Ok(Some(Token::Doctype {
            name: raw[9..].trim().to_string(),
        }));
    }
    if raw.starts_with('!') {
        warn_once(
            "tokenizer",
            &format!("dropping unrecognized markup declaration `<{raw}>`"),
        );
        return Ok(None);
    }
    if raw.starts_with('?') {
        return classify_processing_instruction(raw).map(Some);
    }
    if let Some(name) = raw.strip_prefix('/') {
        let name = name.trim();
        if name.is_empty() {
            warn_once("tokenizer", "dropping closing tag with no name `</>`");
            return Ok(None);
        }
        return Ok(Some(Token::CloseTag {
            name: name.to_string(),
        }));
    }
    Ok(classify_open_tag(raw))
}

/// Split a `?target data ?` tag body into target and data. The target is
/// the leading run of name characters; it must be non-empty and separated
/// from the data by whitespace.
fn classify_processing_instruction(raw: &str) -> Result<Token, ParseError> {
    let malformed = || ParseError::MalformedProcessingInstruction {
        text: raw.to_string(),
    };
    let body = raw
        .strip_prefix('?')
        .and_then(|r| r.strip_suffix('?'))
        .ok_or_else(malformed)?;
    let target_len = body
        .find(|c: char| !is_name_char(c))
        .unwrap_or(body.len());
    if target_len == 0 {
        return Err(malformed());
    }
    let (target, rest) = body.split_at(target_len);
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return Err(malformed());
    }
    Ok(Token::ProcessingInstruction {
        target: target.to_string(),
        data: rest.trim().to_string(),
    })
}

fn classify_open_tag(raw: &str) -> Option<Token> {
    let self_closing = raw.ends_with('/');
    let body = if self_closing {
        raw[..raw.len() - 1].trim()
    } else {
        raw.trim()
    };
    let name_len = body.find(char::is_whitespace).unwrap_or(body.len());
    let (name, attr_text) = body.split_at(name_len);
    if name.is_empty() {
        warn_once("tokenizer", "dropping opening tag with no name `<>`");
        return None;
    }
    Some(Token::OpenTag {
        name: name.to_string(),
        attributes: parse_attributes(attr_text),
        self_closing,
    })
}

const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | ':')
}

/// Parse the attribute portion of an open tag into name/value pairs.
/// Values may be double-quoted, single-quoted, or bare; a name without `=`
/// becomes a presence-only attribute with an empty value.
fn parse_attributes(text: &str) -> Vec<Attribute> {
    let chars: Vec<char> = text.chars().collect();
    let mut attributes = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && is_name_char(chars[i]) {
            i += 1;
        }
        if i == start {
            // Not a name character; skip the junk and resync.
            i += 1;
            continue;
        }
        let name: String = chars[start..i].iter().collect();
        if i < chars.len() && chars[i] == '=' {
            i += 1;
            let value = if i < chars.len() && (chars[i] == '"' || chars[i] == '\'') {
                let quote = chars[i];
                i += 1;
                let value_start = i;
                while i < chars.len() && chars[i] != quote {
                    i += 1;
                }
                let value: String = chars[value_start..i].iter().collect();
                if i < chars.len() {
                    i += 1;
                }
                value
            } else {
                let value_start = i;
                while i < chars.len() && !chars[i].is_whitespace() {
                    i += 1;
                }
                chars[value_start..i].iter().collect()
            };
            attributes.push(Attribute::new(name, value));
        } else {
            attributes.push(Attribute::new(name, ""));
        }
    }
    attributes
}
