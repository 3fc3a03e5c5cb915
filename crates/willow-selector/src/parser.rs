//! Selector string parsing.
//!
//! The parser is a character-level state machine. Compounds accumulate in
//! a scratch builder; whitespace between compounds is recorded as a
//! tentative descendant combinator, upgraded in place when a `>`, `+`, `~`
//! or `,` follows, so `a > b` and `a>b` parse identically and no phantom
//! universal compound ever appears between them. `:not(...)` arguments are
//! captured with balanced-parenthesis tracking and parsed recursively up
//! to a fixed depth.

use strum_macros::Display;
use willow_common::warning::warn_once;

use crate::ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthForm, PseudoClass,
    SelectorList,
};
use crate::error::SelectorError;

/// `:not(...)` may nest at most this deep.
const MAX_NOT_DEPTH: usize = 16;

/// Parse a full selector string into its alternatives.
///
/// # Errors
///
/// [`SelectorError::Syntax`] for anything outside the supported grammar,
/// [`SelectorError::DuplicateId`] when one compound carries two `#id`
/// parts, and [`SelectorError::TooDeep`] for pathological `:not` nesting.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    parse_at_depth(input, 0)
}

fn parse_at_depth(input: &str, depth: usize) -> Result<SelectorList, SelectorError> {
    Parser::new(input, depth).run()
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Between compounds; whitespace and combinators live here.
    #[strum(serialize = "between")]
    Between,
    #[strum(serialize = "tag")]
    TagName,
    #[strum(serialize = "class-start")]
    ClassStart,
    #[strum(serialize = "class")]
    ClassName,
    #[strum(serialize = "id-start")]
    IdStart,
    #[strum(serialize = "id")]
    IdName,
    #[strum(serialize = "attr-start")]
    AttrStart,
    #[strum(serialize = "attr-name")]
    AttrName,
    /// Saw `^`, `$`, or `*`; the next character must be `=`.
    #[strum(serialize = "attr-operator")]
    AttrOperator,
    #[strum(serialize = "attr-value-start")]
    AttrValueStart,
    #[strum(serialize = "attr-value-quoted")]
    AttrValueQuoted,
    /// Quoted value closed; only `]` may follow.
    #[strum(serialize = "attr-value-end")]
    AttrValueEnd,
    #[strum(serialize = "attr-value-bare")]
    AttrValueBare,
    #[strum(serialize = "pseudo-start")]
    PseudoStart,
    #[strum(serialize = "pseudo-name")]
    PseudoName,
    /// A compound part just closed with `]` or `)`; only whitespace,
    /// combinators, `,`, or a new `.`/`#`/`[`/`:` part may follow.
    #[strum(serialize = "after-compound")]
    AfterCompound,
}

/// What separates a compound from the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sep {
    Comb(Combinator),
    /// A `,` boundary between alternatives.
    Group,
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    i: usize,
    depth: usize,
    state: ParserState,
    compounds: Vec<(Option<Sep>, CompoundSelector)>,
    current: Option<CompoundSelector>,
    /// Separator for the next compound; `None` only before the first.
    pending: Option<Sep>,
    /// Whether `pending` came from an explicit `>`/`+`/`~`/`,` rather
    /// than bare whitespace. Tentative whitespace may be upgraded once;
    /// an explicit separator may not be followed by another.
    pending_explicit: bool,
    buffer: String,
    attr_name: String,
    attr_op: char,
    quote: char,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, depth: usize) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            i: 0,
            depth,
            state: ParserState::Between,
            compounds: Vec::new(),
            current: None,
            pending: None,
            pending_explicit: false,
            buffer: String::new(),
            attr_name: String::new(),
            attr_op: '\0',
            quote: '\0',
        }
    }

    fn err_syntax(&self) -> SelectorError {
        SelectorError::Syntax {
            selector: self.input.to_string(),
        }
    }

    fn run(mut self) -> Result<SelectorList, SelectorError> {
        while self.i < self.chars.len() {
            let ch = self.chars[self.i];
            match self.state {
                ParserState::Between => self.step_between(ch)?,
                ParserState::TagName => self.step_name(ch, ParserState::TagName)?,
                ParserState::ClassStart => self.step_part_start(ch, ParserState::ClassName)?,
                ParserState::ClassName => self.step_name(ch, ParserState::ClassName)?,
                ParserState::IdStart => self.step_part_start(ch, ParserState::IdName)?,
                ParserState::IdName => self.step_name(ch, ParserState::IdName)?,
                ParserState::AttrStart => self.step_attr_start(ch)?,
                ParserState::AttrName => self.step_attr_name(ch)?,
                ParserState::AttrOperator => self.step_attr_operator(ch)?,
                ParserState::AttrValueStart => self.step_attr_value_start(ch)?,
                ParserState::AttrValueQuoted => self.step_attr_value_quoted(ch),
                ParserState::AttrValueEnd => self.step_attr_value_end(ch)?,
                ParserState::AttrValueBare => self.step_attr_value_bare(ch)?,
                ParserState::PseudoStart => self.step_part_start(ch, ParserState::PseudoName)?,
                ParserState::PseudoName => self.step_pseudo_name(ch)?,
                ParserState::AfterCompound => self.step_after_compound(ch)?,
            }
        }
        self.finish_at_eof()?;
        self.build_list()
    }

    // ----- state steps -----

    fn step_between(&mut self, ch: char) -> Result<(), SelectorError> {
        match ch {
            c if c.is_whitespace() => {}
            '>' | '+' | '~' => self.upgrade_pending(Sep::Comb(combinator_for(ch)))?,
            ',' => self.upgrade_pending(Sep::Group)?,
            '*' => {
                self.current = Some(CompoundSelector::default());
                self.state = ParserState::AfterCompound;
            }
            '.' => self.open_part(ParserState::ClassStart),
            '#' => self.open_part(ParserState::IdStart),
            '[' => self.open_part(ParserState::AttrStart),
            ':' => self.open_part(ParserState::PseudoStart),
            c if is_ident_char(c) => {
                self.open_part(ParserState::TagName);
                self.buffer.push(c);
            }
            _ => return Err(self.err_syntax()),
        }
        self.i += 1;
        Ok(())
    }

    fn open_part(&mut self, state: ParserState) {
        self.current = Some(CompoundSelector::default());
        self.buffer.clear();
        self.state = state;
    }

    /// A whitespace separator may upgrade to exactly one explicit
    /// combinator or group boundary; everything else is a syntax error
    /// (leading combinators, `a > > b`, `a,,b`).
    fn upgrade_pending(&mut self, sep: Sep) -> Result<(), SelectorError> {
        if self.pending_explicit || !matches!(self.pending, Some(Sep::Comb(Combinator::Descendant)))
        {
            return Err(self.err_syntax());
        }
        self.pending = Some(sep);
        self.pending_explicit = true;
        Ok(())
    }

    /// First character of a `.class`, `#id`, or `:pseudo` part.
    fn step_part_start(&mut self, ch: char, next: ParserState) -> Result<(), SelectorError> {
        if is_ident_char(ch) {
            self.buffer.clear();
            self.buffer.push(ch);
            self.state = next;
            self.i += 1;
            return Ok(());
        }
        Err(self.err_syntax())
    }

    /// Accumulate a tag, class, or id name; any other character commits
    /// the name and is reconsidered in the after-compound state.
    fn step_name(&mut self, ch: char, state: ParserState) -> Result<(), SelectorError> {
        if is_ident_char(ch) {
            self.buffer.push(ch);
            self.i += 1;
            return Ok(());
        }
        self.commit_name(state)?;
        self.state = ParserState::AfterCompound;
        Ok(())
    }

    fn commit_name(&mut self, state: ParserState) -> Result<(), SelectorError> {
        let name = std::mem::take(&mut self.buffer);
        let compound = self.current.as_mut().ok_or_else(|| SelectorError::Syntax {
            selector: self.input.to_string(),
        })?;
        match state {
            ParserState::TagName => compound.tag = Some(name),
            ParserState::ClassName => compound.classes.push(name),
            ParserState::IdName => {
                if compound.id.is_some() {
                    return Err(SelectorError::DuplicateId {
                        selector: self.input.to_string(),
                    });
                }
                compound.id = Some(name);
            }
            _ => return Err(self.err_syntax()),
        }
        Ok(())
    }

    fn step_attr_start(&mut self, ch: char) -> Result<(), SelectorError> {
        if is_ident_char(ch) || ch == ':' {
            self.attr_name.clear();
            self.attr_name.push(ch);
            self.state = ParserState::AttrName;
            self.i += 1;
            return Ok(());
        }
        Err(self.err_syntax())
    }

    fn step_attr_name(&mut self, ch: char) -> Result<(), SelectorError> {
        match ch {
            c if is_ident_char(c) || c == ':' => self.attr_name.push(c),
            '=' => {
                self.attr_op = '=';
                self.buffer.clear();
                self.state = ParserState::AttrValueStart;
            }
            '^' | '$' | '*' => {
                self.attr_op = ch;
                self.state = ParserState::AttrOperator;
            }
            ']' => {
                self.attr_op = '\0';
                self.push_attribute()?;
                self.state = ParserState::AfterCompound;
            }
            _ => return Err(self.err_syntax()),
        }
        self.i += 1;
        Ok(())
    }

    fn step_attr_operator(&mut self, ch: char) -> Result<(), SelectorError> {
        if ch == '=' {
            self.buffer.clear();
            self.state = ParserState::AttrValueStart;
            self.i += 1;
            return Ok(());
        }
        Err(self.err_syntax())
    }

    fn step_attr_value_start(&mut self, ch: char) -> Result<(), SelectorError> {
        match ch {
            '"' | '\'' => {
                self.quote = ch;
                self.state = ParserState::AttrValueQuoted;
            }
            ']' => {
                self.push_attribute()?;
                self.state = ParserState::AfterCompound;
            }
            c if c.is_whitespace() => return Err(self.err_syntax()),
            c => {
                self.buffer.push(c);
                self.state = ParserState::AttrValueBare;
            }
        }
        self.i += 1;
        Ok(())
    }

    fn step_attr_value_quoted(&mut self, ch: char) {
        // Only the opening quote kind closes the value.
        if ch == self.quote {
            self.state = ParserState::AttrValueEnd;
        } else {
            self.buffer.push(ch);
        }
        self.i += 1;
    }

    fn step_attr_value_end(&mut self, ch: char) -> Result<(), SelectorError> {
        if ch == ']' {
            self.push_attribute()?;
            self.state = ParserState::AfterCompound;
            self.i += 1;
            return Ok(());
        }
        Err(self.err_syntax())
    }

    fn step_attr_value_bare(&mut self, ch: char) -> Result<(), SelectorError> {
        match ch {
            ']' => {
                self.push_attribute()?;
                self.state = ParserState::AfterCompound;
            }
            c if c.is_whitespace() => return Err(self.err_syntax()),
            c => self.buffer.push(c),
        }
        self.i += 1;
        Ok(())
    }

    fn push_attribute(&mut self) -> Result<(), SelectorError> {
        let name = std::mem::take(&mut self.attr_name);
        let value = std::mem::take(&mut self.buffer);
        let selector = match self.attr_op {
            '=' => AttributeSelector::Equals(name, value),
            '^' => AttributeSelector::Prefix(name, value),
            '$' => AttributeSelector::Suffix(name, value),
            '*' => AttributeSelector::Substring(name, value),
            _ => AttributeSelector::Exists(name),
        };
        self.attr_op = '\0';
        self.current
            .as_mut()
            .ok_or_else(|| SelectorError::Syntax {
                selector: self.input.to_string(),
            })?
            .attributes
            .push(selector);
        Ok(())
    }

    fn step_pseudo_name(&mut self, ch: char) -> Result<(), SelectorError> {
        if is_ident_char(ch) {
            self.buffer.push(ch);
            self.i += 1;
            return Ok(());
        }
        if ch == '(' {
            let name = std::mem::take(&mut self.buffer);
            let argument = self.capture_argument()?;
            self.apply_functional_pseudo(&name, &argument)?;
            self.state = ParserState::AfterCompound;
            return Ok(());
        }
        self.commit_simple_pseudo()?;
        self.state = ParserState::AfterCompound;
        Ok(())
    }

    /// Capture the argument of a functional pseudo-class, from the `(`
    /// the cursor sits on through its balancing `)`. Parentheses inside
    /// quoted attribute values do not count toward the balance.
    fn capture_argument(&mut self) -> Result<String, SelectorError> {
        self.i += 1;
        let mut argument = String::new();
        let mut open = 1_usize;
        let mut quote: Option<char> = None;
        while self.i < self.chars.len() {
            let ch = self.chars[self.i];
            self.i += 1;
            if let Some(q) = quote {
                if ch == q {
                    quote = None;
                }
                argument.push(ch);
                continue;
            }
            match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    argument.push(ch);
                }
                '(' => {
                    open += 1;
                    argument.push(ch);
                }
                ')' => {
                    open -= 1;
                    if open == 0 {
                        return Ok(argument);
                    }
                    argument.push(ch);
                }
                c => argument.push(c),
            }
        }
        Err(self.err_syntax())
    }

    fn apply_functional_pseudo(
        &mut self,
        name: &str,
        argument: &str,
    ) -> Result<(), SelectorError> {
        let pseudo = match name.to_ascii_lowercase().as_str() {
            "not" => {
                if self.depth + 1 > MAX_NOT_DEPTH {
                    return Err(SelectorError::TooDeep {
                        selector: self.input.to_string(),
                    });
                }
                let list = parse_at_depth(argument, self.depth + 1).map_err(|inner| match inner {
                    SelectorError::Syntax { .. } => self.err_syntax(),
                    SelectorError::DuplicateId { .. } => SelectorError::DuplicateId {
                        selector: self.input.to_string(),
                    },
                    SelectorError::TooDeep { .. } => SelectorError::TooDeep {
                        selector: self.input.to_string(),
                    },
                })?;
                PseudoClass::Not(list)
            }
            "nth-child" => PseudoClass::NthChild(self.parse_nth(argument)?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth(argument)?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth(argument)?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth(argument)?),
            other => {
                warn_once(
                    "selector",
                    &format!("unsupported pseudo-class `:{other}({argument})` never matches"),
                );
                PseudoClass::Unsupported(format!("{other}({argument})"))
            }
        };
        self.current
            .as_mut()
            .ok_or_else(|| SelectorError::Syntax {
                selector: self.input.to_string(),
            })?
            .pseudo_classes
            .push(pseudo);
        Ok(())
    }

    fn commit_simple_pseudo(&mut self) -> Result<(), SelectorError> {
        let name = std::mem::take(&mut self.buffer);
        let pseudo = match name.to_ascii_lowercase().as_str() {
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "empty" => PseudoClass::Empty,
            other => {
                warn_once(
                    "selector",
                    &format!("unsupported pseudo-class `:{other}` never matches"),
                );
                PseudoClass::Unsupported(other.to_string())
            }
        };
        self.current
            .as_mut()
            .ok_or_else(|| SelectorError::Syntax {
                selector: self.input.to_string(),
            })?
            .pseudo_classes
            .push(pseudo);
        Ok(())
    }

    fn step_after_compound(&mut self, ch: char) -> Result<(), SelectorError> {
        match ch {
            c if c.is_whitespace() => {
                self.finalize_compound()?;
                self.pending = Some(Sep::Comb(Combinator::Descendant));
                self.pending_explicit = false;
                self.state = ParserState::Between;
            }
            '>' | '+' | '~' => {
                self.finalize_compound()?;
                self.pending = Some(Sep::Comb(combinator_for(ch)));
                self.pending_explicit = true;
                self.state = ParserState::Between;
            }
            ',' => {
                self.finalize_compound()?;
                self.pending = Some(Sep::Group);
                self.pending_explicit = true;
                self.state = ParserState::Between;
            }
            '.' => {
                self.buffer.clear();
                self.state = ParserState::ClassStart;
            }
            '#' => {
                self.buffer.clear();
                self.state = ParserState::IdStart;
            }
            '[' => self.state = ParserState::AttrStart,
            ':' => {
                self.buffer.clear();
                self.state = ParserState::PseudoStart;
            }
            // A tag name can not resume after `]` or `)`.
            _ => return Err(self.err_syntax()),
        }
        self.i += 1;
        Ok(())
    }

    fn finalize_compound(&mut self) -> Result<(), SelectorError> {
        let compound = self.current.take().ok_or_else(|| SelectorError::Syntax {
            selector: self.input.to_string(),
        })?;
        self.compounds.push((self.pending.take(), compound));
        self.pending_explicit = false;
        Ok(())
    }

    fn finish_at_eof(&mut self) -> Result<(), SelectorError> {
        match self.state {
            ParserState::TagName | ParserState::ClassName | ParserState::IdName => {
                self.commit_name(self.state)?;
            }
            ParserState::PseudoName => self.commit_simple_pseudo()?,
            ParserState::Between | ParserState::AfterCompound => {}
            // Everything else means an unterminated `[`, quote, `.`, `#`,
            // or `:`.
            _ => return Err(self.err_syntax()),
        }
        if self.current.is_some() {
            self.finalize_compound()?;
        } else if self.pending_explicit {
            // A dangling `a >` or trailing `a,`.
            return Err(self.err_syntax());
        }
        // A trailing tentative-descendant separator from whitespace is
        // simply dropped.
        self.pending = None;
        if self.compounds.is_empty() {
            return Err(self.err_syntax());
        }
        Ok(())
    }

    // ----- nth parsing -----

    /// Parse the `an+b` microsyntax, plus the `odd` and `even` keywords.
    fn parse_nth(&self, text: &str) -> Result<NthForm, SelectorError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("odd") {
            return Ok(NthForm { a: 2, b: 1 });
        }
        if trimmed.eq_ignore_ascii_case("even") {
            return Ok(NthForm { a: 2, b: 0 });
        }
        let chars: Vec<char> = trimmed.chars().collect();
        let mut i = 0;
        let mut sign = 1_i32;
        if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            if chars[i] == '-' {
                sign = -1;
            }
            i += 1;
        }
        let digits_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let leading_digits = &chars[digits_start..i];
        if i < chars.len() && (chars[i] == 'n' || chars[i] == 'N') {
            i += 1;
            let a = if leading_digits.is_empty() {
                sign
            } else {
                sign * self.parse_digits(leading_digits)?
            };
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i == chars.len() {
                return Ok(NthForm { a, b: 0 });
            }
            let offset_sign = match chars[i] {
                '+' => 1,
                '-' => -1,
                _ => return Err(self.err_syntax()),
            };
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let offset_start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if offset_start == i || i != chars.len() {
                return Err(self.err_syntax());
            }
            let b = offset_sign * self.parse_digits(&chars[offset_start..i])?;
            return Ok(NthForm { a, b });
        }
        if leading_digits.is_empty() || i != chars.len() {
            return Err(self.err_syntax());
        }
        Ok(NthForm {
            a: 0,
            b: sign * self.parse_digits(leading_digits)?,
        })
    }

    fn parse_digits(&self, digits: &[char]) -> Result<i32, SelectorError> {
        digits
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| self.err_syntax())
    }

    // ----- assembly -----

    fn build_list(&mut self) -> Result<SelectorList, SelectorError> {
        let compounds = std::mem::take(&mut self.compounds);
        let mut alternatives = Vec::new();
        let mut chain: Vec<(Option<Sep>, CompoundSelector)> = Vec::new();
        for (sep, compound) in compounds {
            if matches!(sep, Some(Sep::Group)) && !chain.is_empty() {
                alternatives.push(self.build_complex(std::mem::take(&mut chain))?);
            }
            chain.push((sep, compound));
        }
        if chain.is_empty() {
            return Err(self.err_syntax());
        }
        alternatives.push(self.build_complex(chain)?);
        Ok(SelectorList { alternatives })
    }

    /// Turn one chain of `(separator, compound)` pairs into a complex
    /// selector: the last compound is the subject, the rest become
    /// right-to-left combinator steps.
    fn build_complex(
        &self,
        mut chain: Vec<(Option<Sep>, CompoundSelector)>,
    ) -> Result<ComplexSelector, SelectorError> {
        let (mut sep_right, subject) = chain.pop().ok_or_else(|| self.err_syntax())?;
        let mut combinators = Vec::new();
        while let Some((sep, compound)) = chain.pop() {
            match sep_right {
                Some(Sep::Comb(combinator)) => combinators.push((combinator, compound)),
                _ => return Err(self.err_syntax()),
            }
            sep_right = sep;
        }
        Ok(ComplexSelector {
            subject,
            combinators,
        })
    }
}

const fn combinator_for(ch: char) -> Combinator {
    match ch {
        '>' => Combinator::Child,
        '+' => Combinator::NextSibling,
        '~' => Combinator::SubsequentSibling,
        _ => Combinator::Descendant,
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}
