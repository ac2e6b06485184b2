//! CSS selector subset.
//!
//! Grammar:
//!
//! ```text
//! list      := complex ( "," complex )*
//! complex   := compound ( ( " " | ">" ) compound )*
//! compound  := ( tag | "*" )? ( "#" ident | "." ident | attr )*
//! attr      := "[" ident ( ( "=" | "^=" | "$=" | "*=" | "~=" ) value )? "]"
//! ```
//!
//! Pseudo-classes and sibling combinators are rejected.

use std::fmt;

use thiserror::Error;

use super::{Document, Element, NodeId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid selector `{selector}`: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, PartialEq)]
struct Complex {
    /// Compounds left to right; the combinator relates each to the previous one.
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

#[derive(Debug, Clone, PartialEq)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
    Word(String),
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_list()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the element at `id` matches any alternative.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        doc.element(id).is_some()
            && self
                .alternatives
                .iter()
                .any(|c| c.matches_at(doc, id, c.parts.len() - 1))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Complex {
    fn matches_at(&self, doc: &Document, node: NodeId, idx: usize) -> bool {
        let (combinator, compound) = &self.parts[idx];
        let Some(el) = doc.element(node) else {
            return false;
        };
        if !compound.matches(el) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => doc
                .parent_element(node)
                .is_some_and(|p| self.matches_at(doc, p, idx - 1)),
            Combinator::Descendant => {
                let mut ancestor = doc.parent_element(node);
                while let Some(a) = ancestor {
                    if self.matches_at(doc, a, idx - 1) {
                        return true;
                    }
                    ancestor = doc.parent_element(a);
                }
                false
            }
        }
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag
            && tag != "*"
            && *tag != el.tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && el.id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|test| test.matches(el))
    }
}

impl AttrTest {
    fn matches(&self, el: &Element) -> bool {
        let Some(value) = el.attr(&self.name) else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(v) => value == v,
            // Empty operands never match for the substring operators
            AttrOp::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            AttrOp::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            AttrOp::Substring(v) => !v.is_empty() && value.contains(v.as_str()),
            AttrOp::Word(v) => value.split_ascii_whitespace().any(|w| w == v),
        }
    }
}

// ============================================================================
// parser
// ============================================================================

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> SelectorError {
        SelectorError {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip whitespace, returning whether any was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(mut self) -> Result<Selector, SelectorError> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_ws();
            alternatives.push(self.parse_complex()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            match self.peek() {
                None => break,
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            }
        }
        Ok(Selector {
            source: self.source.trim().to_string(),
            alternatives,
        })
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let mut parts = vec![(Combinator::Descendant, self.parse_compound()?)];
        loop {
            let had_ws = self.skip_ws();
            let combinator = if self.eat('>') {
                self.skip_ws();
                Combinator::Child
            } else if had_ws && self.peek().is_some_and(starts_compound) {
                Combinator::Descendant
            } else {
                break;
            };
            parts.push((combinator, self.parse_compound()?));
        }
        Ok(Complex { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.eat('*') {
            compound.tag = Some("*".into());
        } else if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attr()?);
                }
                Some(':') => return Err(self.error("pseudo-classes are not supported")),
                Some(c @ ('+' | '~')) => {
                    return Err(self.error(format!("combinator `{c}` is not supported")));
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected selector, found `{c}`")),
                None => self.error("expected selector"),
            });
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attr(&mut self) -> Result<AttrTest, SelectorError> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        if self.eat(']') {
            return Ok(AttrTest {
                name,
                op: AttrOp::Exists,
            });
        }

        let op: fn(String) -> AttrOp = match self.peek() {
            Some('=') => AttrOp::Equals,
            Some('^') => AttrOp::Prefix,
            Some('$') => AttrOp::Suffix,
            Some('*') => AttrOp::Substring,
            Some('~') => AttrOp::Word,
            _ => return Err(self.error("expected attribute operator or `]`")),
        };
        if !self.eat('=') {
            self.pos += 1;
            if !self.eat('=') {
                return Err(self.error("expected `=` in attribute operator"));
            }
        }

        self.skip_ws();
        let value = self.attr_value()?;
        self.skip_ws();
        if !self.eat(']') {
            return Err(self.error("unterminated attribute selector"));
        }

        Ok(AttrTest {
            name,
            op: op(value),
        })
    }

    fn attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.error("unterminated string"));
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                Ok(value)
            }
            _ => self.ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn starts_compound(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '*' | '#' | '.' | '[')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::parse(
            r##"<body>
  <nav id="site-nav" class="nav"><a class="nav__link is-active" href="#work">Work</a></nav>
  <main><div><section id="work"><h2 class="title">Work</h2></section></div><section>x</section></main>
  <div class="card__banner" data-banner="/b.jpg"></div>
</body>"##,
        )
        .unwrap()
    }

    fn count(doc: &Document, selector: &str) -> usize {
        doc.query_all(&Selector::parse(selector).unwrap()).len()
    }

    #[test]
    fn test_compound_selectors() {
        let doc = doc();
        assert_eq!(count(&doc, "a.nav__link"), 1);
        assert_eq!(count(&doc, ".nav__link.is-active"), 1);
        assert_eq!(count(&doc, "#site-nav"), 1);
        assert_eq!(count(&doc, "span.nav__link"), 0);
        assert_eq!(count(&doc, ".card__banner[data-banner]"), 1);
    }

    #[test]
    fn test_descendant_and_child() {
        let doc = doc();
        assert_eq!(count(&doc, "main section[id]"), 1);
        assert_eq!(count(&doc, "main section"), 2);
        assert_eq!(count(&doc, "main > section"), 1);
        assert_eq!(count(&doc, "main>div>section .title"), 1);
    }

    #[test]
    fn test_attribute_operators() {
        let doc = doc();
        assert_eq!(count(&doc, r##"a[href^="#"]"##), 1);
        assert_eq!(count(&doc, "a[href^='#w']"), 1);
        assert_eq!(count(&doc, "a[href$=work]"), 1);
        assert_eq!(count(&doc, "a[href*=or]"), 1);
        assert_eq!(count(&doc, "a[class~=is-active]"), 1);
        assert_eq!(count(&doc, "a[href=\"#work\"]"), 1);
        assert_eq!(count(&doc, "a[href^=\"\"]"), 0);
    }

    #[test]
    fn test_selector_list() {
        let doc = doc();
        assert_eq!(count(&doc, "#site-nav, .card__banner"), 2);
    }

    #[test]
    fn test_rejects_unsupported() {
        assert!(Selector::parse("a:hover").is_err());
        assert!(Selector::parse("h2 + p").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("a[href").is_err());
        assert!(Selector::parse(".a,").is_err());
        let err = Selector::parse("a:hover").unwrap_err();
        assert!(err.to_string().contains("pseudo-classes"));
    }
}
