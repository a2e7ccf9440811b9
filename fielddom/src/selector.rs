//! A small CSS-style selector engine.
//!
//! Supported: comma-separated lists of compound selectors (`tag`, `*`, `#id`,
//! `.class`, `[attr]`, `[attr=value]`) joined by descendant (whitespace) or
//! child (`>`) combinators. That is enough to address template slots like
//! `label > [role=label]` or to pick validity targets like `label, input`.

use crate::document::{Node, Tree};
use crate::error::SelectorError;
use crate::NodeId;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    /// Each part with the combinator linking it to the previous part.
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser {
            source: input,
            chars: input.chars().collect(),
            pos: 0,
        };

        let mut alternatives = Vec::new();
        loop {
            alternatives.push(parser.complex()?);
            match parser.peek() {
                Some(',') => parser.pos += 1,
                None => break,
                Some(c) => return Err(parser.unexpected(c)),
            }
        }

        Ok(Self {
            source: input.trim().to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, tree: &Tree, id: NodeId) -> bool {
        match tree.get(id) {
            Some(node) if !node.is_text() => {
                self.alternatives.iter().any(|c| c.matches(tree, id))
            }
            _ => false,
        }
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl Complex {
    fn matches(&self, tree: &Tree, id: NodeId) -> bool {
        self.match_at(tree, id, self.parts.len() - 1)
    }

    fn match_at(&self, tree: &Tree, id: NodeId, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        let Some(node) = tree.get(id) else {
            return false;
        };
        if !compound.matches(node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => node
                .parent
                .is_some_and(|parent| self.match_at(tree, parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = node.parent;
                while let Some(current) = ancestor {
                    if self.match_at(tree, current, index - 1) {
                        return true;
                    }
                    ancestor = tree.get(current).and_then(|n| n.parent);
                }
                false
            }
        }
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if self
            .id
            .as_ref()
            .is_some_and(|id| node.attribute("id") != Some(id.as_str()))
        {
            return false;
        }
        if !self
            .classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
        {
            return false;
        }
        self.attributes.iter().all(|(name, expected)| {
            let actual = if name == "class" {
                (!node.classes.is_empty()).then(|| node.classes.join(" "))
            } else {
                node.attribute(name).map(str::to_string)
            };
            match (expected, actual) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(expected), Some(actual)) => *expected == actual,
            }
        })
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            selector: self.source.to_string(),
            found,
            pos: self.pos,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn complex(&mut self) -> Result<Complex, SelectorError> {
        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;
        let mut dangling_child = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    if parts.is_empty() || dangling_child {
                        return Err(self.unexpected('>'));
                    }
                    combinator = Combinator::Child;
                    dangling_child = true;
                    self.pos += 1;
                }
                Some(c) => {
                    let compound = self.compound()?;
                    if compound.is_empty() && c != '*' {
                        return Err(self.unexpected(c));
                    }
                    parts.push((combinator, compound));
                    combinator = Combinator::Descendant;
                    dangling_child = false;
                }
            }
        }

        if dangling_child {
            return Err(self.unexpected('>'));
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Complex { parts })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                }
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.required_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self.required_ident()?;
                    compound.classes.push(class);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                Some(c) if c.is_alphanumeric() || c == '-' || c == '_' => {
                    if compound.tag.is_some() {
                        return Err(self.unexpected(c));
                    }
                    compound.tag = Some(self.ident().to_ascii_lowercase());
                }
                _ => break,
            }
        }

        Ok(compound)
    }

    fn required_ident(&mut self) -> Result<String, SelectorError> {
        let ident = self.ident();
        if ident.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::Empty,
            });
        }
        Ok(ident)
    }

    fn attribute(&mut self) -> Result<(String, Option<String>), SelectorError> {
        let source = self.source;
        let unterminated = move || SelectorError::UnterminatedAttribute(source.to_string());

        self.skip_whitespace();
        let name = self.required_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.pos += 1;
                        let start = self.pos;
                        while self.peek().is_some_and(|c| c != quote) {
                            self.pos += 1;
                        }
                        if self.peek().is_none() {
                            return Err(unterminated());
                        }
                        let value: String = self.chars[start..self.pos].iter().collect();
                        self.pos += 1;
                        value
                    }
                    _ => self.required_ident()?,
                };
                self.skip_whitespace();
                Some(value)
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(unterminated()),
        };

        if self.peek() != Some(']') {
            return Err(unterminated());
        }
        self.pos += 1;
        Ok((name, value))
    }
}
