//! Markup templates.
//!
//! Turns a template string into a detached [`Element`] tree. The accepted
//! language is the small subset of HTML that field templates use: elements
//! with quoted, unquoted or bare attributes, text, comments, void elements
//! and `/>` self-closing syntax. Whitespace-only text between tags is dropped.

use crate::element::{is_void, Content, Element};
use crate::error::TemplateError;

/// Parse markup with exactly one root element.
pub fn parse(markup: &str) -> Result<Element, TemplateError> {
    let mut parser = Parser { src: markup, pos: 0 };
    let mut roots = parser.nodes(None)?;

    match roots.len() {
        0 => Err(TemplateError::Empty),
        1 => {
            let root = roots.remove(0);
            if root.is_text() {
                return Err(TemplateError::malformed(0, "root must be an element"));
            }
            Ok(root)
        }
        n => Err(TemplateError::MultipleRoots(n)),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '/' | '>' | '=' | '<'))
        {
            self.bump();
        }
        self.src[start..self.pos].to_ascii_lowercase()
    }

    /// Parse sibling nodes until the closing tag of `parent` (or the end of
    /// input at the top level).
    fn nodes(&mut self, parent: Option<&str>) -> Result<Vec<Element>, TemplateError> {
        let mut out = Vec::new();

        loop {
            if self.at_end() {
                return match parent {
                    Some(tag) => Err(TemplateError::Unclosed(tag.to_string())),
                    None => Ok(out),
                };
            }

            if self.rest().starts_with("<!--") {
                let end = self.rest()[4..]
                    .find("-->")
                    .ok_or_else(|| TemplateError::malformed(self.pos, "unterminated comment"))?;
                self.pos += 4 + end + 3;
            } else if self.rest().starts_with("</") {
                let close_pos = self.pos;
                self.pos += 2;
                let found = self.name();
                self.skip_whitespace();
                if self.peek() != Some('>') {
                    return Err(TemplateError::malformed(self.pos, "expected '>'"));
                }
                self.bump();

                return match parent {
                    Some(expected) if expected == found => Ok(out),
                    Some(expected) => Err(TemplateError::MismatchedClose {
                        expected: expected.to_string(),
                        found,
                        pos: close_pos,
                    }),
                    None => Err(TemplateError::malformed(
                        close_pos,
                        "closing tag without an open element",
                    )),
                };
            } else if self.peek() == Some('<') {
                out.push(self.element()?);
            } else {
                let start = self.pos;
                let end = self.rest().find('<').map_or(self.src.len(), |i| start + i);
                self.pos = end;
                let text = &self.src[start..end];
                if !text.trim().is_empty() {
                    out.push(Element::text(decode_entities(text)));
                }
            }
        }
    }

    fn element(&mut self) -> Result<Element, TemplateError> {
        let open_pos = self.pos;
        self.bump();
        let tag = self.name();
        if tag.is_empty() {
            return Err(TemplateError::malformed(open_pos, "expected a tag name"));
        }

        let mut element = Element::new(&tag);
        let self_closing = loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(TemplateError::Unclosed(tag)),
                Some('>') => {
                    self.bump();
                    break false;
                }
                Some('/') if self.rest().starts_with("/>") => {
                    self.pos += 2;
                    break true;
                }
                Some(_) => {
                    let (name, value) = self.attribute()?;
                    element = element.attr(name, value);
                }
            }
        };

        if self_closing || is_void(&tag) {
            return Ok(element);
        }

        let mut children = self.nodes(Some(&tag))?;
        element.content = match children.len() {
            0 => Content::None,
            1 if children[0].is_text() => Content::Text(children.remove(0).content.text()),
            _ => Content::Children(children),
        };
        Ok(element)
    }

    fn attribute(&mut self) -> Result<(String, String), TemplateError> {
        let name_pos = self.pos;
        let name = self.name();
        if name.is_empty() {
            return Err(TemplateError::malformed(name_pos, "expected an attribute name"));
        }

        self.skip_whitespace();
        if self.peek() != Some('=') {
            return Ok((name, String::new()));
        }
        self.bump();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let end = self
                    .rest()
                    .find(quote)
                    .ok_or_else(|| TemplateError::malformed(self.pos, "unterminated attribute value"))?;
                let raw = &self.src[self.pos..self.pos + end];
                self.pos += end + 1;
                decode_entities(raw)
            }
            Some(_) => {
                let start = self.pos;
                while self.peek().is_some_and(|c| !c.is_whitespace() && c != '>') {
                    self.bump();
                }
                decode_entities(&self.src[start..self.pos])
            }
            None => return Err(TemplateError::malformed(self.pos, "expected an attribute value")),
        };

        Ok((name, value))
    }
}

/// Decode the named and numeric character references templates use.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
