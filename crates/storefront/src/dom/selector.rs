//! Compound selectors: an optional tag followed by `.class` and
//! `[attr]` / `[attr=value]` parts, e.g. `button[type=submit]` or
//! `.card__title`. Combinators are not supported.

use super::{DomError, Element};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Class(String),
    Attribute { name: String, value: Option<String> },
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    parts: Vec<Part>,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] for empty input, combinators,
    /// or malformed class/attribute parts.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = |reason: &str| DomError::InvalidSelector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let s = input.trim();
        if s.is_empty() {
            return Err(invalid("empty selector"));
        }

        let tag_len = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
        let (tag, mut rest) = s.split_at(tag_len);
        let tag = (!tag.is_empty()).then(|| tag.to_ascii_lowercase());

        let mut parts = Vec::new();
        while let Some(first) = rest.chars().next() {
            match first {
                '.' => {
                    let body = &rest[1..];
                    let len = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
                    if len == 0 {
                        return Err(invalid("empty class name"));
                    }
                    parts.push(Part::Class(body[..len].to_string()));
                    rest = &body[len..];
                }
                '[' => {
                    let end = rest.find(']').ok_or_else(|| invalid("unclosed ["))?;
                    let inner = &rest[1..end];
                    let (name, value) = match inner.split_once('=') {
                        Some((n, v)) => (n.trim(), Some(v.trim().trim_matches(&['"', '\''][..]))),
                        None => (inner.trim(), None),
                    };
                    if name.is_empty() || !name.chars().all(is_ident_char) {
                        return Err(invalid("bad attribute name"));
                    }
                    parts.push(Part::Attribute {
                        name: name.to_string(),
                        value: value.map(str::to_string),
                    });
                    rest = &rest[end + 1..];
                }
                _ => return Err(invalid("combinators are not supported")),
            }
        }

        Ok(Self { tag, parts })
    }

    /// Whether `element` matches every part.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && element.tag() != tag
        {
            return false;
        }
        self.parts.iter().all(|part| match part {
            Part::Class(class) => element.has_class(class),
            Part::Attribute { name, value } => match (element.attribute(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        })
    }
}
