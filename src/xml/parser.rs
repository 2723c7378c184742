use super::{Attribute, Document, Node};
use crate::error::{XmlError, XmlErrorKind};

/// Nesting limit; level files use two levels.
pub const MAX_DEPTH: usize = 64;

pub(super) fn parse(src: &str) -> Result<Document, XmlError> {
    let mut p = Parser {
        src,
        pos: 0,
        depth: 0,
    };

    p.skip_ws();
    match p.peek() {
        None => return Err(p.error(XmlErrorKind::MissingRoot)),
        Some(b'<') => {}
        Some(_) => return Err(p.error(XmlErrorKind::TextOutsideRoot)),
    }
    if p.peek_at(1) == Some(b'/') {
        p.pos += 2;
        let name = p.name().to_owned();
        return Err(p.error(XmlErrorKind::UnexpectedClose(name)));
    }

    let root = p.element()?;

    p.skip_ws();
    match (p.peek(), p.peek_at(1)) {
        (None, _) => Ok(Document { root }),
        (Some(b'<'), Some(b'/')) => {
            p.pos += 2;
            let name = p.name().to_owned();
            Err(p.error(XmlErrorKind::UnexpectedClose(name)))
        }
        (Some(b'<'), _) => Err(p.error(XmlErrorKind::MultipleRoots)),
        (Some(_), _) => Err(p.error(XmlErrorKind::TextOutsideRoot)),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + ahead).copied()
    }

    fn error(&self, kind: XmlErrorKind) -> XmlError {
        XmlError {
            kind,
            offset: self.pos,
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: u8) -> Result<(), XmlError> {
        match self.peek() {
            Some(b) if b == want => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.error(XmlErrorKind::Expected(want as char))),
            None => Err(self.error(XmlErrorKind::UnterminatedTag)),
        }
    }

    /// Tag or attribute name. Stops at the first delimiter; may be empty.
    fn name(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || matches!(b, b'/' | b'>' | b'<' | b'=' | b'"') {
                break;
            }
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn element(&mut self) -> Result<Node, XmlError> {
        let src = self.src;
        let open_at = self.pos;
        self.expect(b'<')?;
        if self.depth >= MAX_DEPTH {
            return Err(self.error(XmlErrorKind::TooDeep(MAX_DEPTH)));
        }

        let tag = self.name();
        if tag.is_empty() {
            return Err(match self.peek() {
                None => self.error(XmlErrorKind::UnterminatedTag),
                _ => self.error(XmlErrorKind::EmptyTagName),
            });
        }
        let mut node = Node::new(tag);

        loop {
            self.skip_ws();
            match self.peek() {
                None => {
                    return Err(XmlError {
                        kind: XmlErrorKind::UnterminatedTag,
                        offset: open_at,
                    })
                }
                Some(b'/') => {
                    self.pos += 1;
                    self.expect(b'>')?;
                    return Ok(node);
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'=') | Some(b'"') => {
                    return Err(self.error(XmlErrorKind::MissingAttributeKey));
                }
                Some(b'<') => return Err(self.error(XmlErrorKind::Expected('>'))),
                Some(_) => {
                    let key_at = self.pos;
                    let attr = self.attribute()?;
                    if node.attribute(&attr.key).is_some() {
                        return Err(XmlError {
                            kind: XmlErrorKind::DuplicateAttribute(attr.key),
                            offset: key_at,
                        });
                    }
                    node.attributes.push(attr);
                }
            }
        }

        self.depth += 1;
        let mut lines: Vec<&str> = Vec::new();
        loop {
            let text_at = self.pos;
            while matches!(self.peek(), Some(b) if b != b'<') {
                self.pos += 1;
            }
            lines.extend(
                src[text_at..self.pos]
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty()),
            );

            match (self.peek(), self.peek_at(1)) {
                (None, _) => {
                    return Err(XmlError {
                        kind: XmlErrorKind::UnclosedElement(node.tag),
                        offset: open_at,
                    })
                }
                (Some(b'<'), Some(b'/')) => {
                    self.pos += 2;
                    let close_at = self.pos;
                    let found = self.name();
                    if found.is_empty() && self.peek().is_some() {
                        return Err(self.error(XmlErrorKind::EmptyTagName));
                    }
                    self.skip_ws();
                    self.expect(b'>')?;
                    if found != node.tag {
                        return Err(XmlError {
                            kind: XmlErrorKind::MismatchedTag {
                                expected: node.tag,
                                found: found.to_owned(),
                            },
                            offset: close_at,
                        });
                    }
                    break;
                }
                (Some(_), _) => {
                    let child = self.element()?;
                    node.children.push(child);
                }
            }
        }
        self.depth -= 1;

        if !lines.is_empty() {
            node.text = Some(lines.join("\n"));
        }
        Ok(node)
    }

    fn attribute(&mut self) -> Result<Attribute, XmlError> {
        let src = self.src;
        let key = self.name();
        if key.is_empty() {
            return Err(self.error(XmlErrorKind::MissingAttributeKey));
        }
        self.skip_ws();
        self.expect(b'=')?;
        self.skip_ws();
        self.expect(b'"')?;

        let value_at = self.pos;
        while matches!(self.peek(), Some(b) if b != b'"') {
            self.pos += 1;
        }
        if self.peek().is_none() {
            return Err(XmlError {
                kind: XmlErrorKind::UnterminatedValue,
                offset: value_at,
            });
        }
        let value = &src[value_at..self.pos];
        self.pos += 1;

        Ok(Attribute {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(src: &str) -> XmlErrorKind {
        parse(src).expect_err("should fail").kind
    }

    #[test]
    fn parses_attributes_text_and_children() {
        let doc = parse(
            r#"<level width="22" height="13">
                <tilemap>
                    1,0
                    0,1
                </tilemap>
                <spawn x="2" y = "3"/>
            </level>"#,
        )
        .expect("parse");

        assert_eq!(doc.root.tag, "level");
        assert_eq!(doc.root.attribute("height"), Some("13"));
        assert_eq!(doc.root.children.len(), 2);
        assert_eq!(doc.root.children[0].text.as_deref(), Some("1,0\n0,1"));
        assert_eq!(doc.root.children[1].attribute("y"), Some("3"));
        assert_eq!(doc.root.text, None);
    }

    #[test]
    fn self_closing_root_is_a_document() {
        let doc = parse("<level/>").expect("parse");
        assert!(doc.root.children.is_empty());
        assert_eq!(doc.root.text, None);
    }

    #[test]
    fn empty_attribute_values_survive() {
        let doc = parse(r#"<a name=""/>"#).expect("parse");
        assert_eq!(doc.root.attribute("name"), Some(""));
    }

    #[test]
    fn rejects_mismatched_closing_tag() {
        assert_eq!(
            kind("<level><tilemap>1</tile></level>"),
            XmlErrorKind::MismatchedTag {
                expected: "tilemap".into(),
                found: "tile".into()
            }
        );
    }

    #[test]
    fn rejects_missing_closing_tag() {
        assert_eq!(
            kind("<level><tilemap>1</tilemap>"),
            XmlErrorKind::UnclosedElement("level".into())
        );
    }

    #[test]
    fn rejects_attribute_without_key() {
        assert_eq!(kind(r#"<spawn ="3"/>"#), XmlErrorKind::MissingAttributeKey);
        assert_eq!(kind(r#"<spawn "3"/>"#), XmlErrorKind::MissingAttributeKey);
    }

    #[test]
    fn rejects_unterminated_tag() {
        assert_eq!(kind(r#"<level><spawn x="1""#), XmlErrorKind::UnterminatedTag);
        assert_eq!(kind(r#"<level><spawn x="1"#), XmlErrorKind::UnterminatedValue);
        assert_eq!(kind("<"), XmlErrorKind::UnterminatedTag);
    }

    #[test]
    fn rejects_duplicate_attribute() {
        assert_eq!(
            kind(r#"<spawn x="1" x="2"/>"#),
            XmlErrorKind::DuplicateAttribute("x".into())
        );
    }

    #[test]
    fn rejects_stray_content_around_root() {
        assert_eq!(kind(""), XmlErrorKind::MissingRoot);
        assert_eq!(kind("hello <a/>"), XmlErrorKind::TextOutsideRoot);
        assert_eq!(kind("<a/> tail"), XmlErrorKind::TextOutsideRoot);
        assert_eq!(kind("<a/><b/>"), XmlErrorKind::MultipleRoots);
        assert_eq!(kind("<a/></a>"), XmlErrorKind::UnexpectedClose("a".into()));
    }

    #[test]
    fn rejects_runaway_nesting() {
        let src = "<a>".repeat(MAX_DEPTH + 1);
        assert_eq!(kind(&src), XmlErrorKind::TooDeep(MAX_DEPTH));
    }

    #[test]
    fn error_reports_offset() {
        let err = parse("<level><tilemap></level>").expect_err("mismatch");
        assert_eq!(err.offset, "<level><tilemap></".len());
    }
}
