//! Minimal XML-like document tree used by the level files.
//!
//! Supported subset: `<tag key="value" ...>text or children</tag>` and
//! self-closing `<tag .../>`. There are no namespaces, comments, CDATA
//! sections or character escapes, so attribute values may not contain `"`
//! and text may not contain `<`.

mod parser;
mod writer;

use crate::error::{LevelError, XmlError};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use parser::MAX_DEPTH;

/// A `key="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name before `=`.
    pub key: String,
    /// Unquoted value; may be empty.
    pub value: String,
}

/// One element. Children are owned outright; there are no parent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Element name.
    pub tag: String,
    attributes: Vec<Attribute>,
    /// Trimmed text content, if any.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Element with no attributes, text or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder form of setting `text`.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder form of [`Node::set_attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set `key`, replacing an earlier value so keys stay unique.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { key, value }),
        }
    }

    /// Value of `key`, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Append a child element.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// First node tagged `tag` in document order, `self` included.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|n| n.tag == tag)
    }

    /// Every node tagged `tag` in document order, `self` included.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.descendants().filter(move |n| n.tag == tag)
    }

    /// Pre-order walk over this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed or built document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Top-level element.
    pub root: Node,
}

impl Document {
    /// Document holding an empty root.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Document {
            root: Node::new(root_tag),
        }
    }

    /// Parse `src`; nothing is returned unless the whole input is valid.
    pub fn parse(src: &str) -> Result<Self, XmlError> {
        parser::parse(src)
    }

    /// Render with `indent` spaces per nesting level.
    pub fn to_string_indented(&self, indent: usize) -> String {
        writer::write_document(self, indent)
    }

    /// Read and parse a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&txt).map_err(|source| LevelError::Xml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the document to `path` with `indent` spaces per level.
    pub fn save(&self, path: impl AsRef<Path>, indent: usize) -> Result<(), LevelError> {
        let path = path.as_ref();
        fs::write(path, self.to_string_indented(indent)).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromStr for Document {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new("level");
        doc.root.set_attribute("width", 22);
        doc.root.push(Node::new("tilemap").with_text("1,0\n0,1"));
        doc.root.push(Node::new("spawn").with_attribute("x", 2).with_attribute("y", 3));
        let mut group = Node::new("group");
        group.push(Node::new("spawn").with_attribute("x", 9).with_attribute("y", 1));
        doc.root.push(group);
        doc
    }

    #[test]
    fn set_attribute_keeps_keys_unique() {
        let mut node = Node::new("spawn");
        node.set_attribute("x", 1);
        node.set_attribute("x", 4);
        assert_eq!(node.attributes().len(), 1);
        assert_eq!(node.attribute("x"), Some("4"));
        assert_eq!(node.attribute("y"), None);
    }

    #[test]
    fn find_searches_nested_children() {
        let doc = sample();
        assert_eq!(doc.root.find("tilemap").and_then(|n| n.text.as_deref()), Some("1,0\n0,1"));
        assert!(doc.root.find("level").is_some());
        assert!(doc.root.find("missing").is_none());
    }

    #[test]
    fn find_all_walks_in_document_order() {
        let doc = sample();
        let xs: Vec<_> = doc
            .root
            .find_all("spawn")
            .filter_map(|n| n.attribute("x"))
            .collect();
        assert_eq!(xs, vec!["2", "9"]);
    }

    #[test]
    fn written_document_parses_back() {
        let doc = sample();
        for indent in [0, 2, 4] {
            let txt = doc.to_string_indented(indent);
            assert_eq!(Document::parse(&txt).expect("reparse"), doc);
        }
    }
}
