//! In-memory element tree used in place of a live DOM.
//!
//! Components build and repair [`Element`] trees and serialize them with
//! [`Element::to_html`]. Hand-authored or server-rendered markup is read with
//! [`parse_fragment`], which is lenient in the way browsers are: `<li>` closes
//! an open `<li>`, stray end tags are ignored, and unclosed elements are
//! closed at the end of input.
//!
//! ```rust
//! use minutes_widgets::markup::{parse_fragment, Element, Node};
//!
//! let list = Element::new("ul")
//!     .with_child(Element::new("li").with_text("Alice"))
//!     .with_child(Element::new("li").with_text("Bob"));
//! assert_eq!(list.to_html(), "<ul><li>Alice</li><li>Bob</li></ul>");
//!
//! let nodes = parse_fragment("<ul><li>Alice<li>Bob</ul>").unwrap();
//! assert_eq!(nodes, vec![Node::Element(list)]);
//! ```

mod parser;
mod render;

pub use parser::{parse_element, parse_fragment};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for markup parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors produced while reading markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A tag, comment or declaration was opened but never closed.
    #[error("unterminated markup at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening `<`.
        offset: usize,
    },

    /// The markup contains no element with the expected tag.
    #[error("no <{0}> element in markup")]
    MissingElement(String),
}

/// A node in the tree: an element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Text content.
    Text(String),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Mutable variant of [`Node::as_element`].
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Reports whether this node is an element with the given tag.
    pub fn is_element(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.tag == tag)
    }

    /// Reports whether this node is text made only of whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// An element: lowercase tag name, ordered attributes, child nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name, always ASCII-lowercase.
    pub tag: String,
    /// Attributes in insertion order. Boolean attributes have an empty value.
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`Element::push`].
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Returns an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Reports whether an attribute is present, whatever its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Sets an attribute. An existing attribute keeps its position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Removes an attribute, returning its old value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Appends a child node.
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Iterates over child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Mutable variant of [`Element::child_elements`].
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// Index into `children` of the first child element with `tag`.
    pub fn child_position(&self, tag: &str) -> Option<usize> {
        self.children.iter().position(|n| n.is_element(tag))
    }

    /// First child element with `tag`.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.tag == tag)
    }

    /// Mutable variant of [`Element::child`].
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.child_elements_mut().find(|el| el.tag == tag)
    }

    /// Depth-first search of this element and its descendants.
    pub fn find<P>(&self, pred: &P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|el| el.find(pred))
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut<P>(&mut self, pred: &P) -> Option<&mut Element>
    where
        P: Fn(&Element) -> bool,
    {
        if pred(self) {
            return Some(self);
        }
        self.child_elements_mut().find_map(|el| el.find_mut(pred))
    }

    /// Finds an element by its `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|el: &Element| el.attr("id") == Some(id))
    }

    /// Detaches the first descendant matching `pred`, depth-first, and
    /// returns it. `self` is not considered.
    pub fn take_descendant<P>(&mut self, pred: &P) -> Option<Element>
    where
        P: Fn(&Element) -> bool,
    {
        for pos in 0..self.children.len() {
            let hit = match &mut self.children[pos] {
                Node::Element(el) if pred(el) => true,
                Node::Element(el) => {
                    if let Some(found) = el.take_descendant(pred) {
                        return Some(found);
                    }
                    false
                }
                Node::Text(_) => false,
            };
            if hit {
                if let Node::Element(el) = self.children.remove(pos) {
                    return Some(el);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_position() {
        let mut el = Element::new("input")
            .with_attr("id", "a")
            .with_attr("type", "text");
        el.set_attr("id", "b");
        let names: Vec<_> = el.attributes.keys().cloned().collect();
        assert_eq!(names, vec!["id", "type"]);
        assert_eq!(el.attr("id"), Some("b"));
    }

    #[test]
    fn test_tag_is_lowercased() {
        assert_eq!(Element::new("LI").tag, "li");
    }

    #[test]
    fn test_text_content_is_recursive() {
        let el = Element::new("p")
            .with_child("The ")
            .with_child(Element::new("b").with_text("big"))
            .with_child(" one");
        assert_eq!(el.text_content(), "The big one");
    }

    #[test]
    fn test_find_by_id_searches_descendants() {
        let el = Element::new("div").with_child(
            Element::new("ul").with_child(Element::new("li").with_attr("id", "x").with_text("hi")),
        );
        assert_eq!(el.find_by_id("x").map(Element::text_content), Some("hi".into()));
        assert!(el.find_by_id("y").is_none());
    }

    #[test]
    fn test_take_descendant_detaches_first_match() {
        let mut el = Element::new("li")
            .with_child(Element::new("span").with_child(Element::new("input").with_attr("value", "a")))
            .with_child(Element::new("input").with_attr("value", "b"));
        let taken = el.take_descendant(&|e: &Element| e.tag == "input").unwrap();
        assert_eq!(taken.attr("value"), Some("a"));
        assert!(el.child("span").unwrap().children.is_empty());
        assert_eq!(el.child("input").unwrap().attr("value"), Some("b"));
        assert!(Element::new("p")
            .take_descendant(&|e: &Element| e.tag == "input")
            .is_none());
    }

    #[test]
    fn test_node_serde_shape() {
        let node = Node::from(Element::new("li").with_text("Alice"));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"element":{"tag":"li","attributes":{},"children":[{"text":"Alice"}]}}"#
        );
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
