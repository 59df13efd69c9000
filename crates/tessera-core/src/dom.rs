//! Element tree used as the rendering target for blocks.
//!
//! Blocks build [`Element`] values instead of writing markup directly, which
//! keeps decoration logic testable: tests can query the tree by class name
//! and only the final step serializes to HTML.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

/// A node in the element tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text content (escaped on output).
    Text(String),
}

/// An HTML element with classes, attributes and children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Build an element with a whitespace-separated class list.
///
/// # Example
///
/// ```
/// use tessera_core::dom::el;
///
/// let cta = el("a", "content-listing__cta button primary").attr("href", "/more");
/// assert!(cta.has_class("primary"));
/// assert_eq!(cta.to_html(), r#"<a class="content-listing__cta button primary" href="/more"></a>"#);
/// ```
pub fn el(tag: &str, class_name: &str) -> Element {
    Element::new(tag).class(class_name)
}

impl Element {
    /// Create an element with no classes, attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add one or more classes (whitespace-separated).
    pub fn class(mut self, class_name: &str) -> Self {
        self.add_class(class_name);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text node.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Add classes in place. Duplicates are ignored.
    pub fn add_class(&mut self, class_name: &str) {
        for name in class_name.split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
    }

    /// Remove a class in place.
    pub fn remove_class(&mut self, class_name: &str) {
        self.classes.retain(|c| c != class_name);
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Append a child element in place.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Remove all children, mirroring a container being cleared before
    /// re-rendering.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the element carries `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    /// Attribute value, if set.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// All descendants (depth-first, self included) carrying `class_name`.
    pub fn find_all(&self, class_name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_by_class(self, class_name, &mut found);
        found
    }

    /// First descendant (depth-first, self included) carrying `class_name`.
    pub fn find(&self, class_name: &str) -> Option<&Element> {
        self.find_all(class_name).into_iter().next()
    }

    /// Mutable access to the first descendant carrying `class_name`.
    pub fn find_mut(&mut self, class_name: &str) -> Option<&mut Element> {
        if self.has_class(class_name) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|n| match n {
            Node::Element(e) => e.find_mut(class_name),
            Node::Text(_) => None,
        })
    }

    /// Serialize to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Element(e) => collect_text(e, out),
            Node::Text(t) => out.push_str(t),
        }
    }
}

fn collect_by_class<'a>(element: &'a Element, class_name: &str, found: &mut Vec<&'a Element>) {
    if element.has_class(class_name) {
        found.push(element);
    }
    for child in element.child_elements() {
        collect_by_class(child, class_name, found);
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    if !element.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_html(&element.classes.join(" ")));
    }
    for (name, value) in &element.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    for child in &element.children {
        match child {
            Node::Element(e) => write_element(e, out),
            Node::Text(t) => out.push_str(&escape_html(t)),
        }
    }

    let _ = write!(out, "</{}>", element.tag);
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_el_classes_split() {
        let e = el("div", "a  b");
        assert_eq!(e.classes(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_add_remove_class() {
        let mut e = el("button", "content-listing__filter");
        e.add_class("content-listing__filter--active");
        e.add_class("content-listing__filter--active");
        assert_eq!(e.classes().len(), 2);
        e.remove_class("content-listing__filter--active");
        assert!(!e.has_class("content-listing__filter--active"));
    }

    #[test]
    fn test_set_attr_replaces() {
        let e = Element::new("a").attr("href", "#").attr("href", "/x");
        assert_eq!(e.get_attr("href"), Some("/x"));
    }

    #[test]
    fn test_to_html_escapes() {
        let e = el("p", "summary")
            .attr("title", "say \"hi\"")
            .text("Fish & <Chips>");
        assert_eq!(
            e.to_html(),
            r#"<p class="summary" title="say &quot;hi&quot;">Fish &amp; &lt;Chips&gt;</p>"#
        );
    }

    #[test]
    fn test_void_element() {
        let img = el("img", "pic").attr("src", "/a.png");
        assert_eq!(img.to_html(), r#"<img class="pic" src="/a.png">"#);
    }

    #[test]
    fn test_find_all_and_text() {
        let tree = el("div", "root")
            .child(el("span", "tag").text("Beach"))
            .child(el("div", "inner").child(el("span", "tag").text("Surf")));
        let tags = tree.find_all("tag");
        assert_eq!(tags.len(), 2);
        assert_eq!(tree.text_content(), "BeachSurf");
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_find_mut_and_clear() {
        let mut tree = el("div", "root").child(el("div", "host").child(el("p", "x")));
        let host = tree.find_mut("host").unwrap();
        host.clear();
        host.push(el("p", "y"));
        assert!(tree.find("x").is_none());
        assert!(tree.find("y").is_some());
    }
}
