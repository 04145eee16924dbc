//! Owned, mutable element tree for one page.
//!
//! The engine consumes the page as a read source (marker attributes, ids,
//! classes) and a write sink (queryId write-back, lifecycle classes, one
//! appended style node). Markup is parsed with `roxmltree` and must therefore
//! be well-formed XHTML-style markup: every tag closed or self-closed, one
//! root element.

use crate::error::{ClassQueryError, ClassQueryResult};
use roxmltree::Node as XmlNode;

/// Synthetic root tag wrapped around the input so that fragments with leading
/// whitespace or processing noise still parse (single-root rule is enforced
/// after parsing).
const WRAPPER: &str = "__classquery_root__";

fn wrap(markup: &str) -> String {
    format!("<{0}>{1}</{0}>", WRAPPER, markup)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One element of the page tree. Attribute order is preserved as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set or replace an attribute, keeping its original position if present.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// The element's class list, in authored order.
    pub fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|c| c.split_whitespace().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Add a class unless already present.
    pub fn add_class(&mut self, class: &str) {
        let mut classes = self.classes();
        if classes.iter().any(|c| c == class) {
            return;
        }
        classes.push(class.to_string());
        self.set_attribute("class", &classes.join(" "));
    }

    /// Remove a class if present. An emptied class attribute is kept empty
    /// rather than dropped, so attribute positions stay stable.
    pub fn remove_class(&mut self, class: &str) {
        let classes: Vec<String> = self.classes().into_iter().filter(|c| c != class).collect();
        if self.has_attribute("class") {
            self.set_attribute("class", &classes.join(" "));
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    fn from_xml(node: XmlNode) -> Element {
        let mut element = Element::new(node.tag_name().name());
        for attr in node.attributes() {
            element
                .attributes
                .push((attr.name().to_string(), attr.value().to_string()));
        }
        for child in node.children() {
            if child.is_element() {
                element.children.push(Node::Element(Element::from_xml(child)));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    element.children.push(Node::Text(text.to_string()));
                }
            }
            // Comments and processing instructions are dropped.
        }
        element
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_html(out),
                Node::Text(t) => out.push_str(&escape_text(t)),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// A parsed page: exactly one root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse well-formed markup into an owned tree.
    pub fn parse(markup: &str) -> ClassQueryResult<Document> {
        let wrapped = wrap(markup);
        let doc = roxmltree::Document::parse(&wrapped)?;
        let root = doc.root_element();

        let mut elements = root.children().filter(|n| n.is_element());
        let first = elements.next().ok_or(ClassQueryError::EmptyDocument)?;
        if elements.next().is_some() {
            return Err(ClassQueryError::MultipleRootElements);
        }

        Ok(Document {
            root: Element::from_xml(first),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// The `<head>` element, if the page has one as a direct child of the root.
    pub fn head_mut(&mut self) -> Option<&mut Element> {
        self.root.children.iter_mut().find_map(|n| match n {
            Node::Element(e) if e.tag == "head" => Some(e),
            _ => None,
        })
    }

    /// Append a `<style>` element carrying `css` to the head, or to the root
    /// for headless fragments. `marker_attribute` tags the node as generated
    /// output so it can be found again when debugging.
    pub fn append_style(&mut self, css: &str, marker_attribute: &str) {
        let mut style = Element::new("style");
        style.set_attribute("type", "text/css");
        style.set_attribute(marker_attribute, "generated");
        style.children.push(Node::Text(css.to_string()));

        if let Some(head) = self.head_mut() {
            head.children.push(Node::Element(style));
            return;
        }
        self.root.children.push(Node::Element(style));
    }

    /// Re-serialize the (possibly mutated) tree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.root.write_html(&mut out);
        out
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
