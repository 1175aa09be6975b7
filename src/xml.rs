//! Owned XML document model
//!
//! A small element tree with owned child lists, parsed from and serialized
//! through `quick-xml` events. Queries are plain depth-first searches over
//! the owned tree; there is no parent back-linking and no shared state.
//!
//! This is the document model every managed descriptor (`config.xml`,
//! `themes.xml`, `colors.xml`, `strings.xml`, adaptive-icon XML) goes
//! through.

use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{PrepError, PrepResult};

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and owned children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value and keeping position
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(idx).1)
    }

    /// Ordered attribute pairs
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Concatenated direct text content
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Mutable direct child elements
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// First direct child with the given name, mutable
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == name)
    }

    /// All direct children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// First direct child matching name and an attribute value
    pub fn child_where(&self, name: &str, attr: &str, value: &str) -> Option<&Element> {
        self.elements()
            .find(|e| e.name == name && e.attr(attr) == Some(value))
    }

    /// Mutable variant of [`Element::child_where`]
    pub fn child_where_mut(&mut self, name: &str, attr: &str, value: &str) -> Option<&mut Element> {
        self.elements_mut()
            .find(|e| e.name == name && e.attr(attr) == Some(value))
    }

    /// First element matching the predicate in document order (depth-first)
    pub fn find<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
        if pred(self) {
            return Some(self);
        }
        self.elements().find_map(|e| e.find(pred))
    }

    /// Drop direct child elements matching the predicate
    pub fn retain_children(&mut self, pred: impl Fn(&Element) -> bool) {
        self.children.retain(|n| match n {
            Node::Element(e) => pred(e),
            Node::Text(_) => true,
        });
    }
}

/// Parse an XML document from a string into its root element
pub fn parse_str(xml: &str) -> PrepResult<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    quick_xml::Error::from(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "unbalanced end tag",
                    ))
                })?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let raw = text.unescape()?.into_owned();
                    if !raw.is_empty() {
                        current.children.push(Node::Text(raw));
                    }
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(data.as_ref()).into_owned();
                    current.children.push(Node::Text(raw));
                }
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
        buf.clear();
    }

    root.ok_or_else(|| {
        PrepError::Xml(quick_xml::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "document has no root element",
        )))
    })
}

/// Parse an XML document from a file
pub fn parse_file(path: &Path) -> PrepResult<Element> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

fn element_from_start(start: &BytesStart<'_>) -> PrepResult<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attrs.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Serialize a document with an XML declaration and four-space indent
pub fn serialize(root: &Element) -> PrepResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;
    let mut out = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    out.push('\n');
    Ok(out)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> PrepResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Serialize and write a document atomically
pub fn write_file(path: &Path, root: &Element) -> PrepResult<()> {
    let content = serialize(root)?;
    crate::sync::atomic_write(path, content.as_bytes())
}
