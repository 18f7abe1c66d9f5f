//! Owned XML tree shared by the XML codecs.
//!
//! Reading goes through `quick_xml`'s namespace-aware reader. The XML
//! declaration, comments, processing instructions and doctype are dropped;
//! everything else must be well-formed or parsing fails with
//! [`Error::MalformedInput`].
//!
//! Writing is done by hand so the layout is fully deterministic: one element
//! per line, children indented by [`WireConfig::indent`] spaces, leaf text
//! kept on the element's line.
//!
//! Mixed content is not modelled. An element's direct text is concatenated
//! into [`XmlElement::text`], and on output text is only written for
//! elements without children.

use crate::{Error, Result, WireConfig};
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// The declaration written in front of XML documents.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A single XML element with its attributes and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name, without prefix.
    pub name: String,
    /// Resolved namespace URI, if the element is in one.
    pub namespace: Option<String>,
    /// Attributes in document order, keyed by local name.
    /// Namespace declarations are not included.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Direct text content.
    ///
    /// `None` means the element had no content at all (`<a/>`); an explicit
    /// start/end pair yields `Some`, possibly empty (`<a></a>`).
    pub text: Option<String>,
}

impl XmlElement {
    /// Creates an empty element with no namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Returns the value of the attribute with the given local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over all children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the direct text with surrounding whitespace removed.
    pub fn text_trimmed(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim)
    }

    /// Returns true if the element has either text or children.
    pub fn has_content(&self) -> bool {
        self.text.is_some() || !self.children.is_empty()
    }

    // ================================================================
    // Parsing
    // ================================================================

    /// Parses a document from raw bytes, which must be UTF-8.
    pub fn parse_bytes(input: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(input).map_err(malformed)?;
        Self::parse(text)
    }

    /// Parses a document and returns its root element.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let mut reader = NsReader::from_str(input);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let (resolved, event) = reader.read_resolved_event().map_err(malformed)?;
            let namespace = match resolved {
                ResolveResult::Bound(Namespace(ns)) => {
                    Some(std::str::from_utf8(ns).map_err(malformed)?.to_string())
                }
                ResolveResult::Unbound => None,
                ResolveResult::Unknown(prefix) => {
                    return Err(Error::MalformedInput(format!(
                        "unknown namespace prefix `{}`",
                        String::from_utf8_lossy(&prefix)
                    )));
                }
            };

            match event {
                Event::Start(start) => {
                    let mut element = open_element(&start, namespace)?;
                    element.text = Some(String::new());
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = open_element(&start, namespace)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::MalformedInput("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(malformed)?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let text = std::str::from_utf8(&data).map_err(malformed)?;
                    append_text(&mut stack, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::MalformedInput(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| Error::MalformedInput("document has no root element".into()))
    }

    // ================================================================
    // Writing
    // ================================================================

    /// Writes this element as a standalone document, preceded by the XML
    /// declaration when the config asks for it.
    pub fn to_document_string(&self, config: &WireConfig) -> String {
        let mut out = String::new();
        if config.xml_declaration {
            out.push_str(XML_DECLARATION);
            out.push('\n');
        }
        self.write_into(&mut out, 0, config.indent, None);
        out
    }

    /// Writes this element without a declaration, for embedding in other
    /// documents.
    pub fn to_fragment_string(&self, config: &WireConfig) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0, config.indent, None);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize, indent: usize, parent_ns: Option<&str>) {
        let pad = " ".repeat(depth * indent);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.name);

        let namespace = self.namespace.as_deref();
        if namespace != parent_ns {
            out.push_str(" xmlns=\"");
            out.push_str(&escape_attribute(namespace.unwrap_or_default()));
            out.push('"');
        }
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        if self.children.is_empty() {
            match &self.text {
                None => out.push_str("/>\n"),
                Some(text) => {
                    out.push('>');
                    out.push_str(&escape_text(text));
                    out.push_str("</");
                    out.push_str(&self.name);
                    out.push_str(">\n");
                }
            }
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            child.write_into(out, depth + 1, indent, namespace);
        }
        out.push_str(&pad);
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

/// Conforming parsers fold `\r\n` to `\n` in text, so a literal `\r` is
/// written as a character reference.
fn escape_text(text: &str) -> String {
    partial_escape(text).replace('\r', "&#xD;")
}

/// Attribute-value normalization turns tabs and line breaks into spaces;
/// character references survive it.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\r', "&#xD;")
        .replace('\n', "&#xA;")
        .replace('\t', "&#x9;")
}

fn malformed(e: impl std::fmt::Display) -> Error {
    Error::MalformedInput(e.to_string())
}

fn open_element(start: &BytesStart<'_>, namespace: Option<String>) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(malformed)?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(malformed)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(malformed)?
            .to_string();
        let value = attr.unescape_value().map_err(malformed)?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        namespace,
        attributes,
        children: Vec::new(),
        text: None,
    })
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::MalformedInput("multiple root elements".into()));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::MalformedInput("text outside of the root element".into())),
    }
}
