//! XRD XML codec.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
//!   <Expires>2010-01-30T09:30:00Z</Expires>
//!   <Subject>http://blog.example.com/article/id/314</Subject>
//!   <Alias>http://blog.example.com/cool_new_thing</Alias>
//!   <Property type="http://blgx.example.net/ns/version">1.3</Property>
//!   <Property type="http://blgx.example.net/ns/ext"/>
//!   <Link rel="author" type="text/html" href="http://blog.example.com/author/steve"/>
//! </XRD>
//! ```

use crate::{Link, XRD_NAMESPACE, XrdDocument};
use federation_types::{Error, Result, Timestamp, XmlElement};
use tracing::debug;

/// Builds the element tree of a document, children in canonical order.
pub fn to_element(doc: &XrdDocument) -> XmlElement {
    let mut root = xrd_element("XRD");

    if let Some(expires) = &doc.expires {
        root.push_child(xrd_element("Expires").with_text(expires.to_string()));
    }
    if let Some(subject) = &doc.subject {
        root.push_child(xrd_element("Subject").with_text(subject.clone()));
    }
    for alias in &doc.aliases {
        root.push_child(xrd_element("Alias").with_text(alias.clone()));
    }
    for (key, value) in &doc.properties {
        let mut property = xrd_element("Property").with_attribute("type", key.clone());
        property.text = value.clone();
        root.push_child(property);
    }
    for link in &doc.links {
        let element = link
            .attributes()
            .fold(xrd_element("Link"), |element, (name, value)| element.with_attribute(name, value));
        root.push_child(element);
    }
    root
}

fn xrd_element(name: &str) -> XmlElement {
    XmlElement::new(name).with_namespace(XRD_NAMESPACE)
}

/// Parses XRD bytes. Every failure is reported as [`Error::InvalidDocument`].
pub fn parse(input: &[u8]) -> Result<XrdDocument> {
    let root = XmlElement::parse_bytes(input).map_err(|e| Error::InvalidDocument(e.to_string()))?;
    from_element(&root)
}

/// Reads a document out of a parsed `<XRD>` root.
pub fn from_element(root: &XmlElement) -> Result<XrdDocument> {
    if root.name != "XRD" || !in_xrd_namespace(root) {
        return Err(Error::InvalidDocument(format!("<{}> is not an XRD document", root.name)));
    }

    let mut doc = XrdDocument::new();
    let mut expires_seen = false;

    for child in &root.children {
        if !in_xrd_namespace(child) {
            debug!(element = %child.name, "Ignoring element outside the XRD namespace");
            continue;
        }
        match child.name.as_str() {
            "Expires" => {
                if expires_seen {
                    return Err(Error::InvalidDocument("multiple Expires elements".into()));
                }
                expires_seen = true;
                let text = child.text_trimmed().unwrap_or_default();
                let expires = Timestamp::parse(text).map_err(|e| Error::InvalidDocument(e.to_string()))?;
                doc.expires = Some(expires);
            }
            "Subject" => {
                if doc.subject.is_none() {
                    doc.subject = Some(child.text.clone().unwrap_or_default());
                }
            }
            "Alias" => doc.add_alias(child.text.clone().unwrap_or_default()),
            "Property" => match child.attribute("type") {
                Some(key) => doc.set_property(key, property_value(child)),
                None => debug!("Skipping Property without a type attribute"),
            },
            "Link" => doc.add_link(read_link(child)),
            other => debug!(element = %other, "Ignoring unknown XRD element"),
        }
    }
    Ok(doc)
}

fn in_xrd_namespace(element: &XmlElement) -> bool {
    element.namespace.as_deref() == Some(XRD_NAMESPACE)
}

/// A property with no content at all has no value; anything else, even an
/// explicit empty pair, is a string.
fn property_value(element: &XmlElement) -> Option<String> {
    if !element.has_content() {
        return None;
    }
    Some(element.text.clone().unwrap_or_default())
}

fn read_link(element: &XmlElement) -> Link {
    let attr = |name: &str| element.attribute(name).map(str::to_string);
    Link {
        rel: attr("rel"),
        link_type: attr("type"),
        href: attr("href"),
        template: attr("template"),
    }
}
