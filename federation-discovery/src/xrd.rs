use crate::{Link, json, xml};
use federation_types::{Format, Result, Timestamp, WireConfig};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Namespace of every XRD element.
pub const XRD_NAMESPACE: &str = "http://docs.oasis-open.org/ns/xri/xrd-1.0";

/// An Extensible Resource Descriptor: metadata about one subject resource.
///
/// Aliases, properties and links keep their insertion order, and equality
/// is order-sensitive for all three. A property without a value is distinct
/// from one whose value is the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XrdDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<Timestamp>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", deserialize_with = "scalar_properties")]
    pub properties: IndexMap<String, Option<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl XrdDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property. Overwriting an existing key keeps its position.
    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        self.properties.insert(key.into(), value);
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Returns the first link with the given relation.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.rel.as_deref() == Some(rel))
    }

    pub fn links_with_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.rel.as_deref() == Some(rel))
    }

    // ================================================================
    // Codecs
    // ================================================================

    /// Reads a document in the given format.
    pub fn parse(input: &[u8], format: Format) -> Result<Self> {
        match format {
            Format::Xml => Self::from_xml(input),
            Format::Json => Self::from_json(input),
        }
    }

    /// Writes the document with the default layout.
    pub fn serialize(&self, format: Format) -> Result<Vec<u8>> {
        self.serialize_with(format, &WireConfig::default())
    }

    pub fn serialize_with(&self, format: Format, config: &WireConfig) -> Result<Vec<u8>> {
        let text = match format {
            Format::Xml => self.to_xml_with(config),
            Format::Json => self.to_json_with(config)?,
        };
        Ok(text.into_bytes())
    }

    pub fn from_xml(input: &[u8]) -> Result<Self> {
        xml::parse(input)
    }

    /// Writes the canonical XML document, declaration included.
    pub fn to_xml(&self) -> String {
        self.to_xml_with(&WireConfig::default())
    }

    pub fn to_xml_with(&self, config: &WireConfig) -> String {
        xml::to_element(self).to_document_string(config)
    }

    pub fn from_json(input: &[u8]) -> Result<Self> {
        json::parse(input)
    }

    /// Writes the pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with(&WireConfig::default())
    }

    pub fn to_json_with(&self, config: &WireConfig) -> Result<String> {
        Ok(config.write_json(self)?)
    }
}

impl PartialEq for XrdDocument {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.expires == other.expires
            && self.aliases == other.aliases
            && self.properties.iter().eq(other.properties.iter())
            && self.links == other.links
    }
}

impl Eq for XrdDocument {}

/// Property values are strings or `null`; other scalars keep their JSON text.
fn scalar_properties<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, JsonValue>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                JsonValue::Null => None,
                JsonValue::String(s) => Some(s),
                JsonValue::Bool(_) | JsonValue::Number(_) => Some(value.to_string()),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "property `{key}` must be a string or null"
                    )));
                }
            };
            Ok((key, value))
        })
        .collect()
}
