//! Declarative entity framework for federation messages.
//!
//! Defines the types every protocol message flows through:
//! - [`PropertySchema`] — an entity type's ordered, closed list of properties
//! - [`PropertyDefinition`] / [`PropertyKind`] — name, semantic type, default policy
//! - [`Entity`] — an immutable value validated against its schema
//! - [`SchemaRegistry`] — the frozen table of schemas, keyed by entity type
//! - [`EntityKind`] — the built-in protocol entities
//!
//! and the two wire codecs: [`xml`] (the canonical entity representation) and
//! [`json`]. [`parse`] and [`serialize`] are the format-dispatching entry
//! points used by transport and envelope layers.

pub mod entities;
mod entity;
pub mod json;
mod registry;
mod schema;
mod value;
pub mod xml;

pub use entities::{EntityKind, builtin, register_builtin};
pub use entity::Entity;
pub use federation_types::{Error, Format, Result, Timestamp, ValidationReason, WireConfig, XmlElement};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use schema::{PropertyDefinition, PropertyKind, PropertySchema};
pub use value::{PropertyInput, PropertyMap, Value};

/// Parses an entity in the given format, resolving its type through `registry`.
pub fn parse(registry: &SchemaRegistry, input: &[u8], format: Format) -> Result<Entity> {
    match format {
        Format::Xml => xml::parse_xml(registry, input),
        Format::Json => json::parse_json(registry, input),
    }
}

/// Serializes an entity with the default layout.
pub fn serialize(entity: &Entity, format: Format) -> Result<Vec<u8>> {
    serialize_with(entity, format, &WireConfig::default())
}

/// Serializes an entity with an explicit layout.
pub fn serialize_with(entity: &Entity, format: Format, config: &WireConfig) -> Result<Vec<u8>> {
    let text = match format {
        Format::Xml => xml::to_xml_string(entity, config),
        Format::Json => config.write_json(&json::to_json(entity))?,
    };
    Ok(text.into_bytes())
}

impl Entity {
    /// Builds the XML element tree for this entity.
    pub fn to_xml(&self) -> federation_types::XmlElement {
        xml::to_xml(self)
    }

    /// Builds the JSON envelope for this entity.
    pub fn to_json(&self) -> serde_json::Value {
        json::to_json(self)
    }
}
