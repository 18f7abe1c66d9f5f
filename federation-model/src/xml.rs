//! XML representation of entities.
//!
//! An entity is one element named after its entity type, holding one child
//! element per schema property in declaration order:
//!
//! ```xml
//! <status_message>
//!   <author>alice@example.org</author>
//!   <public>true</public>
//!   <location>
//!     <address>Vienna</address>
//!     ...
//!   </location>
//!   <photos>
//!     <photo>...</photo>
//!   </photos>
//! </status_message>
//! ```
//!
//! Parsing is a purely syntactic transform into a [`PropertyMap`]; schema
//! validation happens in [`Entity::construct`].

use crate::{Entity, PropertyDefinition, PropertyInput, PropertyKind, PropertyMap, PropertySchema, SchemaRegistry, Value};
use federation_types::{Error, Result, WireConfig, XmlElement};
use std::sync::Arc;
use tracing::debug;

/// Builds the element tree for an entity.
pub fn to_xml(entity: &Entity) -> XmlElement {
    let mut root = XmlElement::new(entity.entity_type());
    append_properties(&mut root, entity);
    root
}

/// Writes an entity as an XML fragment (no declaration).
pub fn to_xml_string(entity: &Entity, config: &WireConfig) -> String {
    to_xml(entity).to_fragment_string(config)
}

fn append_properties(parent: &mut XmlElement, entity: &Entity) {
    for (def, value) in entity.iter() {
        parent.push_child(property_element(&def.name, value));
    }
}

fn property_element(name: &str, value: Option<&Value>) -> XmlElement {
    let mut element = XmlElement::new(name);
    match value {
        None => {}
        Some(Value::String(s)) => element.text = Some(s.clone()),
        Some(Value::Integer(i)) => element.text = Some(i.to_string()),
        Some(Value::Boolean(b)) => element.text = Some(b.to_string()),
        Some(Value::Timestamp(ts)) => element.text = Some(ts.to_string()),
        Some(Value::Entity(nested)) => append_properties(&mut element, nested),
        Some(Value::EntityList(items)) => {
            for item in items {
                element.push_child(to_xml(item));
            }
        }
    }
    element
}

/// Reads the properties of `schema` out of `element`.
///
/// For each property the first child with a matching name (or legacy alias)
/// is used. Absent properties stay unset so construction can apply defaults
/// or report them missing. Unknown children are ignored.
pub fn from_xml(schema: &PropertySchema, element: &XmlElement) -> PropertyMap {
    let mut properties = PropertyMap::new();
    for def in schema.properties() {
        let Some(child) = element.children.iter().find(|c| def.matches_element(&c.name)) else {
            continue;
        };
        if let Some(input) = property_input(def, child) {
            properties.insert(def.name.clone(), input);
        }
    }

    for child in &element.children {
        if !schema.properties().iter().any(|def| def.matches_element(&child.name)) {
            debug!(entity_type = schema.entity_type(), element = %child.name, "Ignoring unknown element");
        }
    }
    properties
}

fn property_input(def: &PropertyDefinition, child: &XmlElement) -> Option<PropertyInput> {
    match &def.kind {
        PropertyKind::Entity(nested) => {
            if child.children.is_empty() {
                None
            } else {
                Some(PropertyInput::Entity(from_xml(nested, child)))
            }
        }
        PropertyKind::EntityList(nested) => Some(PropertyInput::EntityList(
            child
                .children_named(nested.entity_type())
                .map(|item| from_xml(nested, item))
                .collect(),
        )),
        PropertyKind::String => child
            .text_trimmed()
            .map(|text| PropertyInput::Text(text.to_string())),
        PropertyKind::Integer | PropertyKind::Boolean | PropertyKind::Timestamp => child
            .text_trimmed()
            .filter(|text| !text.is_empty())
            .map(|text| PropertyInput::Text(text.to_string())),
    }
}

/// Parses an entity whose type is given by the root element name.
///
/// Input that is not well-formed fails with [`Error::MalformedInput`]; a
/// root element no schema is registered for fails with
/// [`Error::InvalidDocument`].
pub fn parse_xml(registry: &SchemaRegistry, input: &[u8]) -> Result<Entity> {
    let root = XmlElement::parse_bytes(input)?;
    let schema = registry.get(&root.name).ok_or_else(|| {
        Error::InvalidDocument(format!("no entity type registered for <{}>", root.name))
    })?;
    Entity::construct(schema, from_xml(schema, &root))
}

/// Parses an entity that must be of `schema`'s type.
pub fn parse_xml_as(schema: &Arc<PropertySchema>, input: &[u8]) -> Result<Entity> {
    let root = XmlElement::parse_bytes(input)?;
    if root.name != schema.entity_type() {
        return Err(Error::InvalidDocument(format!(
            "expected <{}>, found <{}>",
            schema.entity_type(),
            root.name
        )));
    }
    Entity::construct(schema, from_xml(schema, &root))
}
