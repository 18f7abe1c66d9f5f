//! JSON representation of entities.
//!
//! Every entity, nested ones included, is wrapped in an envelope naming its
//! type:
//!
//! ```json
//! {
//!   "entity_type": "poll",
//!   "entity_data": {
//!     "guid": "...",
//!     "question": "...",
//!     "poll_answers": [
//!       { "entity_type": "poll_answer", "entity_data": { ... } }
//!     ]
//!   }
//! }
//! ```
//!
//! Absent values are omitted, and `null` reads as absent.

use crate::{Entity, PropertyInput, PropertyKind, PropertyMap, PropertySchema, SchemaRegistry, Value};
use federation_types::{Error, Result, ValidationReason};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

const ENTITY_TYPE: &str = "entity_type";
const ENTITY_DATA: &str = "entity_data";

/// Builds the JSON envelope for an entity.
pub fn to_json(entity: &Entity) -> JsonValue {
    let mut data = Map::new();
    for (def, value) in entity.iter() {
        if let Some(value) = value {
            data.insert(def.name.clone(), value_to_json(value));
        }
    }

    let mut envelope = Map::new();
    envelope.insert(ENTITY_TYPE.into(), JsonValue::String(entity.entity_type().to_string()));
    envelope.insert(ENTITY_DATA.into(), JsonValue::Object(data));
    JsonValue::Object(envelope)
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Integer(i) => JsonValue::from(*i),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Timestamp(ts) => JsonValue::String(ts.to_string()),
        Value::Entity(nested) => to_json(nested),
        Value::EntityList(items) => JsonValue::Array(items.iter().map(to_json).collect()),
    }
}

/// Reads an entity from its JSON envelope, dispatching on `entity_type`.
pub fn from_json(registry: &SchemaRegistry, value: &JsonValue) -> Result<Entity> {
    let (entity_type, data) = envelope(value)?;
    let schema = registry.get(entity_type).ok_or_else(|| {
        Error::InvalidDocument(format!("no entity type registered for `{entity_type}`"))
    })?;
    Entity::construct(schema, properties_from_json(schema, data)?)
}

/// Parses JSON text and reads the entity it holds.
pub fn parse_json(registry: &SchemaRegistry, input: &[u8]) -> Result<Entity> {
    let value: JsonValue =
        serde_json::from_slice(input).map_err(|e| Error::MalformedInput(e.to_string()))?;
    from_json(registry, &value)
}

fn envelope(value: &JsonValue) -> Result<(&str, &Map<String, JsonValue>)> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::InvalidDocument("entity JSON must be an object".into()))?;
    let entity_type = object
        .get(ENTITY_TYPE)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::InvalidDocument(format!("missing `{ENTITY_TYPE}`")))?;
    let data = object
        .get(ENTITY_DATA)
        .and_then(JsonValue::as_object)
        .ok_or_else(|| Error::InvalidDocument(format!("missing `{ENTITY_DATA}` object")))?;
    Ok((entity_type, data))
}

/// Converts `entity_data` into a mapping. Keys the schema does not declare
/// are dropped so newer peers can add fields.
fn properties_from_json(schema: &PropertySchema, data: &Map<String, JsonValue>) -> Result<PropertyMap> {
    let mut properties = PropertyMap::new();
    for (key, value) in data {
        let Some(def) = schema.property(key) else {
            debug!(entity_type = schema.entity_type(), key = %key, "Ignoring unknown key");
            continue;
        };
        let mismatch = || Error::validation(key.clone(), ValidationReason::TypeMismatch);

        let input = match (&def.kind, value) {
            (_, JsonValue::Null) => continue,
            (PropertyKind::Entity(nested), value) => {
                PropertyInput::Entity(nested_properties(nested, value).map_err(|e| nested_error(key, e))?)
            }
            (PropertyKind::EntityList(nested), JsonValue::Array(items)) => PropertyInput::EntityList(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        nested_properties(nested, item).map_err(|e| nested_error(&format!("{key}[{index}]"), e))
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            (PropertyKind::EntityList(_), _) => return Err(mismatch()),
            (_, JsonValue::String(s)) => PropertyInput::Text(s.clone()),
            (_, JsonValue::Bool(b)) => PropertyInput::Value(Value::Boolean(*b)),
            (_, JsonValue::Number(n)) => match n.as_i64() {
                Some(i) => PropertyInput::Value(Value::Integer(i)),
                None => PropertyInput::Text(n.to_string()),
            },
            (_, JsonValue::Array(_) | JsonValue::Object(_)) => return Err(mismatch()),
        };
        properties.insert(key.clone(), input);
    }
    Ok(properties)
}

fn nested_properties(schema: &PropertySchema, value: &JsonValue) -> Result<PropertyMap> {
    let (entity_type, data) = envelope(value)?;
    if entity_type != schema.entity_type() {
        return Err(Error::InvalidDocument(format!(
            "expected `{}`, found `{entity_type}`",
            schema.entity_type()
        )));
    }
    properties_from_json(schema, data)
}

/// Prefixes nested validation errors with the outer key; a broken nested
/// envelope is a type mismatch of the outer property.
fn nested_error(key: &str, error: Error) -> Error {
    match error {
        Error::Validation { field, reason } => Error::Validation {
            field: format!("{key}.{field}"),
            reason,
        },
        _ => Error::validation(key, ValidationReason::TypeMismatch),
    }
}
