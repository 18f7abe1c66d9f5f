use crate::{PropertyDefinition, PropertyInput, PropertyKind, PropertyMap, PropertySchema, Value};
use federation_types::{Error, Result, Timestamp, ValidationReason};
use std::sync::Arc;

/// An immutable protocol message validated against its [`PropertySchema`].
///
/// Every schema property has a slot, in declaration order. A slot is `None`
/// only for optional properties without a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    schema: Arc<PropertySchema>,
    values: Vec<Option<Value>>,
}

impl Entity {
    /// Validates `properties` against `schema` and builds the entity.
    ///
    /// Fails with a validation error naming the offending field when the
    /// mapping contains a key the schema does not declare, lacks a required
    /// property, or holds a value that cannot be coerced to the property kind.
    /// Errors inside nested entities carry a dotted path (`location.lat`,
    /// `photos[1].guid`).
    pub fn construct(schema: &Arc<PropertySchema>, mut properties: PropertyMap) -> Result<Self> {
        if let Some(unknown) = properties.keys().find(|key| schema.property(key).is_none()) {
            return Err(Error::validation(unknown.clone(), ValidationReason::UnknownField));
        }

        let mut values = Vec::with_capacity(schema.properties().len());
        for def in schema.properties() {
            let value = match properties.remove(&def.name) {
                Some(input) => Some(coerce(def, input)?),
                None if def.required => {
                    return Err(Error::validation(
                        def.name.clone(),
                        ValidationReason::MissingRequiredField,
                    ));
                }
                None => def.default.clone(),
            };
            values.push(value);
        }

        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    pub fn schema(&self) -> &Arc<PropertySchema> {
        &self.schema
    }

    /// The entity type name, also the top-level XML element name.
    pub fn entity_type(&self) -> &str {
        self.schema.entity_type()
    }

    /// Returns the value of a property, or `None` when it is absent or not
    /// declared by the schema.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .position(name)
            .and_then(|index| self.values[index].as_ref())
    }

    /// Extract a string property.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract an integer property.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract a boolean property.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract a timestamp property.
    pub fn get_timestamp(&self, name: &str) -> Option<Timestamp> {
        match self.get(name)? {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Extract a nested entity.
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        match self.get(name)? {
            Value::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Extract a nested entity collection.
    pub fn get_entities(&self, name: &str) -> Option<&[Entity]> {
        match self.get(name)? {
            Value::EntityList(items) => Some(items),
            _ => None,
        }
    }

    /// Iterates over every property slot in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyDefinition, Option<&Value>)> {
        self.schema
            .properties()
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// Returns the present values as a mapping that constructs an equal entity.
    pub fn to_properties(&self) -> PropertyMap {
        self.iter()
            .filter_map(|(def, value)| {
                value.map(|v| (def.name.clone(), PropertyInput::Value(v.clone())))
            })
            .collect()
    }
}

fn coerce(def: &PropertyDefinition, input: PropertyInput) -> Result<Value> {
    let mismatch = || Error::validation(def.name.clone(), ValidationReason::TypeMismatch);

    match (&def.kind, input) {
        (kind, PropertyInput::Value(value)) => {
            if value.matches(kind) {
                Ok(value)
            } else {
                Err(mismatch())
            }
        }
        (PropertyKind::String, PropertyInput::Text(text)) => Ok(Value::String(text)),
        (PropertyKind::Integer, PropertyInput::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| mismatch()),
        (PropertyKind::Boolean, PropertyInput::Text(text)) => {
            parse_bool(&text).map(Value::Boolean).ok_or_else(mismatch)
        }
        (PropertyKind::Timestamp, PropertyInput::Text(text)) => Timestamp::parse(&text)
            .map(Value::Timestamp)
            .map_err(|_| mismatch()),
        (PropertyKind::Entity(schema), PropertyInput::Entity(map)) => Entity::construct(schema, map)
            .map(|entity| Value::Entity(Box::new(entity)))
            .map_err(|e| nest(&def.name, e)),
        (PropertyKind::EntityList(schema), PropertyInput::EntityList(maps)) => maps
            .into_iter()
            .enumerate()
            .map(|(index, map)| {
                Entity::construct(schema, map).map_err(|e| nest(&format!("{}[{index}]", def.name), e))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::EntityList),
        _ => Err(mismatch()),
    }
}

/// Accepts the boolean spellings seen on the wire.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn nest(prefix: &str, error: Error) -> Error {
    match error {
        Error::Validation { field, reason } => Error::Validation {
            field: format!("{prefix}.{field}"),
            reason,
        },
        other => other,
    }
}
