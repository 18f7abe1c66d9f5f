use crate::{Entity, PropertyKind, PropertySchema};
use federation_types::Timestamp;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A typed property value held by an [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(Timestamp),
    Entity(Box<Entity>),
    EntityList(Vec<Entity>),
}

impl Value {
    /// Human-readable kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::Entity(_) => "entity",
            Self::EntityList(_) => "entity list",
        }
    }

    /// Returns true if this value can be stored in a property of `kind`.
    ///
    /// Nested entities must have been built against the schema the property
    /// declares, or one equal to it; a same-named schema from another
    /// registry is rejected.
    pub fn matches(&self, kind: &PropertyKind) -> bool {
        match (self, kind) {
            (Self::String(_), PropertyKind::String)
            | (Self::Integer(_), PropertyKind::Integer)
            | (Self::Boolean(_), PropertyKind::Boolean)
            | (Self::Timestamp(_), PropertyKind::Timestamp) => true,
            (Self::Entity(entity), PropertyKind::Entity(schema)) => built_against(entity, schema),
            (Self::EntityList(items), PropertyKind::EntityList(schema)) => {
                items.iter().all(|entity| built_against(entity, schema))
            }
            _ => false,
        }
    }
}

fn built_against(entity: &Entity, schema: &Arc<PropertySchema>) -> bool {
    Arc::ptr_eq(entity.schema(), schema) || **entity.schema() == **schema
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Entity(Box::new(entity))
    }
}

impl From<Vec<Entity>> for Value {
    fn from(items: Vec<Entity>) -> Self {
        Self::EntityList(items)
    }
}

/// The mapping handed to [`Entity::construct`], keyed by property name.
pub type PropertyMap = BTreeMap<String, PropertyInput>;

/// One input value for [`Entity::construct`].
///
/// Codecs produce raw [`Text`](Self::Text) and nested mappings and leave all
/// coercion to construction, so every type error surfaces in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyInput {
    /// Wire text, coerced according to the property kind.
    Text(String),
    /// An already-typed value; must match the property kind exactly.
    Value(Value),
    /// A nested entity given as its own mapping.
    Entity(PropertyMap),
    /// A nested entity collection given as mappings.
    EntityList(Vec<PropertyMap>),
}

impl From<&str> for PropertyInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for PropertyInput {
    fn from(i: i64) -> Self {
        Self::Value(Value::Integer(i))
    }
}

impl From<bool> for PropertyInput {
    fn from(b: bool) -> Self {
        Self::Value(Value::Boolean(b))
    }
}

impl From<Timestamp> for PropertyInput {
    fn from(ts: Timestamp) -> Self {
        Self::Value(Value::Timestamp(ts))
    }
}

impl From<Value> for PropertyInput {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<PropertyMap> for PropertyInput {
    fn from(map: PropertyMap) -> Self {
        Self::Entity(map)
    }
}
