use crate::Value;
use federation_types::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Describes one entity type's wire shape: an ordered, closed list of
/// property definitions.
///
/// Declaration order is serialization order.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    entity_type: String,
    properties: Vec<PropertyDefinition>,
}

impl PropertySchema {
    /// Builds a schema, checking that the definitions are consistent:
    /// - the entity type name is not empty
    /// - property names (and legacy aliases) are unique
    /// - at most one property is an entity list
    /// - required properties carry no default
    /// - every default matches its property kind
    pub fn new(entity_type: impl Into<String>, properties: Vec<PropertyDefinition>) -> Result<Self> {
        let entity_type = entity_type.into();
        let invalid = |detail: String| Error::InvalidSchema {
            entity_type: entity_type.clone(),
            detail,
        };

        if entity_type.trim().is_empty() {
            return Err(invalid("entity type name is empty".into()));
        }

        let mut seen = HashSet::new();
        for def in &properties {
            for name in std::iter::once(&def.name).chain(&def.aliases) {
                if !seen.insert(name.as_str()) {
                    return Err(invalid(format!("duplicate property name `{name}`")));
                }
            }
            if def.required && def.default.is_some() {
                return Err(invalid(format!("required property `{}` declares a default", def.name)));
            }
            if let Some(default) = &def.default {
                if !default.matches(&def.kind) {
                    return Err(invalid(format!(
                        "default for `{}` is {}, expected {}",
                        def.name,
                        default.kind_name(),
                        def.kind.name()
                    )));
                }
            }
        }

        let lists = properties
            .iter()
            .filter(|def| matches!(def.kind, PropertyKind::EntityList(_)))
            .count();
        if lists > 1 {
            return Err(invalid(format!("{lists} entity list properties, at most one allowed")));
        }

        Ok(Self {
            entity_type,
            properties,
        })
    }

    /// The entity type name, also used as the top-level XML element name.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn properties(&self) -> &[PropertyDefinition] {
        &self.properties
    }

    /// Looks up a property by its canonical name.
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|def| def.name == name)
    }

    /// Returns the declaration index of a property.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|def| def.name == name)
    }
}

/// A single named property of an entity schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub name: String,
    pub kind: PropertyKind,
    pub required: bool,
    /// Value stored when an optional property is absent from the input.
    /// `None` stores an explicit "absent" slot.
    pub default: Option<Value>,
    /// Legacy XML element names accepted on input. Output always uses `name`.
    pub aliases: Vec<String>,
}

impl PropertyDefinition {
    fn simple(name: &str, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            aliases: Vec::new(),
        }
    }

    /// Shorthand for a required string property.
    pub fn string(name: &str) -> Self {
        Self::simple(name, PropertyKind::String)
    }

    /// Shorthand for a required integer property.
    pub fn integer(name: &str) -> Self {
        Self::simple(name, PropertyKind::Integer)
    }

    /// Shorthand for a required boolean property.
    pub fn boolean(name: &str) -> Self {
        Self::simple(name, PropertyKind::Boolean)
    }

    /// Shorthand for a required timestamp property.
    pub fn timestamp(name: &str) -> Self {
        Self::simple(name, PropertyKind::Timestamp)
    }

    /// Shorthand for a required nested entity.
    pub fn entity(name: &str, schema: &Arc<PropertySchema>) -> Self {
        Self::simple(name, PropertyKind::Entity(Arc::clone(schema)))
    }

    /// Shorthand for a nested entity collection. Lists are always optional
    /// and default to empty.
    pub fn entity_list(name: &str, schema: &Arc<PropertySchema>) -> Self {
        Self {
            required: false,
            default: Some(Value::EntityList(Vec::new())),
            ..Self::simple(name, PropertyKind::EntityList(Arc::clone(schema)))
        }
    }

    /// Marks the property optional with no default.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self.default = None;
        self
    }

    /// Marks the property optional with the given default.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    /// Adds a legacy element name accepted when parsing XML.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Returns true if an XML element with this name carries the property.
    pub fn matches_element(&self, element_name: &str) -> bool {
        self.name == element_name || self.aliases.iter().any(|a| a == element_name)
    }
}

/// The semantic type of a property.
///
/// Nested kinds hold the nested schema itself, so codecs recurse without a
/// registry lookup and a schema can only reference schemas built before it.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Integer,
    Boolean,
    Timestamp,
    Entity(Arc<PropertySchema>),
    EntityList(Arc<PropertySchema>),
}

impl PropertyKind {
    /// Human-readable kind name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Entity(_) => "entity",
            Self::EntityList(_) => "entity list",
        }
    }

    /// The nested schema, for entity and entity-list kinds.
    pub fn nested_schema(&self) -> Option<&Arc<PropertySchema>> {
        match self {
            Self::Entity(schema) | Self::EntityList(schema) => Some(schema),
            _ => None,
        }
    }
}
