//! Schema registry.
//!
//! Schemas are declared on a [`SchemaRegistryBuilder`] during startup and
//! frozen into an immutable [`SchemaRegistry`]. The frozen table is shared
//! behind an `Arc` and read without locks, so a registry can be cloned into
//! any number of threads once built.

use crate::{Entity, PropertyDefinition, PropertyMap, PropertySchema};
use federation_types::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Collects schema definitions before the registry is frozen.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: HashMap<String, Arc<PropertySchema>>,
}

impl SchemaRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the schema for `entity_type`.
    ///
    /// Fails with [`Error::SchemaConflict`] if the type is already registered,
    /// and with [`Error::InvalidSchema`] if the definitions are inconsistent or
    /// reference a nested schema that was not registered here first.
    pub fn define_schema(
        &mut self,
        entity_type: &str,
        properties: Vec<PropertyDefinition>,
    ) -> Result<Arc<PropertySchema>> {
        if self.schemas.contains_key(entity_type) {
            return Err(Error::SchemaConflict(entity_type.to_string()));
        }

        let schema = Arc::new(PropertySchema::new(entity_type, properties)?);
        for def in schema.properties() {
            let Some(nested) = def.kind.nested_schema() else {
                continue;
            };
            match self.schemas.get(nested.entity_type()) {
                Some(registered) if registered == nested => {}
                _ => {
                    return Err(Error::InvalidSchema {
                        entity_type: entity_type.to_string(),
                        detail: format!(
                            "property `{}` references unregistered entity type `{}`",
                            def.name,
                            nested.entity_type()
                        ),
                    });
                }
            }
        }

        debug!(entity_type, properties = schema.properties().len(), "Schema registered");
        self.schemas.insert(entity_type.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Returns a schema registered on this builder.
    pub fn get(&self, entity_type: &str) -> Option<&Arc<PropertySchema>> {
        self.schemas.get(entity_type)
    }

    /// Freezes the registry.
    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            schemas: Arc::new(self.schemas),
        }
    }
}

/// Immutable lookup table from entity type to schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Arc<HashMap<String, Arc<PropertySchema>>>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    pub fn get(&self, entity_type: &str) -> Option<&Arc<PropertySchema>> {
        self.schemas.get(entity_type)
    }

    /// Like [`get`](Self::get), failing with [`Error::UnknownEntityType`].
    pub fn schema(&self, entity_type: &str) -> Result<&Arc<PropertySchema>> {
        self.get(entity_type)
            .ok_or_else(|| Error::UnknownEntityType(entity_type.to_string()))
    }

    pub fn contains(&self, entity_type: &str) -> bool {
        self.schemas.contains_key(entity_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered entity types, sorted.
    pub fn entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Looks up the schema for `entity_type` and constructs an entity from it.
    pub fn construct(&self, entity_type: &str, properties: PropertyMap) -> Result<Entity> {
        Entity::construct(self.schema(entity_type)?, properties)
    }
}
