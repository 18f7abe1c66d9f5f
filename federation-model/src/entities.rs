//! Built-in protocol entities.
//!
//! The federation protocol exchanges a closed set of message kinds. Their
//! schemas are registered once into a process-wide [`SchemaRegistry`] the
//! first time [`builtin`] is called. Applications that add their own kinds
//! call [`register_builtin`] on their own builder instead.

use crate::{PropertyDefinition as Prop, PropertySchema, SchemaRegistry, SchemaRegistryBuilder};
use federation_types::{Error, Result};
use std::sync::{Arc, OnceLock};

/// The built-in entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Location,
    Photo,
    PollAnswer,
    Poll,
    StatusMessage,
    Comment,
    Like,
    Profile,
    Person,
}

impl EntityKind {
    /// Every kind, nested kinds listed before the kinds that embed them.
    pub const ALL: [Self; 9] = [
        Self::Location,
        Self::Photo,
        Self::PollAnswer,
        Self::Poll,
        Self::StatusMessage,
        Self::Comment,
        Self::Like,
        Self::Profile,
        Self::Person,
    ];

    /// The entity type name and XML element name.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Photo => "photo",
            Self::PollAnswer => "poll_answer",
            Self::Poll => "poll",
            Self::StatusMessage => "status_message",
            Self::Comment => "comment",
            Self::Like => "like",
            Self::Profile => "profile",
            Self::Person => "person",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// The schema of this kind in the built-in registry.
    pub fn schema(self) -> Result<&'static Arc<PropertySchema>> {
        builtin().schema(self.tag())
    }

    fn properties(self, builder: &SchemaRegistryBuilder) -> Result<Vec<Prop>> {
        let nested = |kind: Self| {
            builder
                .get(kind.tag())
                .ok_or_else(|| Error::UnknownEntityType(kind.tag().to_string()))
        };

        let properties = match self {
            Self::Location => vec![
                Prop::string("address"),
                Prop::string("lat"),
                Prop::string("lng"),
            ],
            Self::Photo => vec![
                Prop::string("guid"),
                Prop::string("author").with_alias("diaspora_handle"),
                Prop::boolean("public").with_default(false),
                Prop::timestamp("created_at"),
                Prop::string("remote_photo_path"),
                Prop::string("remote_photo_name"),
                Prop::string("text").optional(),
                Prop::string("status_message_guid").optional(),
                Prop::integer("height"),
                Prop::integer("width"),
            ],
            Self::PollAnswer => vec![Prop::string("guid"), Prop::string("answer")],
            Self::Poll => vec![
                Prop::string("guid"),
                Prop::string("question"),
                Prop::entity_list("poll_answers", nested(Self::PollAnswer)?),
            ],
            Self::StatusMessage => vec![
                Prop::string("author").with_alias("diaspora_handle"),
                Prop::string("guid"),
                Prop::timestamp("created_at"),
                Prop::boolean("public").with_default(false),
                Prop::string("text").optional(),
                Prop::string("provider_display_name").optional(),
                Prop::entity("location", nested(Self::Location)?).optional(),
                Prop::entity("poll", nested(Self::Poll)?).optional(),
                Prop::entity_list("photos", nested(Self::Photo)?),
            ],
            Self::Comment => vec![
                Prop::string("author").with_alias("diaspora_handle"),
                Prop::string("guid"),
                Prop::string("parent_guid"),
                Prop::string("text"),
                // Older peers omit the creation time.
                Prop::timestamp("created_at").optional(),
            ],
            Self::Like => vec![
                Prop::string("author").with_alias("diaspora_handle"),
                Prop::string("guid"),
                Prop::string("parent_guid"),
                Prop::string("parent_type").with_alias("target_type"),
                Prop::boolean("positive").with_default(true),
            ],
            Self::Profile => vec![
                Prop::string("author").with_alias("diaspora_handle"),
                Prop::string("first_name").optional(),
                Prop::string("last_name").optional(),
                Prop::string("image_url").optional(),
                Prop::string("image_url_medium").optional(),
                Prop::string("image_url_small").optional(),
                Prop::string("gender").optional(),
                Prop::string("bio").optional(),
                Prop::string("location").optional(),
                Prop::boolean("searchable").with_default(true),
                Prop::boolean("public").with_default(false),
                Prop::boolean("nsfw").with_default(false),
                Prop::string("tag_string").optional(),
            ],
            Self::Person => vec![
                Prop::string("guid"),
                Prop::string("author").with_alias("diaspora_handle"),
                Prop::string("url"),
                Prop::entity("profile", nested(Self::Profile)?),
                Prop::string("exported_key"),
            ],
        };
        Ok(properties)
    }
}

/// Registers every built-in kind on `builder`.
pub fn register_builtin(builder: &mut SchemaRegistryBuilder) -> Result<()> {
    for kind in EntityKind::ALL {
        let properties = kind.properties(builder)?;
        builder.define_schema(kind.tag(), properties)?;
    }
    Ok(())
}

/// The process-wide registry of built-in entity schemas.
pub fn builtin() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut builder = SchemaRegistry::builder();
        register_builtin(&mut builder).expect("built-in entity schemas are consistent");
        builder.build()
    })
}
