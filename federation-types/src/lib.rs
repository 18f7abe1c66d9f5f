//! Core wire types for the federation protocol.
//!
//! This crate defines the format-level building blocks shared by the entity
//! framework (`federation-model`) and the discovery documents
//! (`federation-discovery`):
//! - [`Timestamp`] — second-precision UTC date-time with a fixed text form
//! - [`XmlElement`] — an owned XML tree with a namespace-aware parser
//! - [`Format`] — selects the XML or JSON representation
//! - [`WireConfig`] — output layout settings, loadable from TOML
//! - [`Error`] — the error taxonomy returned by every parse/serialize call
//!
//! Nothing here performs I/O beyond optional config-file loading, and no
//! value holds shared mutable state.

mod config;
mod format;
mod timestamp;
pub mod xml;

use std::fmt;

pub use config::WireConfig;
pub use format::Format;
pub use timestamp::Timestamp;
pub use xml::XmlElement;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the wire layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is not well-formed XML or JSON.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Input is well-formed but is not a recognizable document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A value mapping violates its entity schema.
    #[error("invalid field `{field}`: {reason}")]
    Validation {
        field: String,
        reason: ValidationReason,
    },

    /// A schema was registered twice under the same entity type.
    #[error("schema already registered for entity type `{0}`")]
    SchemaConflict(String),

    #[error("invalid schema for `{entity_type}`: {detail}")]
    InvalidSchema { entity_type: String, detail: String },

    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub fn validation(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self::Validation {
            field: field.into(),
            reason,
        }
    }

    /// Returns the validation reason, if this is a validation error.
    #[must_use]
    pub fn validation_reason(&self) -> Option<ValidationReason> {
        match self {
            Self::Validation { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Returns the offending field name, if this is a validation error.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Why a mapping failed schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationReason {
    /// A required field had no value.
    MissingRequiredField,
    /// A value could not be coerced to the field's declared kind.
    TypeMismatch,
    /// The mapping named a field the schema does not declare.
    UnknownField,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingRequiredField => "missing required field",
            Self::TypeMismatch => "type mismatch",
            Self::UnknownField => "unknown field",
        };
        f.write_str(text)
    }
}
