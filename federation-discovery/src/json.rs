//! XRD JSON codec (JRD).
//!
//! Keys are `subject`, `expires`, `aliases`, `properties` and `links`, all
//! optional. Property values are strings or `null`.

use crate::XrdDocument;
use federation_types::{Error, Result};
use serde_json::Value as JsonValue;

/// Parses JRD bytes. Every failure is reported as [`Error::InvalidDocument`].
pub fn parse(input: &[u8]) -> Result<XrdDocument> {
    let value: JsonValue = serde_json::from_slice(input).map_err(invalid)?;
    from_value(value)
}

/// Reads a document out of an already parsed JSON value, which must be an
/// object.
pub fn from_value(value: JsonValue) -> Result<XrdDocument> {
    if !value.is_object() {
        return Err(Error::InvalidDocument("XRD JSON must be an object".into()));
    }
    serde_json::from_value(value).map_err(invalid)
}

/// Converts a document into its JSON value, keys in canonical order.
pub fn to_value(doc: &XrdDocument) -> Result<JsonValue> {
    Ok(serde_json::to_value(doc)?)
}

fn invalid(e: serde_json::Error) -> Error {
    Error::InvalidDocument(e.to_string())
}
