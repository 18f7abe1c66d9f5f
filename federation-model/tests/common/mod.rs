//! Shared fixtures for entity tests.

#![allow(dead_code)]

use federation_model::{EntityKind, PropertyInput, PropertyMap};

pub const PHOTO_GUID: &str = "0f26ac10b4f80133a0c2406c8f31b2f3";
pub const STATUS_GUID: &str = "2ad8c5b0b4f80133a0c2406c8f31b2f3";
pub const AUTHOR: &str = "alice@pod.example.org";
pub const CREATED_AT: &str = "2015-10-20T14:30:00Z";

/// A mapping holding every photo property, as wire text.
pub fn photo_properties() -> PropertyMap {
    [
        ("guid", PHOTO_GUID),
        ("author", AUTHOR),
        ("public", "true"),
        ("created_at", CREATED_AT),
        ("remote_photo_path", "https://pod.example.org/uploads/images/"),
        ("remote_photo_name", "f2a41e9d2117baacf3b5.jpg"),
        ("text", "what a view"),
        ("status_message_guid", STATUS_GUID),
        ("height", "480"),
        ("width", "800"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), PropertyInput::from(v)))
    .collect()
}

/// Photo mapping with only the required properties.
pub fn minimal_photo_properties() -> PropertyMap {
    let mut map = photo_properties();
    map.remove("public");
    map.remove("text");
    map.remove("status_message_guid");
    map
}

pub fn location_properties() -> PropertyMap {
    [("address", "Vienna"), ("lat", "48.2082"), ("lng", "16.3738")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), PropertyInput::from(v)))
        .collect()
}

pub fn poll_answer_properties(guid: &str, answer: &str) -> PropertyMap {
    [("guid", guid), ("answer", answer)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), PropertyInput::from(v)))
        .collect()
}

/// The canonical XML of the full photo fixture.
pub fn photo_xml() -> String {
    format!(
        "<photo>
  <guid>{PHOTO_GUID}</guid>
  <author>{AUTHOR}</author>
  <public>true</public>
  <created_at>{CREATED_AT}</created_at>
  <remote_photo_path>https://pod.example.org/uploads/images/</remote_photo_path>
  <remote_photo_name>f2a41e9d2117baacf3b5.jpg</remote_photo_name>
  <text>what a view</text>
  <status_message_guid>{STATUS_GUID}</status_message_guid>
  <height>480</height>
  <width>800</width>
</photo>
"
    )
}

pub fn photo_schema() -> &'static std::sync::Arc<federation_model::PropertySchema> {
    EntityKind::Photo.schema().unwrap()
}
