mod common;

use common::*;
use federation_model::xml::{from_xml, parse_xml, parse_xml_as, to_xml_string};
use federation_model::{
    Entity, EntityKind, Error, Format, PropertyInput, ValidationReason, WireConfig, XmlElement, builtin, parse,
    serialize,
};
use pretty_assertions::assert_eq;

fn photo() -> Entity {
    Entity::construct(photo_schema(), photo_properties()).unwrap()
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn photo_serializes_in_declaration_order() {
    assert_eq!(to_xml_string(&photo(), &WireConfig::default()), photo_xml());
}

#[test]
fn facade_serialize_matches_codec() {
    let bytes = serialize(&photo(), Format::Xml).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), photo_xml());
}

#[test]
fn absent_values_are_empty_elements() {
    let photo = Entity::construct(photo_schema(), minimal_photo_properties()).unwrap();
    let xml = to_xml_string(&photo, &WireConfig::default());
    assert!(xml.contains("  <public>false</public>\n"));
    assert!(xml.contains("  <text/>\n"));
    assert!(xml.contains("  <status_message_guid/>\n"));
}

#[test]
fn text_is_escaped() {
    let mut map = photo_properties();
    map.insert("text".into(), PropertyInput::from("<b>cats & dogs</b>"));
    let photo = Entity::construct(photo_schema(), map).unwrap();
    let xml = to_xml_string(&photo, &WireConfig::default());
    assert!(xml.contains("<text>&lt;b&gt;cats &amp; dogs&lt;/b&gt;</text>"));

    let back = parse_xml(builtin(), xml.as_bytes()).unwrap();
    assert_eq!(back.get_str("text"), Some("<b>cats & dogs</b>"));
}

#[test]
fn custom_indent() {
    let config = WireConfig {
        indent: 4,
        ..WireConfig::default()
    };
    let xml = to_xml_string(&photo(), &config);
    assert!(xml.starts_with("<photo>\n    <guid>"));
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn photo_round_trips() {
    let original = photo();
    let xml = to_xml_string(&original, &WireConfig::default());
    assert_eq!(parse_xml(builtin(), xml.as_bytes()).unwrap(), original);
}

#[test]
fn minimal_photo_takes_defaults() {
    let xml = format!(
        "<photo>
  <guid>{PHOTO_GUID}</guid>
  <author>{AUTHOR}</author>
  <created_at>{CREATED_AT}</created_at>
  <remote_photo_path>https://pod.example.org/uploads/images/</remote_photo_path>
  <remote_photo_name>f2a41e9d2117baacf3b5.jpg</remote_photo_name>
  <height>480</height>
  <width>800</width>
</photo>"
    );
    let photo = parse(builtin(), xml.as_bytes(), Format::Xml).unwrap();
    assert_eq!(photo.get_bool("public"), Some(false));
    assert_eq!(photo.get_str("text"), None);
    assert_eq!(photo.get_str("status_message_guid"), None);
}

#[test]
fn legacy_author_element_is_accepted() {
    let xml = photo_xml().replace("<author>", "<diaspora_handle>").replace("</author>", "</diaspora_handle>");
    let photo = parse_xml(builtin(), xml.as_bytes()).unwrap();
    assert_eq!(photo.get_str("author"), Some(AUTHOR));
}

#[test]
fn unknown_elements_are_ignored() {
    let xml = photo_xml().replace("<height>", "<rating>5</rating><height>");
    let photo = parse_xml(builtin(), xml.as_bytes()).unwrap();
    assert_eq!(photo.get_integer("height"), Some(480));
}

#[test]
fn element_order_is_not_significant_on_input() {
    let xml = format!(
        "<photo><width>800</width><height>480</height><guid>{PHOTO_GUID}</guid><author>{AUTHOR}</author>\
         <created_at>{CREATED_AT}</created_at><remote_photo_path>p</remote_photo_path>\
         <remote_photo_name>n</remote_photo_name></photo>"
    );
    let photo = parse_xml(builtin(), xml.as_bytes()).unwrap();
    assert_eq!(photo.get_integer("width"), Some(800));
    assert_eq!(photo.get_str("guid"), Some(PHOTO_GUID));
}

#[test]
fn empty_text_element_is_empty_string() {
    let xml = photo_xml().replace("<text>what a view</text>", "<text></text>");
    let photo = parse_xml(builtin(), xml.as_bytes()).unwrap();
    assert_eq!(photo.get_str("text"), Some(""));
}

#[test]
fn empty_integer_element_is_unset() {
    let xml = photo_xml().replace("<height>480</height>", "<height></height>");
    let err = parse_xml(builtin(), xml.as_bytes()).unwrap_err();
    assert_eq!(err.field(), Some("height"));
    assert_eq!(err.validation_reason(), Some(ValidationReason::MissingRequiredField));
}

#[test]
fn missing_required_element_fails_construction() {
    let xml = photo_xml().replace(&format!("  <guid>{PHOTO_GUID}</guid>\n"), "");
    let root = XmlElement::parse(&xml).unwrap();
    let map = from_xml(photo_schema(), &root);
    assert!(!map.contains_key("guid"));

    let err = parse_xml(builtin(), xml.as_bytes()).unwrap_err();
    assert_eq!(err.field(), Some("guid"));
    assert_eq!(err.validation_reason(), Some(ValidationReason::MissingRequiredField));
}

#[test]
fn bad_integer_is_a_type_mismatch() {
    let xml = photo_xml().replace("<width>800</width>", "<width>wide</width>");
    let err = parse_xml(builtin(), xml.as_bytes()).unwrap_err();
    assert_eq!(err.validation_reason(), Some(ValidationReason::TypeMismatch));
}

// ── Nested entities ──────────────────────────────────────────────

fn status_message_xml() -> String {
    format!(
        "<status_message>
  <author>{AUTHOR}</author>
  <guid>{STATUS_GUID}</guid>
  <created_at>{CREATED_AT}</created_at>
  <public>true</public>
  <text>look at this</text>
  <provider_display_name/>
  <location>
    <address>Vienna</address>
    <lat>48.2082</lat>
    <lng>16.3738</lng>
  </location>
  <poll>
    <guid>poll-1</guid>
    <question>Which one?</question>
    <poll_answers>
      <poll_answer>
        <guid>answer-1</guid>
        <answer>left</answer>
      </poll_answer>
      <poll_answer>
        <guid>answer-2</guid>
        <answer>right</answer>
      </poll_answer>
    </poll_answers>
  </poll>
  <photos>
{photo}  </photos>
</status_message>
",
        photo = indent_block(&photo_xml(), 4),
    )
}

fn indent_block(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines().map(|line| format!("{pad}{line}\n")).collect()
}

#[test]
fn nested_status_message_parses() {
    let status = parse_xml(builtin(), status_message_xml().as_bytes()).unwrap();
    assert_eq!(status.entity_type(), "status_message");

    let location = status.get_entity("location").unwrap();
    assert_eq!(location.get_str("lat"), Some("48.2082"));

    let poll = status.get_entity("poll").unwrap();
    let answers = poll.get_entities("poll_answers").unwrap();
    let texts: Vec<_> = answers.iter().filter_map(|a| a.get_str("answer")).collect();
    assert_eq!(texts, vec!["left", "right"]);

    let photos = status.get_entities("photos").unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0], photo());
}

#[test]
fn nested_status_message_serializes_canonically() {
    let status = parse_xml(builtin(), status_message_xml().as_bytes()).unwrap();
    assert_eq!(to_xml_string(&status, &WireConfig::default()), status_message_xml());
}

#[test]
fn absent_nested_entity_is_an_empty_element() {
    let xml = status_message_xml();
    let start = xml.find("  <location>").unwrap();
    let end = xml.find("  <poll>").unwrap();
    let without = format!("{}  <location/>\n{}", &xml[..start], &xml[end..]);

    let status = parse_xml(builtin(), without.as_bytes()).unwrap();
    assert_eq!(status.get("location"), None);
    assert_eq!(to_xml_string(&status, &WireConfig::default()), without);
}

#[test]
fn nested_validation_error_has_path() {
    let xml = status_message_xml().replace("<lat>48.2082</lat>", "");
    let err = parse_xml(builtin(), xml.as_bytes()).unwrap_err();
    assert_eq!(err.field(), Some("location.lat"));
}

// ── Failures ─────────────────────────────────────────────────────

#[test]
fn malformed_input() {
    for input in ["", "foo", "<photo><guid>x</photo>", "<photo>"] {
        let err = parse_xml(builtin(), input.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{input:?}: {err:?}");
    }
}

#[test]
fn unknown_root_is_an_invalid_document() {
    let err = parse_xml(builtin(), b"<html></html>").unwrap_err();
    assert!(matches!(err, Error::InvalidDocument(_)));
}

#[test]
fn parse_as_checks_root() {
    let location = EntityKind::Location.schema().unwrap();
    assert!(matches!(
        parse_xml_as(location, photo_xml().as_bytes()),
        Err(Error::InvalidDocument(_))
    ));
    assert_eq!(parse_xml_as(photo_schema(), photo_xml().as_bytes()).unwrap(), photo());
}
