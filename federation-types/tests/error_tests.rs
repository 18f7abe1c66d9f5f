use federation_types::{Error, ValidationReason};

#[test]
fn validation_display_names_field_and_reason() {
    let err = Error::validation("guid", ValidationReason::MissingRequiredField);
    let msg = format!("{err}");
    assert!(msg.contains("guid"));
    assert!(msg.contains("missing required field"));
}

#[test]
fn validation_accessors() {
    let err = Error::validation("height", ValidationReason::TypeMismatch);
    assert_eq!(err.field(), Some("height"));
    assert_eq!(err.validation_reason(), Some(ValidationReason::TypeMismatch));
}

#[test]
fn accessors_are_none_for_other_errors() {
    let err = Error::InvalidDocument("not an XRD".into());
    assert_eq!(err.field(), None);
    assert_eq!(err.validation_reason(), None);
}

#[test]
fn reason_display() {
    assert_eq!(ValidationReason::UnknownField.to_string(), "unknown field");
    assert_eq!(ValidationReason::TypeMismatch.to_string(), "type mismatch");
}

#[test]
fn schema_conflict_display() {
    let err = Error::SchemaConflict("photo".into());
    assert!(format!("{err}").contains("photo"));
}

#[test]
fn invalid_document_display() {
    let err = Error::InvalidDocument("empty input".into());
    assert!(format!("{err}").contains("invalid document"));
}

#[test]
fn serialization_from_serde_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Serialization(_)));
}
