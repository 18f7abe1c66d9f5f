use federation_model::{Error, PropertyDefinition, PropertyKind, PropertySchema, Value};
use std::sync::Arc;

fn location_schema() -> Arc<PropertySchema> {
    Arc::new(
        PropertySchema::new(
            "location",
            vec![
                PropertyDefinition::string("address"),
                PropertyDefinition::string("lat"),
                PropertyDefinition::string("lng"),
            ],
        )
        .unwrap(),
    )
}

fn assert_invalid_schema(result: federation_model::Result<PropertySchema>) {
    match result {
        Err(Error::InvalidSchema { .. }) => {}
        other => panic!("expected InvalidSchema, got {other:?}"),
    }
}

// ── PropertyDefinition constructors ──────────────────────────────

#[test]
fn string_is_required_without_default() {
    let p = PropertyDefinition::string("guid");
    assert_eq!(p.name, "guid");
    assert_eq!(p.kind, PropertyKind::String);
    assert!(p.required);
    assert_eq!(p.default, None);
}

#[test]
fn scalar_kinds() {
    assert_eq!(PropertyDefinition::integer("h").kind, PropertyKind::Integer);
    assert_eq!(PropertyDefinition::boolean("b").kind, PropertyKind::Boolean);
    assert_eq!(PropertyDefinition::timestamp("t").kind, PropertyKind::Timestamp);
}

#[test]
fn optional_clears_required() {
    let p = PropertyDefinition::string("text").optional();
    assert!(!p.required);
    assert_eq!(p.default, None);
}

#[test]
fn with_default_makes_optional() {
    let p = PropertyDefinition::boolean("public").with_default(false);
    assert!(!p.required);
    assert_eq!(p.default, Some(Value::Boolean(false)));
}

#[test]
fn entity_list_defaults_to_empty() {
    let p = PropertyDefinition::entity_list("locations", &location_schema());
    assert!(!p.required);
    assert_eq!(p.default, Some(Value::EntityList(Vec::new())));
    assert_eq!(p.kind.name(), "entity list");
}

#[test]
fn entity_holds_nested_schema() {
    let nested = location_schema();
    let p = PropertyDefinition::entity("location", &nested);
    assert_eq!(p.kind.nested_schema().unwrap().entity_type(), "location");
    assert!(p.required);
}

#[test]
fn aliases_match_elements() {
    let p = PropertyDefinition::string("author").with_alias("diaspora_handle");
    assert!(p.matches_element("author"));
    assert!(p.matches_element("diaspora_handle"));
    assert!(!p.matches_element("handle"));
}

// ── PropertySchema ───────────────────────────────────────────────

#[test]
fn schema_preserves_declaration_order() {
    let schema = location_schema();
    let names: Vec<_> = schema.properties().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["address", "lat", "lng"]);
    assert_eq!(schema.position("lng"), Some(2));
    assert_eq!(schema.entity_type(), "location");
}

#[test]
fn property_lookup() {
    let schema = location_schema();
    assert!(schema.property("lat").is_some());
    assert!(schema.property("latitude").is_none());
}

#[test]
fn rejects_duplicate_names() {
    assert_invalid_schema(PropertySchema::new(
        "dup",
        vec![PropertyDefinition::string("a"), PropertyDefinition::integer("a")],
    ));
}

#[test]
fn rejects_alias_colliding_with_name() {
    assert_invalid_schema(PropertySchema::new(
        "dup",
        vec![
            PropertyDefinition::string("author"),
            PropertyDefinition::string("handle").with_alias("author"),
        ],
    ));
}

#[test]
fn rejects_two_entity_lists() {
    let nested = location_schema();
    assert_invalid_schema(PropertySchema::new(
        "two_lists",
        vec![
            PropertyDefinition::entity_list("a", &nested),
            PropertyDefinition::entity_list("b", &nested),
        ],
    ));
}

#[test]
fn accepts_one_entity_list_and_one_entity() {
    let nested = location_schema();
    let schema = PropertySchema::new(
        "mixed",
        vec![
            PropertyDefinition::entity("here", &nested),
            PropertyDefinition::entity_list("there", &nested),
        ],
    );
    assert!(schema.is_ok());
}

#[test]
fn rejects_default_of_wrong_kind() {
    assert_invalid_schema(PropertySchema::new(
        "bad_default",
        vec![PropertyDefinition::integer("height").with_default("tall")],
    ));
}

#[test]
fn rejects_required_with_default() {
    let mut p = PropertyDefinition::boolean("public").with_default(true);
    p.required = true;
    assert_invalid_schema(PropertySchema::new("bad", vec![p]));
}

#[test]
fn rejects_empty_entity_type() {
    assert_invalid_schema(PropertySchema::new(" ", vec![]));
}
