//! Integration tests for field stripping and JSON output.

use std::io::Write;

use untextract::model::Node;
use untextract::render::{to_json, JsonFormat};
use untextract::{sanitize_file, sanitize_str, strip_field, strip_geometry, Untextract};

#[test]
fn test_strip_geometry_example() {
    let node = sanitize_str(
        r#"{"Blocks": [{"Id":"1","Geometry":{"Left":0},"Text":"x"}]}"#,
        "Geometry",
    )
    .unwrap();

    assert_eq!(
        to_json(&node, JsonFormat::Compact).unwrap(),
        r#"{"Blocks":[{"Id":"1","Text":"x"}]}"#
    );
}

#[test]
fn test_compact_output_keeps_source_order() {
    let json = r#"{"zeta":1,"Geometry":{"Polygon":[]},"alpha":[{"mid":true,"Geometry":null,"a":"s"}],"beta":null}"#;
    let node = sanitize_str(json, "Geometry").unwrap();

    assert_eq!(
        to_json(&node, JsonFormat::Compact).unwrap(),
        r#"{"zeta":1,"alpha":[{"mid":true,"a":"s"}],"beta":null}"#
    );
}

#[test]
fn test_stripping_is_idempotent() {
    let node = Node::from_json_str(
        r#"{"ExpenseDocuments": [{"Geometry": 1, "LineItemGroups": [{"Geometry": 2, "Rows": [1, 2, 3]}]}]}"#,
    )
    .unwrap();

    let once = strip_geometry(&node);
    assert_eq!(strip_geometry(&once), once);
    assert_eq!(strip_field(&once, "Geometry"), once);
}

#[test]
fn test_sequences_keep_length() {
    let node = Node::from_json_str(r#"[{"Geometry": 1}, {"Geometry": 2}, 3]"#).unwrap();
    let stripped = strip_geometry(&node);

    assert_eq!(stripped.as_array().unwrap().len(), 3);
    assert_eq!(stripped, Node::from_json_str("[{}, {}, 3]").unwrap());
}

#[test]
fn test_sanitize_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"Text": "keep", "Confidence": 99.1}}"#).unwrap();

    let node = sanitize_file(file.path(), "Confidence").unwrap();
    assert_eq!(node.keys(), vec!["Text"]);
}

#[test]
fn test_sanitize_invalid_json() {
    assert!(sanitize_str("{\"unterminated\": ", "Geometry").is_err());
}

#[test]
fn test_builder_strip_fields() {
    let result = Untextract::new()
        .with_strip_fields(["Geometry", "Confidence"])
        .parse_str(
            r#"{"Blocks": [{"BlockType": "WORD", "Id": "w", "Text": "t", "Confidence": 50.0,
                "Geometry": {"BoundingBox": {"Width": 0.1, "Height": 0.1, "Left": 0.0, "Top": 0.0}}}]}"#,
        )
        .unwrap();

    assert_eq!(
        result.to_json(JsonFormat::Compact).unwrap(),
        r#"{"Blocks":[{"BlockType":"WORD","Id":"w","Text":"t"}]}"#
    );
    // The raw view is untouched
    assert!(result.raw.contains_key_deep("Confidence"));
}

#[test]
fn test_pretty_output() {
    let node = sanitize_str(r#"{"a": {"Geometry": 1, "b": 2}}"#, "Geometry").unwrap();
    let pretty = to_json(&node, JsonFormat::Pretty).unwrap();

    assert_eq!(pretty, "{\n  \"a\": {\n    \"b\": 2\n  }\n}");
}
