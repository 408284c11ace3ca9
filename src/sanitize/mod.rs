//! Recursive removal of named fields from nested values.
//!
//! Analyzer responses carry bulky `Geometry` objects on nearly every
//! element. Downstream consumers only need the text and confidences, so the
//! geometry is stripped at every depth before the response is handed on.

use crate::model::Node;

/// Field removed by [`strip_geometry`].
pub const GEOMETRY_FIELD: &str = "Geometry";

/// Copy `node` with every mapping entry named `field` removed, at any depth.
///
/// Sequence length and order, and the order of retained keys, are
/// unchanged. The input is not modified.
pub fn strip_field(node: &Node, field: &str) -> Node {
    strip_fields(node, &[field])
}

/// Copy `node` with every mapping entry whose key is in `fields` removed.
pub fn strip_fields(node: &Node, fields: &[&str]) -> Node {
    match node {
        Node::Object(entries) => Node::Object(
            entries
                .iter()
                .filter(|(key, _)| !fields.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), strip_fields(value, fields)))
                .collect(),
        ),
        Node::Array(items) => Node::Array(items.iter().map(|item| strip_fields(item, fields)).collect()),
        scalar => scalar.clone(),
    }
}

/// Copy `node` without any `Geometry` field.
pub fn strip_geometry(node: &Node) -> Node {
    strip_field(node, GEOMETRY_FIELD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Node {
        Node::from_json_str(json).unwrap()
    }

    #[test]
    fn test_strip_geometry_from_blocks() {
        let input = parse(r#"{"Blocks": [{"Id":"1","Geometry":{"Left":0},"Text":"x"}]}"#);
        let expected = parse(r#"{"Blocks": [{"Id":"1","Text":"x"}]}"#);

        assert_eq!(strip_geometry(&input), expected);
    }

    #[test]
    fn test_input_untouched() {
        let input = parse(r#"{"Geometry": 1, "a": 2}"#);
        let before = input.clone();
        let _ = strip_geometry(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_nested_in_arrays_of_arrays() {
        let input = parse(r#"[[{"Geometry": {}, "k": [{"Geometry": null}]}], 3, "s"]"#);
        let output = strip_geometry(&input);

        assert_eq!(output, parse(r#"[[{"k": [{}]}], 3, "s"]"#));
        assert!(!output.contains_key_deep(GEOMETRY_FIELD));
    }

    #[test]
    fn test_idempotent() {
        let input = parse(r#"{"a": {"Geometry": 1, "b": [{"Geometry": 2, "c": 3}]}}"#);
        let once = strip_geometry(&input);
        let twice = strip_geometry(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_key_order_and_lengths_preserved() {
        let input = parse(r#"{"z": 1, "Geometry": 0, "y": [1, {"Geometry": 0}, 3], "x": 2}"#);
        let output = strip_geometry(&input);

        assert_eq!(output.keys(), vec!["z", "y", "x"]);
        assert_eq!(output.get("y").unwrap().as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_scalars_unchanged() {
        for json in ["null", "true", "1.5", "\"Geometry\""] {
            let node = parse(json);
            assert_eq!(strip_geometry(&node), node);
        }
    }

    #[test]
    fn test_strip_several_fields() {
        let input = parse(r#"{"Geometry": 1, "Polygon": 2, "Text": "t"}"#);
        let output = strip_fields(&input, &["Geometry", "Polygon"]);
        assert_eq!(output, parse(r#"{"Text": "t"}"#));
    }

    #[test]
    fn test_other_field_name() {
        let input = parse(r#"{"Confidence": 99, "Nested": {"Confidence": 1, "Geometry": 2}}"#);
        let output = strip_field(&input, "Confidence");
        assert_eq!(output, parse(r#"{"Nested": {"Geometry": 2}}"#));
    }
}
