//! JSON rendering for sanitized responses.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value (typically a sanitized [`crate::Node`]) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn test_to_json_pretty() {
        let node = Node::object([("Blocks", Node::Array(vec![Node::from("x")]))]);

        let json = to_json(&node, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"Blocks\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let node = Node::object([("b", Node::from(1i64)), ("a", Node::Null)]);

        let json = to_json(&node, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"b":1,"a":null}"#);
    }
}
