//! Block types.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::fmt;

/// A single element detected by the analyzer (word, line, cell, table, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Unique block identifier
    pub id: String,

    /// Kind of element
    pub block_type: BlockType,

    /// Recognized text (WORD and LINE blocks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Handwritten or printed, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,

    /// Confidence score, 0-100, kept as written (`99` and `99.0` differ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Number>,

    /// Row of a CELL (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// Column of a CELL (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Number of rows a CELL spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Number of columns a CELL spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    /// Status of a SELECTION_ELEMENT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    /// Entity tags such as KEY / VALUE or COLUMN_HEADER
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<String>>,

    /// Page the block was found on (multi-page documents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Position on the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    /// Typed links to other blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Create a block with only an id and a type.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            text_type: None,
            confidence: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            selection_status: None,
            entity_types: None,
            page: None,
            geometry: None,
            relationships: Vec::new(),
        }
    }

    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Word).with_text(text)
    }

    /// Create a LINE block.
    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Line).with_text(text)
    }

    /// Create a CELL block at the given 1-based position.
    ///
    /// A non-finite confidence is dropped.
    pub fn cell(id: impl Into<String>, row: u32, column: u32, confidence: f64) -> Self {
        Self {
            row_index: Some(row),
            column_index: Some(column),
            confidence: Number::from_f64(confidence),
            ..Self::new(id, BlockType::Cell)
        }
    }

    /// Create a TABLE block.
    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::Table)
    }

    /// Create a SELECTION_ELEMENT block.
    pub fn selection(id: impl Into<String>, status: SelectionStatus) -> Self {
        Self {
            selection_status: Some(status),
            ..Self::new(id, BlockType::SelectionElement)
        }
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set geometry and return self.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Append a CHILD relationship and return self.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships.push(Relationship::child(ids));
        self
    }

    /// Append a relationship and return self.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Check the block type.
    pub fn is(&self, block_type: &BlockType) -> bool {
        &self.block_type == block_type
    }

    /// Ids of all CHILD relationships, in relationship order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Text of the block, or a malformed-block error.
    pub fn require_text(&self) -> Result<&str> {
        self.text
            .as_deref()
            .ok_or_else(|| Error::malformed(&self.id, format!("{} block has no Text", self.block_type)))
    }

    /// Confidence of the block, or a malformed-block error.
    pub fn require_confidence(&self) -> Result<&Number> {
        self.confidence
            .as_ref()
            .ok_or_else(|| Error::malformed(&self.id, format!("{} block has no Confidence", self.block_type)))
    }

    /// Row and column of a CELL, or a malformed-block error.
    pub fn require_position(&self) -> Result<(u32, u32)> {
        match (self.row_index, self.column_index) {
            (Some(row), Some(column)) => Ok((row, column)),
            (None, _) => Err(Error::malformed(&self.id, "CELL block has no RowIndex")),
            (_, None) => Err(Error::malformed(&self.id, "CELL block has no ColumnIndex")),
        }
    }

    /// Selection status, or a malformed-block error.
    pub fn require_selection_status(&self) -> Result<SelectionStatus> {
        self.selection_status
            .ok_or_else(|| Error::malformed(&self.id, "SELECTION_ELEMENT block has no SelectionStatus"))
    }

    /// Bounding box, or a malformed-block error when the block has no
    /// geometry or its geometry has no box.
    pub fn require_bounding_box(&self) -> Result<BoundingBox> {
        self.geometry
            .as_ref()
            .and_then(|g| g.bounding_box)
            .ok_or_else(|| Error::malformed(&self.id, format!("{} block has no BoundingBox", self.block_type)))
    }
}

/// Block type tag.
///
/// Unknown tags are kept verbatim in [`BlockType::Other`] so newer analyzer
/// versions do not break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    MergedCell,
    SelectionElement,
    KeyValueSet,
    Title,
    Query,
    QueryResult,
    Signature,
    TableTitle,
    TableFooter,
    Other(String),
}

impl BlockType {
    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            "TABLE" => BlockType::Table,
            "CELL" => BlockType::Cell,
            "MERGED_CELL" => BlockType::MergedCell,
            "SELECTION_ELEMENT" => BlockType::SelectionElement,
            "KEY_VALUE_SET" => BlockType::KeyValueSet,
            "TITLE" => BlockType::Title,
            "QUERY" => BlockType::Query,
            "QUERY_RESULT" => BlockType::QueryResult,
            "SIGNATURE" => BlockType::Signature,
            "TABLE_TITLE" => BlockType::TableTitle,
            "TABLE_FOOTER" => BlockType::TableFooter,
            other => BlockType::Other(other.to_string()),
        }
    }

    /// Wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::MergedCell => "MERGED_CELL",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::KeyValueSet => "KEY_VALUE_SET",
            BlockType::Title => "TITLE",
            BlockType::Query => "QUERY",
            BlockType::QueryResult => "QUERY_RESULT",
            BlockType::Signature => "SIGNATURE",
            BlockType::TableTitle => "TABLE_TITLE",
            BlockType::TableFooter => "TABLE_FOOTER",
            BlockType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(BlockType::from_tag(&tag))
    }
}

/// A typed, ordered link from one block to others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    /// Relationship kind
    #[serde(rename = "Type")]
    pub relationship_type: RelationshipType,

    /// Referenced block ids, in document order
    #[serde(default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship.
    pub fn new<S: Into<String>>(
        relationship_type: RelationshipType,
        ids: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            relationship_type,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a CHILD relationship.
    pub fn child<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(RelationshipType::Child, ids)
    }
}

/// Relationship type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Child,
    Value,
    ComplexFeatures,
    MergedCell,
    Title,
    Answer,
    Table,
    TableTitle,
    TableFooter,
    Other(String),
}

impl RelationshipType {
    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CHILD" => RelationshipType::Child,
            "VALUE" => RelationshipType::Value,
            "COMPLEX_FEATURES" => RelationshipType::ComplexFeatures,
            "MERGED_CELL" => RelationshipType::MergedCell,
            "TITLE" => RelationshipType::Title,
            "ANSWER" => RelationshipType::Answer,
            "TABLE" => RelationshipType::Table,
            "TABLE_TITLE" => RelationshipType::TableTitle,
            "TABLE_FOOTER" => RelationshipType::TableFooter,
            other => RelationshipType::Other(other.to_string()),
        }
    }

    /// Wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipType::Child => "CHILD",
            RelationshipType::Value => "VALUE",
            RelationshipType::ComplexFeatures => "COMPLEX_FEATURES",
            RelationshipType::MergedCell => "MERGED_CELL",
            RelationshipType::Title => "TITLE",
            RelationshipType::Answer => "ANSWER",
            RelationshipType::Table => "TABLE",
            RelationshipType::TableTitle => "TABLE_TITLE",
            RelationshipType::TableFooter => "TABLE_FOOTER",
            RelationshipType::Other(tag) => tag,
        }
    }
}

impl Serialize for RelationshipType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelationshipType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(RelationshipType::from_tag(&tag))
    }
}

/// Status of a checkbox or radio-style mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// The mark is checked
    Selected,
    /// The mark is empty
    NotSelected,
}

/// Location of a block on its page, as ratios of the page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    /// Axis-aligned bounding box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Fine-grained outline
    #[serde(default)]
    pub polygon: Vec<Point>,
}

impl Geometry {
    /// Create a geometry from a bounding box alone.
    pub fn from_box(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box: Some(bounding_box),
            polygon: Vec::new(),
        }
    }
}

/// Axis-aligned box; all values are ratios of the page width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// Polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_cell() {
        let json = r#"{
            "BlockType": "CELL",
            "Id": "c1",
            "Confidence": 98.5,
            "RowIndex": 2,
            "ColumnIndex": 3,
            "RowSpan": 1,
            "ColumnSpan": 1,
            "Relationships": [{"Type": "CHILD", "Ids": ["w1", "w2"]}]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.block_type, BlockType::Cell);
        assert_eq!(block.require_position().unwrap(), (2, 3));
        assert_eq!(block.require_confidence().unwrap().as_f64(), Some(98.5));
        assert_eq!(block.child_ids().collect::<Vec<_>>(), vec!["w1", "w2"]);
    }

    #[test]
    fn test_unknown_tags_are_kept() {
        let json = r#"{
            "BlockType": "LAYOUT_TEXT",
            "Id": "x",
            "Relationships": [{"Type": "SOMETHING_NEW", "Ids": ["a"]}]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.block_type, BlockType::Other("LAYOUT_TEXT".into()));
        assert_eq!(block.block_type.to_string(), "LAYOUT_TEXT");
        assert_eq!(block.child_ids().count(), 0);
    }

    #[test]
    fn test_missing_relationships_default_to_empty() {
        let block: Block = serde_json::from_str(r#"{"BlockType": "WORD", "Id": "w"}"#).unwrap();
        assert!(block.relationships.is_empty());
        assert!(block.text.is_none());
    }

    #[test]
    fn test_selection_status_wire_names() {
        let block: Block = serde_json::from_str(
            r#"{"BlockType": "SELECTION_ELEMENT", "Id": "s", "SelectionStatus": "NOT_SELECTED"}"#,
        )
        .unwrap();
        assert_eq!(block.selection_status, Some(SelectionStatus::NotSelected));

        let bad = serde_json::from_str::<Block>(
            r#"{"BlockType": "SELECTION_ELEMENT", "Id": "s", "SelectionStatus": "MAYBE"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_require_errors() {
        let word = Block::new("w1", BlockType::Word);
        assert!(matches!(
            word.require_text(),
            Err(Error::MalformedBlock { ref id, .. }) if id == "w1"
        ));

        let cell = Block::new("c1", BlockType::Cell);
        assert!(cell.require_position().is_err());
        assert!(cell.require_confidence().is_err());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let block = Block::cell("c1", 1, 2, 90.0).with_children(["w1"]);
        let json = serde_json::to_string(&block).unwrap();

        assert!(json.contains("\"BlockType\":\"CELL\""));
        assert!(json.contains("\"RowIndex\":1"));
        assert!(json.contains("\"Type\":\"CHILD\""));
        assert!(!json.contains("Geometry"));
    }

    #[test]
    fn test_geometry_without_bounding_box() {
        let block: Block = serde_json::from_str(
            r#"{"BlockType": "PAGE", "Id": "p", "Geometry": {"Polygon": []}}"#,
        )
        .unwrap();

        assert!(block.geometry.is_some());
        assert!(matches!(
            block.require_bounding_box(),
            Err(Error::MalformedBlock { ref id, .. }) if id == "p"
        ));
        assert!(Block::word("w", "x").require_bounding_box().is_err());
    }

    #[test]
    fn test_confidence_keeps_number_form() {
        let integral: Block =
            serde_json::from_str(r#"{"BlockType": "CELL", "Id": "c", "Confidence": 99}"#).unwrap();
        let float: Block =
            serde_json::from_str(r#"{"BlockType": "CELL", "Id": "c", "Confidence": 99.0}"#).unwrap();

        assert_eq!(integral.require_confidence().unwrap().to_string(), "99");
        assert_eq!(float.require_confidence().unwrap().to_string(), "99.0");
        assert!(Block::cell("c", 1, 1, f64::NAN).confidence.is_none());
    }
}
