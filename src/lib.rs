//! # untextract
//!
//! Structured data from document-analysis block graphs.
//!
//! A document analyzer returns a flat list of "blocks" (words, lines,
//! selection marks, cells, tables) linked by typed relationships. This
//! library rebuilds the tables as semicolon-delimited text and produces
//! sanitized copies of whole responses with noisy fields (such as
//! `Geometry`) removed at every depth.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untextract::{parse_file, render};
//!
//! fn main() -> untextract::Result<()> {
//!     // Load a saved analyzer response
//!     let response = parse_file("analysis.json")?;
//!
//!     // Render every table
//!     let options = render::RenderOptions::default();
//!     let text = render::to_table_text(&response, &options)?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table reconstruction**: CELL row/column indices → delimited text
//! - **Field stripping**: order-preserving removal of a key at every depth
//! - **Line extraction**: LINE text and pixel-space bounding boxes
//! - **Expense summaries**: label/value detections with confidences
//! - **Parallel processing**: Uses Rayon across the tables of a response

pub mod analyze;
pub mod error;
pub mod expense;
pub mod graph;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod table;

// Re-export commonly used types
pub use analyze::{DocumentAnalyzer, Extractor, FeatureType, RecordedAnalyzer};
pub use error::{Error, Result};
pub use expense::{summary_fields, Detection, ExpenseExtraction, SummaryField};
pub use graph::{BlockGraphIndex, BlockLookup};
pub use model::{
    AnalyzeResponse, Block, BlockType, BoundingBox, Geometry, Node, Relationship,
    RelationshipType, SelectionStatus,
};
pub use render::{
    ErrorMode, ImageSize, JsonFormat, LineRegion, RenderOptions, RenderResult, TableSetRenderer,
    TableStats, NO_TABLE_MARKER,
};
pub use sanitize::{strip_field, strip_fields, strip_geometry, GEOMETRY_FIELD};
pub use table::{TableGrid, TableReconstruction, TableReconstructor};

use std::fs;
use std::io::Read;
use std::path::Path;

/// Parse analyzer JSON text.
///
/// # Example
///
/// ```
/// let response = untextract::parse_str(r#"{"Blocks": []}"#).unwrap();
/// assert!(response.is_empty());
/// ```
pub fn parse_str(json: &str) -> Result<AnalyzeResponse> {
    AnalyzeResponse::from_json(json)
}

/// Parse a saved analyzer response from a file.
///
/// # Example
///
/// ```no_run
/// use untextract::parse_file;
///
/// let response = parse_file("analysis.json").unwrap();
/// println!("Blocks: {}", response.blocks.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<AnalyzeResponse> {
    let file = fs::File::open(path)?;
    AnalyzeResponse::from_reader(std::io::BufReader::new(file))
}

/// Parse analyzer JSON from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<AnalyzeResponse> {
    AnalyzeResponse::from_reader(reader)
}

/// Render every table of a saved response with default options.
///
/// # Example
///
/// ```no_run
/// let text = untextract::extract_tables("analysis.json").unwrap();
/// std::fs::write("tables.txt", text).unwrap();
/// ```
pub fn extract_tables<P: AsRef<Path>>(path: P) -> Result<String> {
    let response = parse_file(path)?;
    render::to_table_text(&response, &RenderOptions::default())
}

/// Parse JSON text and strip one field at every depth.
///
/// # Example
///
/// ```
/// let node = untextract::sanitize_str(r#"{"Geometry": {}, "Text": "x"}"#, "Geometry").unwrap();
/// assert_eq!(node.keys(), vec!["Text"]);
/// ```
pub fn sanitize_str(json: &str, field: &str) -> Result<Node> {
    let node = Node::from_json_str(json)?;
    Ok(strip_field(&node, field))
}

/// Read a JSON file and strip one field at every depth.
pub fn sanitize_file<P: AsRef<Path>>(path: P, field: &str) -> Result<Node> {
    let json = fs::read_to_string(path)?;
    sanitize_str(&json, field)
}

/// Builder for processing analyzer responses.
///
/// # Example
///
/// ```no_run
/// use untextract::Untextract;
///
/// let tables = Untextract::new()
///     .with_table_labels()
///     .lenient()
///     .parse("analysis.json")?
///     .to_tables()?;
/// # Ok::<(), untextract::Error>(())
/// ```
pub struct Untextract {
    render_options: RenderOptions,
    strip_fields: Vec<String>,
}

impl Untextract {
    /// Create a new builder. `Geometry` is stripped by default.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            strip_fields: vec![GEOMETRY_FIELD.to_string()],
        }
    }

    /// Skip tables that cannot be reconstructed.
    pub fn lenient(mut self) -> Self {
        self.render_options = self.render_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Write `Table_<n>` before each table.
    pub fn with_table_labels(mut self) -> Self {
        self.render_options = self.render_options.with_table_labels(true);
        self
    }

    /// Sort cells by numeric row/column before rendering.
    pub fn with_sorted_cells(mut self) -> Self {
        self.render_options = self.render_options.with_sorted_cells(true);
        self
    }

    /// Set the cell delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.render_options = self.render_options.with_delimiter(delimiter);
        self
    }

    /// Replace the set of fields removed from sanitized output.
    pub fn with_strip_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.strip_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Load a saved response from a file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UntextractResult> {
        let json = fs::read_to_string(path)?;
        self.parse_str(&json)
    }

    /// Load a response from JSON text.
    pub fn parse_str(self, json: &str) -> Result<UntextractResult> {
        let raw = Node::from_json_str(json)?;
        let response = AnalyzeResponse::from_json(json)?;
        Ok(UntextractResult {
            response,
            raw,
            render_options: self.render_options,
            strip_fields: self.strip_fields,
        })
    }
}

impl Default for Untextract {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded analyzer response.
pub struct UntextractResult {
    /// Typed view of the response
    pub response: AnalyzeResponse,
    /// Untyped, order-preserving view of the response
    pub raw: Node,
    render_options: RenderOptions,
    strip_fields: Vec<String>,
}

impl UntextractResult {
    /// Render every table.
    pub fn to_tables(&self) -> Result<String> {
        render::to_table_text(&self.response, &self.render_options)
    }

    /// Render every table and report statistics.
    pub fn to_tables_with_stats(&self) -> Result<RenderResult> {
        let index = BlockGraphIndex::build(&self.response.blocks);
        TableSetRenderer::new(self.render_options.clone())
            .render_with_stats(&self.response.blocks, &index)
    }

    /// Copy of the response without the configured fields.
    pub fn sanitized(&self) -> Node {
        let fields: Vec<&str> = self.strip_fields.iter().map(String::as_str).collect();
        strip_fields(&self.raw, &fields)
    }

    /// Sanitized response as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.sanitized(), format)
    }

    /// Text of the first LINE block.
    pub fn first_line(&self) -> Option<&str> {
        render::first_line_text(&self.response.blocks)
    }

    /// LINE blocks projected onto an image.
    pub fn line_regions(&self, size: ImageSize) -> Result<Vec<LineRegion>> {
        render::line_regions(&self.response.blocks, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "DocumentMetadata": {"Pages": 1},
        "Blocks": [
            {"BlockType": "LINE", "Id": "l1", "Text": "Qty Price",
             "Geometry": {"BoundingBox": {"Width": 0.5, "Height": 0.25, "Left": 0.25, "Top": 0.5}}},
            {"BlockType": "TABLE", "Id": "t1", "Relationships": [{"Type": "CHILD", "Ids": ["c1", "c2"]}]},
            {"BlockType": "CELL", "Id": "c1", "RowIndex": 1, "ColumnIndex": 1, "Confidence": 99.0,
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
            {"BlockType": "CELL", "Id": "c2", "RowIndex": 1, "ColumnIndex": 2, "Confidence": 98.0,
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
            {"BlockType": "WORD", "Id": "w1", "Text": "2"},
            {"BlockType": "WORD", "Id": "w2", "Text": "3,500"}
        ]
    }"#;

    #[test]
    fn test_untextract_builder() {
        let builder = Untextract::new().lenient().with_table_labels();
        assert_eq!(builder.render_options.error_mode, ErrorMode::Lenient);
        assert!(builder.render_options.include_table_labels);
        assert_eq!(builder.strip_fields, vec!["Geometry"]);
    }

    #[test]
    fn test_untextract_builder_chained() {
        let builder = Untextract::default()
            .sequential()
            .with_sorted_cells()
            .with_delimiter('|')
            .with_strip_fields(["Geometry", "Polygon"]);

        assert!(!builder.render_options.parallel);
        assert!(builder.render_options.sort_cells);
        assert_eq!(builder.render_options.delimiter, '|');
        assert_eq!(builder.strip_fields.len(), 2);
    }

    #[test]
    fn test_parse_str_and_render() {
        let result = Untextract::new().parse_str(SAMPLE).unwrap();

        assert_eq!(result.to_tables().unwrap(), "2 ;\"3,500\" ;\n\n\n");
        assert_eq!(result.first_line(), Some("Qty Price"));
        assert!(!result.sanitized().contains_key_deep("Geometry"));
        assert_eq!(result.raw.keys(), vec!["DocumentMetadata", "Blocks"]);
    }

    #[test]
    fn test_result_stats() {
        let result = Untextract::new().parse_str(SAMPLE).unwrap();
        let rendered = result.to_tables_with_stats().unwrap();
        assert_eq!(rendered.stats.table_count, 1);
        assert_eq!(rendered.stats.cell_count, 2);
    }

    #[test]
    fn test_result_line_regions() {
        let result = Untextract::new().parse_str(SAMPLE).unwrap();
        let regions = result.line_regions(ImageSize::new(100, 100)).unwrap();
        assert_eq!(regions[0].rect.x1, 25);
        assert_eq!(regions[0].rect.y2, 75);
    }

    #[test]
    fn test_result_json_compact() {
        let result = Untextract::new().parse_str(r#"{"Blocks": [], "Geometry": 1}"#).unwrap();
        assert_eq!(result.to_json(JsonFormat::Compact).unwrap(), r#"{"Blocks":[]}"#);
    }

    #[test]
    fn test_parse_str_invalid() {
        assert!(matches!(parse_str("{"), Err(Error::Json(_))));
        assert!(Untextract::new().parse_str("[1, 2").is_err());
    }

    #[test]
    fn test_sanitize_str() {
        let node = sanitize_str(r#"{"a": {"Geometry": 1, "b": 2}}"#, "Geometry").unwrap();
        assert_eq!(node, Node::from_json_str(r#"{"a": {"b": 2}}"#).unwrap());
    }

    #[test]
    fn test_no_table_marker_reexport() {
        let response = parse_str(r#"{"Blocks": [{"BlockType": "PAGE", "Id": "p"}]}"#).unwrap();
        let text = render::to_table_text(&response, &RenderOptions::default()).unwrap();
        assert_eq!(text, NO_TABLE_MARKER);
    }
}
