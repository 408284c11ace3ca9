//! Document-analysis collaborator interface and the extraction pipeline.
//!
//! The analysis engine itself lives outside this crate. [`DocumentAnalyzer`]
//! is the seam: production code plugs in a service client, tests and
//! offline tools use [`RecordedAnalyzer`] to replay saved responses.
//!
//! # Example
//!
//! ```no_run
//! use untextract::analyze::{Extractor, RecordedAnalyzer};
//!
//! fn main() -> untextract::Result<()> {
//!     let analyzer = RecordedAnalyzer::new().with_document_file("analysis.json")?;
//!     let extractor = Extractor::new(analyzer);
//!
//!     let tables = extractor.tables(b"<image bytes>")?;
//!     println!("{}", tables);
//!     Ok(())
//! }
//! ```

mod recorded;

pub use recorded::RecordedAnalyzer;

use crate::error::{Error, Result};
use crate::expense::ExpenseExtraction;
use crate::model::{AnalyzeResponse, Node};
use crate::render::{
    first_line_text, line_regions, to_table_text, ImageSize, LineRegion, RenderOptions,
};

/// Analysis features that can be requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    Tables,
    Forms,
    Queries,
    Signatures,
    Layout,
}

impl FeatureType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Tables => "TABLES",
            FeatureType::Forms => "FORMS",
            FeatureType::Queries => "QUERIES",
            FeatureType::Signatures => "SIGNATURES",
            FeatureType::Layout => "LAYOUT",
        }
    }
}

/// Trait for document-analysis engines.
///
/// Implementations report their own failures as [`Error::Analyzer`].
pub trait DocumentAnalyzer: Send + Sync {
    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Plain text detection (PAGE / LINE / WORD blocks).
    fn detect_text(&self, document: &[u8]) -> Result<AnalyzeResponse>;

    /// Structured analysis with the requested features.
    fn analyze_document(&self, document: &[u8], features: &[FeatureType]) -> Result<AnalyzeResponse>;

    /// Expense (invoice / receipt) analysis. The response shape is not
    /// fixed, so it is returned as a [`Node`].
    fn analyze_expense(&self, document: &[u8]) -> Result<Node>;
}

/// Runs an analyzer and turns its output into tables, lines or sanitized
/// expense data.
pub struct Extractor<A: DocumentAnalyzer> {
    analyzer: A,
    render_options: RenderOptions,
}

impl<A: DocumentAnalyzer> Extractor<A> {
    /// Create an extractor with default render options.
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            render_options: RenderOptions::default(),
        }
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Get the analyzer.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Analyze for tables and render them as delimited text.
    pub fn tables(&self, document: &[u8]) -> Result<String> {
        let response = self
            .analyzer
            .analyze_document(document, &[FeatureType::Tables])
            .map_err(|e| self.log_failure("analyze_document", e))?;
        log::info!("Detected {} blocks", response.blocks.len());

        to_table_text(&response, &self.render_options)
    }

    /// Analyze an expense document; keep the raw response and a copy
    /// without geometry.
    pub fn expense(&self, document: &[u8]) -> Result<ExpenseExtraction> {
        let raw = self
            .analyzer
            .analyze_expense(document)
            .map_err(|e| self.log_failure("analyze_expense", e))?;
        Ok(ExpenseExtraction::from_response(raw))
    }

    /// Text of the first detected line, if any.
    pub fn first_line(&self, document: &[u8]) -> Result<Option<String>> {
        let response = self.detect(document)?;
        Ok(first_line_text(&response.blocks).map(str::to_string))
    }

    /// Every detected line with its pixel rectangle.
    pub fn line_regions(&self, document: &[u8], size: ImageSize) -> Result<Vec<LineRegion>> {
        let response = self.detect(document)?;
        line_regions(&response.blocks, size)
    }

    fn detect(&self, document: &[u8]) -> Result<AnalyzeResponse> {
        let response = self
            .analyzer
            .detect_text(document)
            .map_err(|e| self.log_failure("detect_text", e))?;
        log::info!("Detected {} blocks", response.blocks.len());
        Ok(response)
    }

    fn log_failure(&self, call: &str, err: Error) -> Error {
        log::error!("{} {} failed: {}", self.analyzer.name(), call, err);
        err
    }
}
