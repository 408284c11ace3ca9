//! Analyzer that replays saved responses.

use std::fs;
use std::path::Path;

use super::{DocumentAnalyzer, FeatureType};
use crate::error::{Error, Result};
use crate::model::{AnalyzeResponse, Node};

/// Replays previously saved analyzer JSON, ignoring the document bytes.
///
/// Useful for offline processing of stored responses and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordedAnalyzer {
    text: Option<String>,
    document: Option<String>,
    expense: Option<String>,
}

impl RecordedAnalyzer {
    /// Create an analyzer with no recordings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text-detection response.
    pub fn with_text_json(mut self, json: impl Into<String>) -> Self {
        self.text = Some(json.into());
        self
    }

    /// Set the document-analysis response.
    pub fn with_document_json(mut self, json: impl Into<String>) -> Self {
        self.document = Some(json.into());
        self
    }

    /// Set the expense-analysis response.
    pub fn with_expense_json(mut self, json: impl Into<String>) -> Self {
        self.expense = Some(json.into());
        self
    }

    /// Load the text-detection response from a file.
    pub fn with_text_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(self.with_text_json(fs::read_to_string(path)?))
    }

    /// Load the document-analysis response from a file.
    pub fn with_document_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(self.with_document_json(fs::read_to_string(path)?))
    }

    /// Load the expense-analysis response from a file.
    pub fn with_expense_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(self.with_expense_json(fs::read_to_string(path)?))
    }
}

fn recording<'a>(slot: &'a Option<String>, call: &str) -> Result<&'a str> {
    slot.as_deref()
        .ok_or_else(|| Error::Analyzer(format!("no recorded {} response", call)))
}

impl DocumentAnalyzer for RecordedAnalyzer {
    fn name(&self) -> &str {
        "recorded"
    }

    fn detect_text(&self, _document: &[u8]) -> Result<AnalyzeResponse> {
        AnalyzeResponse::from_json(recording(&self.text, "detect_text")?)
    }

    fn analyze_document(&self, _document: &[u8], features: &[FeatureType]) -> Result<AnalyzeResponse> {
        log::debug!(
            "Replaying analyze_document for features {:?}",
            features.iter().map(FeatureType::as_str).collect::<Vec<_>>()
        );
        AnalyzeResponse::from_json(recording(&self.document, "analyze_document")?)
    }

    fn analyze_expense(&self, _document: &[u8]) -> Result<Node> {
        let json = recording(&self.expense, "analyze_expense")?;
        Ok(Node::from_json_str(json)?)
    }
}
