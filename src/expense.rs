//! Expense-analysis responses: sanitized copies and summary fields.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{Error, Result};
use crate::model::Node;
use crate::sanitize::strip_geometry;
use crate::table::format_score;

/// Raw expense response together with its geometry-free copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseExtraction {
    /// Response as returned by the analyzer
    pub raw: Node,
    /// Same response without `Geometry` fields
    pub cleaned: Node,
}

impl ExpenseExtraction {
    /// Build from a raw response.
    pub fn from_response(raw: Node) -> Self {
        let cleaned = strip_geometry(&raw);
        Self { raw, cleaned }
    }

    /// Summary fields of every expense document in the raw response.
    pub fn summary_fields(&self) -> Result<Vec<SummaryField>> {
        summary_fields(&self.raw)
    }
}

/// Detected text with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub text: String,
    pub confidence: Number,
}

/// One summary field (vendor name, total, due date, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryField {
    /// Normalized field type, such as `TOTAL`
    pub field_type: Option<String>,
    /// The printed label, when one was detected
    pub label: Option<Detection>,
    /// The printed value, when one was detected
    pub value: Option<Detection>,
    /// Page the field was found on
    pub page_number: Option<u64>,
}

impl SummaryField {
    /// Two-line human-readable report of the label and value detections.
    pub fn describe(&self) -> String {
        let label = match &self.label {
            Some(d) => format!(
                "Summary Label Detection - Confidence: {}, Summary Values: {}",
                format_score(&d.confidence),
                d.text
            ),
            None => "Label Detection - No labels returned.".to_string(),
        };
        let value = match &self.value {
            Some(d) => format!(
                "Summary Value Detection - Confidence: {}, Summary Values: {}",
                format_score(&d.confidence),
                d.text
            ),
            None => "Value Detection - No values returned".to_string(),
        };
        format!("{}\n{}", label, value)
    }
}

/// Collect `ExpenseDocuments[*].SummaryFields[*]` from an expense response.
pub fn summary_fields(response: &Node) -> Result<Vec<SummaryField>> {
    let documents = match response.get("ExpenseDocuments") {
        Some(node) => node
            .as_array()
            .ok_or_else(|| Error::malformed("ExpenseDocuments", "expected an array"))?,
        None => return Ok(Vec::new()),
    };

    let mut fields = Vec::new();
    for (doc_index, document) in documents.iter().enumerate() {
        let Some(summary) = document.get("SummaryFields") else {
            continue;
        };
        let summary = summary.as_array().ok_or_else(|| {
            Error::malformed(
                format!("ExpenseDocuments[{}].SummaryFields", doc_index),
                "expected an array",
            )
        })?;

        for (field_index, field) in summary.iter().enumerate() {
            let path = format!("ExpenseDocuments[{}].SummaryFields[{}]", doc_index, field_index);
            fields.push(SummaryField {
                field_type: field
                    .get("Type")
                    .and_then(|t| t.get("Text"))
                    .and_then(Node::as_str)
                    .map(str::to_string),
                label: detection(field, "LabelDetection", &path)?,
                value: detection(field, "ValueDetection", &path)?,
                page_number: field.get("PageNumber").and_then(Node::as_u64),
            });
        }
    }

    log::debug!("Found {} expense summary fields", fields.len());
    Ok(fields)
}

fn detection(field: &Node, key: &str, path: &str) -> Result<Option<Detection>> {
    let Some(node) = field.get(key) else {
        return Ok(None);
    };
    let text = node
        .get("Text")
        .and_then(Node::as_str)
        .ok_or_else(|| Error::malformed(format!("{}.{}", path, key), "missing Text"))?;
    let confidence = node
        .get("Confidence")
        .and_then(Node::as_number)
        .cloned()
        .ok_or_else(|| Error::malformed(format!("{}.{}", path, key), "missing Confidence"))?;

    Ok(Some(Detection {
        text: text.to_string(),
        confidence,
    }))
}
