//! Analyzer response envelope.

use super::{Block, BlockType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Output of a text-detection or document-analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalyzeResponse {
    /// Page count and similar facts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// All detected blocks, in document order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Model version reported by document analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze_document_model_version: Option<String>,

    /// Model version reported by text detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detect_document_text_model_version: Option<String>,
}

/// Document-level facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Number of pages analyzed
    #[serde(default)]
    pub pages: u32,
}

/// Envelope used while parsing; blocks are decoded one at a time so a bad
/// block can be reported by id.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawResponse {
    #[serde(default)]
    document_metadata: Option<DocumentMetadata>,
    #[serde(default)]
    blocks: Vec<serde_json::Value>,
    #[serde(default)]
    analyze_document_model_version: Option<String>,
    #[serde(default)]
    detect_document_text_model_version: Option<String>,
}

impl AnalyzeResponse {
    /// Create a response from blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Parse analyzer JSON.
    ///
    /// A block whose fields carry the wrong JSON type is reported as
    /// [`Error::MalformedBlock`] naming its `Id`, or `#<position>` when the
    /// id itself is unreadable.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawResponse = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parse analyzer JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawResponse = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawResponse) -> Result<Self> {
        let blocks = raw
            .blocks
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                let id = value
                    .get("Id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", position));
                serde_json::from_value::<Block>(value).map_err(|e| Error::malformed(id, e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Parsed analyzer response with {} blocks", blocks.len());

        Ok(Self {
            document_metadata: raw.document_metadata,
            blocks,
            analyze_document_model_version: raw.analyze_document_model_version,
            detect_document_text_model_version: raw.detect_document_text_model_version,
        })
    }

    /// Number of pages, when reported.
    pub fn page_count(&self) -> Option<u32> {
        self.document_metadata.as_ref().map(|m| m.pages)
    }

    /// Blocks of a given type, in document order.
    pub fn blocks_of<'a>(&'a self, block_type: &'a BlockType) -> impl Iterator<Item = &'a Block> + 'a {
        self.blocks.iter().filter(move |b| &b.block_type == block_type)
    }

    /// Number of TABLE blocks.
    pub fn table_count(&self) -> usize {
        self.blocks_of(&BlockType::Table).count()
    }

    /// Check if the response has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
