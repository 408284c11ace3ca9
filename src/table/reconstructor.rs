//! TABLE block → [`TableGrid`].

use super::{cell_text, TableGrid};
use crate::error::{Error, Result};
use crate::graph::BlockLookup;
use crate::model::{Block, BlockType};
use serde_json::Number;

/// Grid and confidence scores of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableReconstruction {
    /// Cell text by row and column
    pub grid: TableGrid,

    /// Cell confidences as text, in traversal order (not grid order)
    pub scores: Vec<String>,
}

impl TableReconstruction {
    /// Mean cell confidence, if any cell was seen.
    pub fn mean_confidence(&self) -> Option<f64> {
        let values: Vec<f64> = self.scores.iter().filter_map(|s| s.parse().ok()).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

/// Rebuilds table grids from CELL relationships.
pub struct TableReconstructor<'l> {
    lookup: &'l dyn BlockLookup,
}

impl<'l> TableReconstructor<'l> {
    /// Create a reconstructor over an id lookup.
    pub fn new(lookup: &'l dyn BlockLookup) -> Self {
        Self { lookup }
    }

    /// Reconstruct one TABLE block.
    ///
    /// Row and column indices are taken as reported by the analyzer. Any
    /// dangling id fails the whole table; a partial grid is never returned.
    pub fn reconstruct(&self, table: &Block) -> Result<TableReconstruction> {
        if !table.is(&BlockType::Table) {
            return Err(Error::malformed(
                &table.id,
                format!("expected TABLE block, found {}", table.block_type),
            ));
        }

        let mut result = TableReconstruction::default();

        for child_id in table.child_ids() {
            let cell = self.lookup.resolve(child_id)?;
            if !cell.is(&BlockType::Cell) {
                continue;
            }

            let (row, column) = cell.require_position()?;
            let confidence = cell.require_confidence()?;

            result.grid.ensure_row(row);
            result.scores.push(format_score(confidence));
            let text = cell_text(cell, self.lookup)?;
            result.grid.insert(row, column, text);
        }

        log::debug!(
            "Table {}: {} rows, {} cells",
            table.id,
            result.grid.row_count(),
            result.grid.cell_count()
        );

        Ok(result)
    }
}

/// Confidence as text, in the form the analyzer wrote it: floats keep
/// their fraction (`99.5`, `100.0`), integers stay integral (`99`).
pub fn format_score(confidence: &Number) -> String {
    confidence.to_string()
}
