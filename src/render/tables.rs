//! Rendering every table of a response as delimited text.

use rayon::prelude::*;

use crate::error::Result;
use crate::graph::{BlockGraphIndex, BlockLookup};
use crate::model::{AnalyzeResponse, Block, BlockType};
use crate::table::{TableGrid, TableReconstruction, TableReconstructor};

use super::{ErrorMode, RenderOptions, RenderResult, TableStats};

/// Output when a response contains no TABLE block.
pub const NO_TABLE_MARKER: &str = "<b> NO Table FOUND </b>";

/// Label of the table with the given 1-based ordinal.
pub fn table_label(ordinal: usize) -> String {
    format!("Table_{}", ordinal)
}

/// One reconstructed table of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedTable {
    /// Position among the response's tables (1-based)
    pub ordinal: usize,

    /// `Table_<ordinal>`
    pub label: String,

    /// Id of the TABLE block
    pub id: String,

    /// Cell text grid
    pub grid: TableGrid,

    /// Cell confidences as text, in traversal order
    pub scores: Vec<String>,
}

/// Reconstructs and renders all tables of a response.
#[derive(Debug, Clone, Default)]
pub struct TableSetRenderer {
    options: RenderOptions,
}

impl TableSetRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Rendering options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Reconstruct every TABLE block in document order.
    ///
    /// In lenient mode tables that fail are logged and left out; the
    /// ordinals of the remaining tables are unchanged.
    pub fn reconstruct_all(
        &self,
        blocks: &[Block],
        lookup: &dyn BlockLookup,
    ) -> Result<Vec<ReconstructedTable>> {
        self.reconstruct_with_stats(blocks, lookup)
            .map(|(tables, _)| tables)
    }

    fn reconstruct_with_stats(
        &self,
        blocks: &[Block],
        lookup: &dyn BlockLookup,
    ) -> Result<(Vec<ReconstructedTable>, TableStats)> {
        let tables: Vec<(usize, &Block)> = blocks
            .iter()
            .filter(|b| b.is(&BlockType::Table))
            .enumerate()
            .map(|(i, b)| (i + 1, b))
            .collect();

        let reconstructor = TableReconstructor::new(lookup);
        let outcomes: Vec<(usize, &Block, Result<TableReconstruction>)> = if self.options.parallel {
            tables
                .par_iter()
                .map(|&(ordinal, table)| (ordinal, table, reconstructor.reconstruct(table)))
                .collect()
        } else {
            tables
                .iter()
                .map(|&(ordinal, table)| (ordinal, table, reconstructor.reconstruct(table)))
                .collect()
        };

        let mut stats = TableStats::new();
        let mut reconstructed = Vec::with_capacity(outcomes.len());

        for (ordinal, table, outcome) in outcomes {
            stats.add_table();
            let mut reconstruction = match outcome {
                Ok(reconstruction) => reconstruction,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping table {} ({}): {}", ordinal, table.id, e);
                    stats.add_skipped();
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.options.sort_cells {
                reconstruction.grid.sort();
            }
            stats.count_table(reconstruction.grid.row_count(), &reconstruction.scores);

            reconstructed.push(ReconstructedTable {
                ordinal,
                label: table_label(ordinal),
                id: table.id.clone(),
                grid: reconstruction.grid,
                scores: reconstruction.scores,
            });
        }

        Ok((reconstructed, stats))
    }

    /// Render all tables, or [`NO_TABLE_MARKER`] when there are none.
    pub fn render(&self, blocks: &[Block], lookup: &dyn BlockLookup) -> Result<String> {
        self.render_with_stats(blocks, lookup).map(|r| r.content)
    }

    /// Render all tables and report statistics.
    pub fn render_with_stats(
        &self,
        blocks: &[Block],
        lookup: &dyn BlockLookup,
    ) -> Result<RenderResult> {
        let (tables, stats) = self.reconstruct_with_stats(blocks, lookup)?;

        if stats.table_count == 0 {
            return Ok(RenderResult::new(NO_TABLE_MARKER.to_string(), stats));
        }

        let mut output = String::new();
        for table in &tables {
            output.push_str(&self.render_table(table));
        }

        Ok(RenderResult::new(output, stats))
    }

    /// Render one table followed by the table separator.
    pub fn render_table(&self, table: &ReconstructedTable) -> String {
        let mut output = String::new();
        if self.options.include_table_labels {
            output.push_str(&table.label);
            output.push('\n');
        }
        output.push_str(&table.grid.to_delimited(self.options.delimiter));
        output.push_str(&self.options.table_separator);
        output
    }
}

/// Render every table of a parsed response.
pub fn to_table_text(response: &AnalyzeResponse, options: &RenderOptions) -> Result<String> {
    let index = BlockGraphIndex::build(&response.blocks);
    TableSetRenderer::new(options.clone()).render(&response.blocks, &index)
}
