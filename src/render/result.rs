//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a table set, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered text
    pub content: String,

    /// Reconstruction statistics
    pub stats: TableStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: TableStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected while reconstructing tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    /// TABLE blocks found in the response
    pub table_count: u32,

    /// Tables skipped in lenient mode
    pub skipped_count: u32,

    /// Rows across all rendered tables
    pub row_count: u32,

    /// Cells across all rendered tables
    pub cell_count: u32,

    /// Sum of cell confidences, for the mean
    confidence_sum: f64,
}

impl TableStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one found table.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Record one skipped table.
    pub fn add_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Record the rows and cell scores of a rendered table.
    pub fn count_table(&mut self, rows: usize, scores: &[String]) {
        self.row_count += rows as u32;
        self.cell_count += scores.len() as u32;
        self.confidence_sum += scores.iter().filter_map(|s| s.parse::<f64>().ok()).sum::<f64>();
    }

    /// Mean cell confidence across all tables.
    pub fn mean_confidence(&self) -> Option<f64> {
        if self.cell_count == 0 {
            None
        } else {
            Some(self.confidence_sum / self.cell_count as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_table() {
        let mut stats = TableStats::new();
        stats.add_table();
        stats.count_table(2, &["80.0".to_string(), "100.0".to_string()]);

        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.cell_count, 2);
        assert_eq!(stats.mean_confidence(), Some(90.0));
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(TableStats::new().mean_confidence(), None);
    }
}
