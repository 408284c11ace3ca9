//! Row/column text grid of one reconstructed table.

use serde::{Deserialize, Serialize};

/// Default cell terminator for delimited output.
pub const DEFAULT_DELIMITER: char = ';';

/// Cell text keyed by row, then column.
///
/// Rows and columns keep first-insertion order, which for analyzer output is
/// row-major. Missing cells are simply absent; no padding happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    rows: Vec<GridRow>,
}

/// One row of a [`TableGrid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    /// Analyzer row index (1-based)
    pub index: u32,

    /// `(column index, text)` pairs in insertion order
    pub cells: Vec<(u32, String)>,
}

impl GridRow {
    fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Text at a column.
    pub fn get(&self, column: u32) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, text)| text.as_str())
    }

    /// Render the row: every cell followed by the delimiter, then a newline.
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut line = String::new();
        for (_, text) in &self.cells {
            line.push_str(text);
            line.push(delimiter);
        }
        line.push('\n');
        line
    }
}

impl TableGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a row exists, creating it empty at the end if needed.
    pub fn ensure_row(&mut self, row: u32) -> &mut GridRow {
        let position = match self.rows.iter().position(|r| r.index == row) {
            Some(position) => position,
            None => {
                self.rows.push(GridRow::new(row));
                self.rows.len() - 1
            }
        };
        &mut self.rows[position]
    }

    /// Store text at `(row, column)`. Re-setting a cell replaces its text
    /// without moving it.
    pub fn insert(&mut self, row: u32, column: u32, text: String) {
        let grid_row = self.ensure_row(row);
        match grid_row.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = text,
            None => grid_row.cells.push((column, text)),
        }
    }

    /// Text at `(row, column)`.
    pub fn get(&self, row: u32, column: u32) -> Option<&str> {
        self.row(row).and_then(|r| r.get(column))
    }

    /// A row by analyzer index.
    pub fn row(&self, row: u32) -> Option<&GridRow> {
        self.rows.iter().find(|r| r.index == row)
    }

    /// Rows in iteration order.
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sort rows and columns by their numeric index.
    pub fn sort(&mut self) {
        self.rows.sort_by_key(|r| r.index);
        for row in &mut self.rows {
            row.cells.sort_by_key(|(c, _)| *c);
        }
    }

    /// Render the grid as delimited text, one line per row.
    pub fn to_delimited(&self, delimiter: char) -> String {
        self.rows.iter().map(|r| r.to_delimited(delimiter)).collect()
    }
}

impl std::fmt::Display for TableGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_delimited(DEFAULT_DELIMITER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rows() {
        let mut grid = TableGrid::new();
        grid.insert(1, 1, "A ".into());
        grid.insert(1, 2, "B ".into());
        grid.insert(2, 1, "C ".into());

        assert_eq!(grid.to_string(), "A ;B ;\nC ;\n");
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell_count(), 3);
        assert_eq!(grid.get(1, 2), Some("B "));
    }

    #[test]
    fn test_empty_grid_renders_nothing() {
        let grid = TableGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.to_delimited(';'), "");
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut grid = TableGrid::new();
        grid.insert(2, 2, "d".into());
        grid.insert(2, 1, "c".into());
        grid.insert(1, 1, "a".into());

        assert_eq!(grid.to_delimited(';'), "d;c;\na;\n");

        grid.sort();
        assert_eq!(grid.to_delimited(';'), "a;\nc;d;\n");
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut grid = TableGrid::new();
        grid.insert(1, 1, "old".into());
        grid.insert(1, 2, "b".into());
        grid.insert(1, 1, "new".into());

        assert_eq!(grid.to_delimited(','), "new,b,\n");
    }

    #[test]
    fn test_ensure_row_creates_empty_row() {
        let mut grid = TableGrid::new();
        grid.ensure_row(3);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.to_delimited(';'), "\n");
    }
}
