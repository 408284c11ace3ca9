//! Rendering options and configuration.

use crate::table::DEFAULT_DELIMITER;

/// Default text placed after every rendered table.
pub const DEFAULT_TABLE_SEPARATOR: &str = "\n\n";

/// Options for rendering table sets.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Character written after every cell
    pub delimiter: char,

    /// Text written after every table (including the last)
    pub table_separator: String,

    /// Write a `Table_<n>` line before each table
    pub include_table_labels: bool,

    /// Sort rows and columns by numeric index before rendering
    pub sort_cells: bool,

    /// Reconstruct tables on the rayon thread pool
    pub parallel: bool,

    /// What to do when a table cannot be reconstructed
    pub error_mode: ErrorMode,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the text written after each table.
    pub fn with_table_separator(mut self, separator: impl Into<String>) -> Self {
        self.table_separator = separator.into();
        self
    }

    /// Enable or disable `Table_<n>` labels.
    pub fn with_table_labels(mut self, include: bool) -> Self {
        self.include_table_labels = include;
        self
    }

    /// Enable or disable numeric sorting of cells.
    pub fn with_sorted_cells(mut self, sort: bool) -> Self {
        self.sort_cells = sort;
        self
    }

    /// Enable or disable parallel reconstruction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel reconstruction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip tables that fail).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            table_separator: DEFAULT_TABLE_SEPARATOR.to_string(),
            include_table_labels: false,
            sort_cells: false,
            parallel: true,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Error handling mode during table rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first table that cannot be reconstructed
    #[default]
    Strict,
    /// Log and skip tables that cannot be reconstructed
    Lenient,
}
