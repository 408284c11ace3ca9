//! Table reconstruction from CELL relationships.

mod cell_text;
mod grid;
mod reconstructor;

pub use cell_text::{cell_text, is_grouped_numeral, SELECTED_MARK};
pub use grid::{GridRow, TableGrid, DEFAULT_DELIMITER};
pub use reconstructor::{format_score, TableReconstruction, TableReconstructor};
