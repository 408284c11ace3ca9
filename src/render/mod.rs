//! Rendering module for turning reconstructed data into text.

mod json;
pub mod lines;
mod options;
mod result;
mod tables;

pub use json::{to_json, JsonFormat};
pub use lines::{first_line_text, line_regions, to_line_text, ImageSize, LineRegion, PixelRect};
pub use options::{ErrorMode, RenderOptions, DEFAULT_TABLE_SEPARATOR};
pub use result::{RenderResult, TableStats};
pub use tables::{table_label, to_table_text, ReconstructedTable, TableSetRenderer, NO_TABLE_MARKER};
