//! Flattening a block's WORD / SELECTION_ELEMENT children into text.

use crate::error::Result;
use crate::graph::BlockLookup;
use crate::model::{Block, BlockType, SelectionStatus};

/// Token appended for a checked selection element.
pub const SELECTED_MARK: &str = "X";

/// Flatten the text of a CELL (or any block with CHILD words).
///
/// Every appended token is followed by one space, and the trailing space is
/// kept. Grouped numerals such as `1,200` are wrapped in double quotes so
/// the comma survives delimited output.
pub fn cell_text(block: &Block, lookup: &dyn BlockLookup) -> Result<String> {
    let mut text = String::new();

    for child_id in block.child_ids() {
        let child = lookup.resolve(child_id)?;
        match child.block_type {
            BlockType::Word => {
                let word = child.require_text()?;
                if is_grouped_numeral(word) {
                    text.push('"');
                    text.push_str(word);
                    text.push('"');
                } else {
                    text.push_str(word);
                }
                text.push(' ');
            }
            BlockType::SelectionElement => {
                if child.require_selection_status()? == SelectionStatus::Selected {
                    text.push_str(SELECTED_MARK);
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    Ok(text)
}

/// `true` for text like `1,234`: contains a comma and is numeric once the
/// commas are removed.
///
/// "Numeric" means Unicode `Nd`/`Nl`/`No` characters ([`char::is_numeric`]);
/// ideographic numerals such as `一` are letters and do not count.
pub fn is_grouped_numeral(word: &str) -> bool {
    if !word.contains(',') {
        return false;
    }
    let mut digits = word.chars().filter(|&c| c != ',').peekable();
    digits.peek().is_some() && digits.all(char::is_numeric)
}
