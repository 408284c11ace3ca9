//! LINE blocks: first line of text and pixel-space regions.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Block, BlockType};

/// Size of the image the analyzer looked at, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ImageSize {
    /// 1920×1080.
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Pixel rectangle, `(x1, y1)` top-left and `(x2, y2)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// Text of one LINE block with its pixel rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRegion {
    pub text: String,
    pub rect: PixelRect,
}

/// Text of the first LINE block, if any.
pub fn first_line_text(blocks: &[Block]) -> Option<&str> {
    blocks
        .iter()
        .find(|b| b.is(&BlockType::Line))
        .and_then(|b| b.text.as_deref())
}

/// Project every LINE's bounding box onto an image of the given size.
///
/// Coordinates are truncated toward zero. A LINE without text or without a
/// bounding box is a malformed block.
pub fn line_regions(blocks: &[Block], size: ImageSize) -> Result<Vec<LineRegion>> {
    let width = f64::from(size.width);
    let height = f64::from(size.height);

    blocks
        .iter()
        .filter(|b| b.is(&BlockType::Line))
        .map(|line| {
            let text = line.require_text()?.to_string();
            let bbox = line.require_bounding_box()?;
            let rect = PixelRect {
                x1: (bbox.left * width) as i64,
                y1: (bbox.top * height) as i64,
                x2: ((bbox.left + bbox.width) * width) as i64,
                y2: ((bbox.top + bbox.height) * height) as i64,
            };
            Ok(LineRegion { text, rect })
        })
        .collect()
}

/// Render regions one per line as `text<TAB>x1,y1,x2,y2`.
pub fn to_line_text(regions: &[LineRegion]) -> String {
    regions
        .iter()
        .map(|r| {
            format!(
                "{}\t{},{},{},{}\n",
                r.text, r.rect.x1, r.rect.y1, r.rect.x2, r.rect.y2
            )
        })
        .collect()
}
