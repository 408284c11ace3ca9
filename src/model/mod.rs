//! Data model for analyzer output.
//!
//! Blocks are the flat, relationship-linked elements returned by a
//! document-analysis engine. [`Node`] carries arbitrary responses (such as
//! expense analysis) whose shape the crate does not fix.

mod block;
mod node;
mod response;

pub use block::{
    Block, BlockType, BoundingBox, Geometry, Point, Relationship, RelationshipType,
    SelectionStatus,
};
pub use node::Node;
pub use response::{AnalyzeResponse, DocumentMetadata};
