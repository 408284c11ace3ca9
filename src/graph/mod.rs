//! Block id → block lookup.
//!
//! Table reconstruction only needs to dereference ids, so it works against
//! the [`BlockLookup`] trait rather than a concrete index. Tests can drive
//! it with a hand-built lookup; production code uses [`BlockGraphIndex`].

use crate::error::{Error, Result};
use crate::model::Block;
use std::collections::HashMap;

/// Abstract id → block resolution.
pub trait BlockLookup: Sync {
    /// Find a block by id.
    fn get(&self, id: &str) -> Option<&Block>;

    /// Find a block by id, failing with [`Error::UnresolvedReference`].
    fn resolve(&self, id: &str) -> Result<&Block> {
        self.get(id).ok_or_else(|| Error::unresolved(id))
    }
}

/// Hash index over the blocks of one response.
///
/// Built once, never mutated. Borrows the blocks, so it cannot outlive the
/// response it indexes.
#[derive(Debug, Clone, Default)]
pub struct BlockGraphIndex<'a> {
    blocks: HashMap<&'a str, &'a Block>,
}

impl<'a> BlockGraphIndex<'a> {
    /// Index a block sequence. On duplicate ids the last block wins.
    pub fn build(blocks: &'a [Block]) -> Self {
        let mut index = HashMap::with_capacity(blocks.len());
        for block in blocks {
            index.insert(block.id.as_str(), block);
        }
        log::debug!("Indexed {} blocks ({} unique ids)", blocks.len(), index.len());
        Self { blocks: index }
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Check if an id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }
}

impl BlockLookup for BlockGraphIndex<'_> {
    fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id).copied()
    }
}

impl BlockLookup for HashMap<String, Block> {
    fn get(&self, id: &str) -> Option<&Block> {
        HashMap::get(self, id)
    }
}
