//! Block registry: mutable state of every static obstacle cell

use std::collections::HashMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// A destroyed block; walkable, inert
    #[default]
    Empty,
    /// Solid for the player, ignored by the ball
    Pushable,
    /// Destroyed by the ball on contact
    Breakable,
    /// Costs a life whenever the ball enters it
    Trapped,
}

impl BlockKind {
    /// Whether the player is stopped by this block
    pub fn is_solid(&self) -> bool {
        *self != BlockKind::Empty
    }
}

/// A block entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub pos: IVec2,
}

/// All blocks of a level, addressable by position
///
/// Serialized as the plain block list; the position index is rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Block>", into = "Vec<Block>")]
pub struct BlockRegistry {
    /// Blocks in row-major load order
    blocks: Vec<Block>,
    index: HashMap<IVec2, usize>,
}

impl From<Vec<Block>> for BlockRegistry {
    fn from(blocks: Vec<Block>) -> Self {
        let mut registry = Self::new();
        for block in blocks {
            registry.insert(block.kind, block.pos);
        }
        registry
    }
}

impl From<BlockRegistry> for Vec<Block> {
    fn from(registry: BlockRegistry) -> Self {
        registry.blocks
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block. Returns false if a block already sits at `pos`.
    pub fn insert(&mut self, kind: BlockKind, pos: IVec2) -> bool {
        if self.index.contains_key(&pos) {
            return false;
        }
        self.index.insert(pos, self.blocks.len());
        self.blocks.push(Block { kind, pos });
        true
    }

    pub fn get(&self, pos: IVec2) -> Option<&Block> {
        self.index.get(&pos).map(|&i| &self.blocks[i])
    }

    /// Kind of the block at `pos`, if any
    pub fn kind_at(&self, pos: IVec2) -> Option<BlockKind> {
        self.get(pos).map(|b| b.kind)
    }

    /// Ball contact: a Breakable block at `pos` becomes Empty.
    ///
    /// Returns the kind the block had before the hit.
    pub fn strike(&mut self, pos: IVec2) -> Option<BlockKind> {
        let i = *self.index.get(&pos)?;
        let block = &mut self.blocks[i];
        let before = block.kind;
        if before == BlockKind::Breakable {
            block.kind = BlockKind::Empty;
        }
        Some(before)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn count_of(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicate_position() {
        let mut reg = BlockRegistry::new();
        assert!(reg.insert(BlockKind::Breakable, IVec2::new(1, 1)));
        assert!(!reg.insert(BlockKind::Pushable, IVec2::new(1, 1)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.kind_at(IVec2::new(1, 1)), Some(BlockKind::Breakable));
    }

    #[test]
    fn test_strike_only_breaks_breakable() {
        let mut reg = BlockRegistry::new();
        reg.insert(BlockKind::Breakable, IVec2::new(0, 0));
        reg.insert(BlockKind::Trapped, IVec2::new(1, 0));
        reg.insert(BlockKind::Pushable, IVec2::new(2, 0));

        assert_eq!(reg.strike(IVec2::new(0, 0)), Some(BlockKind::Breakable));
        assert_eq!(reg.kind_at(IVec2::new(0, 0)), Some(BlockKind::Empty));
        // Second hit sees the destroyed block
        assert_eq!(reg.strike(IVec2::new(0, 0)), Some(BlockKind::Empty));

        assert_eq!(reg.strike(IVec2::new(1, 0)), Some(BlockKind::Trapped));
        assert_eq!(reg.kind_at(IVec2::new(1, 0)), Some(BlockKind::Trapped));
        assert_eq!(reg.strike(IVec2::new(2, 0)), Some(BlockKind::Pushable));
        assert_eq!(reg.strike(IVec2::new(3, 0)), None);
        assert_eq!(reg.count_of(BlockKind::Empty), 1);
    }

    #[test]
    fn test_index_survives_serde() {
        let mut reg = BlockRegistry::new();
        reg.insert(BlockKind::Trapped, IVec2::new(4, 2));
        let json = serde_json::to_string(&reg).unwrap();
        let back: BlockRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind_at(IVec2::new(4, 2)), Some(BlockKind::Trapped));
    }
}
