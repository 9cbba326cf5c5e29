//! Terrain vocabulary and per-cell block data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named terrain of a block. Unpopulated cells report [`BlockType::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Air,
    Grass,
    Stone,
    Water,
    Sand,
    Lava,
    Ice,
    Wood,
    Unknown,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Grass => "grass",
            BlockType::Stone => "stone",
            BlockType::Water => "water",
            BlockType::Sand => "sand",
            BlockType::Lava => "lava",
            BlockType::Ice => "ice",
            BlockType::Wood => "wood",
            BlockType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The occupant of a cell.
///
/// Walkability and breakability are independent: a breakable, non-walkable
/// block is the ordinary obstacle case. `move_cost` multiplies the base edge
/// cost of moving *into* this cell when positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub kind: BlockType,
    pub walkable: bool,
    pub breakable: bool,
    pub move_cost: f64,
}

impl Block {
    pub fn new(kind: BlockType, walkable: bool, breakable: bool, move_cost: f64) -> Self {
        Self {
            kind,
            walkable,
            breakable,
            move_cost,
        }
    }

    pub fn air() -> Self {
        Self::new(BlockType::Air, true, false, 1.0)
    }

    pub fn grass() -> Self {
        Self::new(BlockType::Grass, false, true, 1.0)
    }

    pub fn stone() -> Self {
        Self::new(BlockType::Stone, false, true, 5.0)
    }

    pub fn water() -> Self {
        Self::new(BlockType::Water, true, false, 3.0)
    }

    pub fn sand() -> Self {
        Self::new(BlockType::Sand, true, true, 1.5)
    }

    pub fn lava() -> Self {
        Self::new(BlockType::Lava, false, true, 10.0)
    }

    pub fn ice() -> Self {
        Self::new(BlockType::Ice, true, true, 0.7)
    }

    pub fn wood() -> Self {
        Self::new(BlockType::Wood, true, false, 1.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_blocks_are_breakable_but_not_walkable() {
        for block in [Block::grass(), Block::stone(), Block::lava()] {
            assert!(!block.walkable);
            assert!(block.breakable);
        }
    }

    #[test]
    fn block_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BlockType::Water).unwrap(),
            "\"water\""
        );
        assert_eq!(BlockType::Unknown.as_str(), "unknown");
    }
}
