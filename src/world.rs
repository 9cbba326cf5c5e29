//! Hash-keyed voxel storage and the movement cost between adjacent cells.

use glam::IVec3;
use rustc_hash::FxHashMap;

use crate::block::{Block, BlockType};

/// Block storage keyed by signed, unbounded cell coordinates.
///
/// Unpopulated coordinates behave as unknown terrain: not walkable, not
/// breakable. A world is mutable between searches but treated as read-only
/// while any search is running.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    blocks: FxHashMap<IVec3, Block>,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the block at `pos`.
    pub fn set_block(&mut self, pos: IVec3, block: Block) {
        self.blocks.insert(pos, block);
    }

    pub fn block(&self, pos: IVec3) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    pub fn is_walkable(&self, pos: IVec3) -> bool {
        self.blocks.get(&pos).is_some_and(|block| block.walkable)
    }

    pub fn can_break(&self, pos: IVec3) -> bool {
        self.blocks.get(&pos).is_some_and(|block| block.breakable)
    }

    /// The block's terrain, or [`BlockType::Unknown`] for unpopulated cells.
    pub fn block_type(&self, pos: IVec3) -> BlockType {
        self.blocks
            .get(&pos)
            .map_or(BlockType::Unknown, |block| block.kind)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Cost of the edge from `from` into the adjacent cell `to`.
    ///
    /// Base 1.0, or √2 for a diagonal XZ displacement. Ascent adds 1.0 per
    /// unit, descent 0.2 per unit, and the destination's positive move-cost
    /// multiplier is applied last so that climbing through heavy terrain is
    /// dearer than either alone.
    pub fn movement_cost(&self, from: IVec3, to: IVec3) -> f64 {
        let mut cost = if from.x != to.x && from.z != to.z {
            std::f64::consts::SQRT_2
        } else {
            1.0
        };

        if to.y > from.y {
            cost += 1.0 * f64::from(to.y - from.y);
        } else if to.y < from.y {
            cost += 0.2 * f64::from(from.y - to.y);
        }

        if let Some(block) = self.blocks.get(&to) {
            if block.move_cost > 0.0 {
                cost *= block.move_cost;
            }
        }

        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unpopulated_cells_are_unknown_and_impassable() {
        let world = VoxelWorld::new();
        let pos = IVec3::new(3, 1, -7);

        assert!(!world.is_walkable(pos));
        assert!(!world.can_break(pos));
        assert_eq!(world.block_type(pos), BlockType::Unknown);
    }

    #[test]
    fn set_block_overwrites() {
        let mut world = VoxelWorld::new();
        let pos = IVec3::new(0, 1, 0);

        world.set_block(pos, Block::stone());
        assert!(!world.is_walkable(pos));

        world.set_block(pos, Block::air());
        assert!(world.is_walkable(pos));
        assert_eq!(world.block_type(pos), BlockType::Air);
    }

    #[test]
    fn flat_movement_costs_one() {
        let mut world = VoxelWorld::new();
        world.set_block(IVec3::new(1, 1, 0), Block::air());

        let cost = world.movement_cost(IVec3::new(0, 1, 0), IVec3::new(1, 1, 0));
        assert_relative_eq!(cost, 1.0);
    }

    #[test]
    fn diagonal_movement_costs_sqrt_two() {
        let mut world = VoxelWorld::new();
        world.set_block(IVec3::new(1, 1, 1), Block::air());

        let cost = world.movement_cost(IVec3::new(0, 1, 0), IVec3::new(1, 1, 1));
        assert_relative_eq!(cost, std::f64::consts::SQRT_2);
    }

    #[test]
    fn ascent_is_dearer_than_descent() {
        let mut world = VoxelWorld::new();
        let low = IVec3::new(0, 1, 0);
        let high = IVec3::new(0, 3, 0);
        world.set_block(low, Block::air());
        world.set_block(high, Block::air());

        let up = world.movement_cost(low, high);
        let down = world.movement_cost(high, low);

        assert_relative_eq!(up, 3.0);
        assert_relative_eq!(down, 1.4);
        assert!(up > down);
    }

    #[test]
    fn multiplier_applies_after_vertical_penalty() {
        let mut world = VoxelWorld::new();
        let from = IVec3::new(0, 1, 0);
        let to = IVec3::new(1, 2, 0);
        world.set_block(to, Block::stone());

        // (1.0 base + 1.0 ascent) * 5.0 stone multiplier
        let cost = world.movement_cost(from, to);
        assert_relative_eq!(cost, 10.0);
    }

    #[test]
    fn unknown_destination_has_no_multiplier() {
        let world = VoxelWorld::new();
        let cost = world.movement_cost(IVec3::new(0, 0, 0), IVec3::new(1, 0, 0));
        assert_relative_eq!(cost, 1.0);
    }
}
