//! Post-processing of a reconstructed path into the reported metrics.

use glam::IVec3;

use crate::block::BlockType;
use crate::neighbor::Scratch;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;

/// Walks `path` once and assembles the result record: vertical change, water
/// crossings (start excluded), and the manipulation points that actually lie
/// on the path, in path order.
///
/// The caller still stamps `nodes_explored`, `computation_time` and any
/// strategy-specific counters.
pub(crate) fn finalize(
    world: &VoxelWorld,
    path: Vec<IVec3>,
    total_cost: f64,
    scratch: &Scratch,
) -> PathfindingResult {
    let mut vertical_change = 0;
    let mut water_crossed = 0;
    let mut blocks_broken = Vec::new();
    let mut blocks_placed = Vec::new();

    for i in 1..path.len() {
        let pos = path[i];
        vertical_change += (pos.y - path[i - 1].y).unsigned_abs();

        if world.block_type(pos) == BlockType::Water {
            water_crossed += 1;
        }
        if scratch.breaks.contains(&pos) {
            blocks_broken.push(pos);
        }
        if scratch.places.contains(&pos) {
            blocks_placed.push(pos);
        }
    }

    PathfindingResult {
        path,
        blocks_broken,
        blocks_placed,
        water_crossed,
        vertical_change,
        total_cost,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    #[test]
    fn summarizes_vertical_water_and_manipulations() {
        let mut world = VoxelWorld::new();
        world.set_block(IVec3::new(0, 1, 0), Block::water());
        world.set_block(IVec3::new(1, 1, 0), Block::water());
        world.set_block(IVec3::new(2, 2, 0), Block::grass());

        let mut scratch = Scratch::new();
        scratch.breaks.insert(IVec3::new(2, 2, 0));
        // Recorded during search but off the final path: must be filtered.
        scratch.breaks.insert(IVec3::new(9, 9, 9));

        let path = vec![
            IVec3::new(0, 1, 0),
            IVec3::new(1, 1, 0),
            IVec3::new(2, 2, 0),
        ];
        let result = finalize(&world, path, 7.5, &scratch);

        // The start cell is water but is not counted.
        assert_eq!(result.water_crossed, 1);
        assert_eq!(result.vertical_change, 1);
        assert_eq!(result.blocks_broken, vec![IVec3::new(2, 2, 0)]);
        assert!(result.blocks_placed.is_empty());
        assert_eq!(result.total_cost, 7.5);
    }

    #[test]
    fn single_cell_path_has_no_metrics() {
        let world = VoxelWorld::new();
        let result = finalize(&world, vec![IVec3::new(0, 1, 0)], 0.0, &Scratch::new());

        assert_eq!(result.water_crossed, 0);
        assert_eq!(result.vertical_change, 0);
        assert!(result.found());
    }
}
