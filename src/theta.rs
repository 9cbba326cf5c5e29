//! Theta* any-angle search.

use std::collections::BinaryHeap;
use std::time::Instant;

use glam::IVec3;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::cost::{heuristic, surcharges};
use crate::distance::euclidean;
use crate::los::{has_line_of_sight, line_points};
use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;
use crate::{reconstruct_path, FxIndexMap, OpenSetEntry};

/// A* variant with any-angle edges: when the current node's parent has line
/// of sight to a neighbour, the neighbour is re-parented directly to it at
/// euclidean cost, skipping the grid detour. The plain expander includes the
/// XZ and vertical diagonals.
pub fn find_path_theta(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let started = Instant::now();

    let mut to_visit = BinaryHeap::new();
    to_visit.push(OpenSetEntry {
        estimated_cost: heuristic(start, goal, options),
        cost: 0.0,
        index: 0,
    });

    let mut visited: FxIndexMap<IVec3, (usize, f64)> = FxIndexMap::default();
    visited.insert(start, (usize::MAX, 0.0));

    let mut scratch = Scratch::new();
    let mut neighbors = Vec::new();
    let mut nodes_explored = 0;

    while let Some(OpenSetEntry { cost, index, .. }) = to_visit.pop() {
        nodes_explored += 1;

        let (current_pos, parent_index, current_cost) = {
            let (current_pos, &(parent_index, current_cost)) = visited.get_index(index).unwrap();

            if *current_pos == goal {
                let nodes = reconstruct_path(&visited, index);
                let path = expand_segments(world, &nodes);
                let mut result = metrics::finalize(world, path, current_cost, &scratch);
                result.nodes_explored = nodes_explored;
                result.computation_time = started.elapsed();
                return result;
            }

            if cost > current_cost {
                continue;
            }

            (*current_pos, parent_index, current_cost)
        };

        expand(
            world,
            current_pos,
            options,
            Profile::AnyAngle,
            false,
            &mut scratch,
            &mut neighbors,
        );

        for &neighbor in neighbors.iter() {
            let mut relaxed = false;

            // Any-angle shortcut: relax from the grandparent when it can see
            // the neighbour directly.
            if parent_index != usize::MAX {
                let (parent_pos, &(_, parent_cost)) = visited.get_index(parent_index).unwrap();
                let parent_pos = *parent_pos;

                if has_line_of_sight(world, parent_pos, neighbor) {
                    let direct = parent_cost
                        + euclidean(parent_pos, neighbor)
                        + surcharges(world, parent_pos, neighbor, options, &scratch);

                    relaxed = relax(
                        &mut visited,
                        &mut to_visit,
                        neighbor,
                        parent_index,
                        direct,
                        heuristic(neighbor, goal, options),
                    );
                }
            }

            if !relaxed {
                let tentative = current_cost
                    + euclidean(current_pos, neighbor)
                    + surcharges(world, current_pos, neighbor, options, &scratch);

                relax(
                    &mut visited,
                    &mut to_visit,
                    neighbor,
                    index,
                    tentative,
                    heuristic(neighbor, goal, options),
                );
            }
        }
    }

    let mut result = PathfindingResult::not_found(nodes_explored);
    result.computation_time = started.elapsed();
    result
}

fn relax(
    visited: &mut FxIndexMap<IVec3, (usize, f64)>,
    to_visit: &mut BinaryHeap<OpenSetEntry>,
    neighbor: IVec3,
    parent: usize,
    new_cost: f64,
    h: f64,
) -> bool {
    let n;
    match visited.entry(neighbor) {
        Vacant(e) => {
            n = e.index();
            e.insert((parent, new_cost));
        }
        Occupied(mut e) => {
            if e.get().1 > new_cost {
                n = e.index();
                e.insert((parent, new_cost));
            } else {
                return false;
            }
        }
    }

    to_visit.push(OpenSetEntry {
        estimated_cost: new_cost + h,
        cost: new_cost,
        index: n,
    });
    true
}

/// Expands each any-angle segment back into grid cells along the rasterised
/// line so the metrics pass sees every traversed cell.
fn expand_segments(world: &VoxelWorld, nodes: &[IVec3]) -> Vec<IVec3> {
    let mut path = Vec::new();

    for (i, &node) in nodes.iter().enumerate() {
        if i == 0 {
            path.push(node);
            continue;
        }

        let segment = line_points(nodes[i - 1], node);
        if segment.len() > 2 && segment.iter().all(|&p| world.is_walkable(p)) {
            path.extend(segment.into_iter().skip(1));
        } else {
            path.push(node);
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    fn flat_world(size: i32) -> VoxelWorld {
        let mut world = VoxelWorld::new();
        for x in 0..size {
            for z in 0..size {
                world.set_block(IVec3::new(x, 1, z), Block::air());
            }
        }
        world
    }

    #[test]
    fn open_ground_path_is_near_euclidean() {
        let world = flat_world(10);
        let start = IVec3::new(0, 1, 0);
        let goal = IVec3::new(9, 1, 9);

        let result = find_path_theta(start, goal, &world, &PathfindingOptions::default());

        assert!(result.found());
        assert_eq!(result.path[0], start);
        assert_eq!(*result.path.last().unwrap(), goal);
        // Any-angle shortcutting should keep the cost close to the straight
        // line, well under the cardinal-grid distance of 18.
        assert!(result.total_cost < 14.0);
    }

    #[test]
    fn segments_expand_to_adjacent_cells() {
        let world = flat_world(8);
        let result = find_path_theta(
            IVec3::new(0, 1, 0),
            IVec3::new(7, 1, 3),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(result.found());
        for pair in result.path.windows(2) {
            let d = (pair[1] - pair[0]).abs();
            assert!(d.x <= 1 && d.y <= 1 && d.z <= 1);
        }
    }

    #[test]
    fn wall_forces_a_corner() {
        let mut world = flat_world(9);
        for z in 0..8 {
            world.set_block(IVec3::new(4, 1, z), Block::stone());
        }

        let result = find_path_theta(
            IVec3::new(0, 1, 0),
            IVec3::new(8, 1, 0),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(result.found());
        // The path has to clear the wall's open end at z = 8.
        assert!(result.path.iter().any(|p| p.z >= 7));
    }
}
