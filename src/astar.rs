//! A* search over the voxel grid.

use std::collections::BinaryHeap;
use std::time::Instant;

use glam::IVec3;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::cost::{edge_cost, heuristic};
use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;
use crate::{reconstruct_path, FxIndexMap, OpenSetEntry};

/// A* search from `start` to `goal`, ordered by f = g + h.
///
/// There is no closed set: a cell is re-relaxed whenever a cheaper g-score is
/// found, and stale heap entries are skipped on pop. In breaking mode the
/// expander also considers the four XZ diagonals.
pub fn find_path_astar(
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

        let current_pos = {
            let (current_pos, &(_, current_cost)) = visited.get_index(index).unwrap();

            if *current_pos == goal {
                let path = reconstruct_path(&visited, index);
                let mut result = metrics::finalize(world, path, current_cost, &scratch);
                result.nodes_explored = nodes_explored;
                result.computation_time = started.elapsed();
                return result;
            }

            if cost > current_cost {
                continue;
            }

            *current_pos
        };

        expand(
            world,
            current_pos,
            options,
            Profile::XzDiagonal,
            false,
            &mut scratch,
            &mut neighbors,
        );

        for &neighbor in neighbors.iter() {
            let new_cost = cost + edge_cost(world, current_pos, neighbor, options, &scratch);

            let h;
            let n;
            match visited.entry(neighbor) {
                Vacant(e) => {
                    h = heuristic(neighbor, goal, options);
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(neighbor, goal, options);
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_visit.push(OpenSetEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }

    let mut result = PathfindingResult::not_found(nodes_explored);
    result.computation_time = started.elapsed();
    result
}
