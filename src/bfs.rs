//! Breadth-first search.

use std::collections::VecDeque;
use std::time::Instant;

use glam::IVec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;

/// Uninformed FIFO search. Edges are treated uniformly, so the result is
/// shortest in steps, not in weighted cost; the reported total cost is the
/// number of edges. The expander still honours options, and avoid-water is
/// interpreted as outright exclusion.
pub fn find_path_bfs(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let started = Instant::now();

    let mut queue = VecDeque::new();
    queue.push_back(start);

    let mut visited: FxHashSet<IVec3> = FxHashSet::default();
    visited.insert(start);

    let mut came_from: FxHashMap<IVec3, IVec3> = FxHashMap::default();
    let mut scratch = Scratch::new();
    let mut neighbors = Vec::new();
    let mut nodes_explored = 0;

    while let Some(current) = queue.pop_front() {
        nodes_explored += 1;

        if current == goal {
            let path = walk_back(start, goal, &came_from);
            let total_cost = (path.len() - 1) as f64;
            let mut result = metrics::finalize(world, path, total_cost, &scratch);
            result.nodes_explored = nodes_explored;
            result.computation_time = started.elapsed();
            return result;
        }

        expand(
            world,
            current,
            options,
            Profile::Cardinal,
            true,
            &mut scratch,
            &mut neighbors,
        );

        for &neighbor in neighbors.iter() {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
                came_from.insert(neighbor, current);
            }
        }
    }

    let mut result = PathfindingResult::not_found(nodes_explored);
    result.computation_time = started.elapsed();
    result
}

fn walk_back(start: IVec3, goal: IVec3, came_from: &FxHashMap<IVec3, IVec3>) -> Vec<IVec3> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        current = came_from[&current];
        path.push(current);
    }

    path.reverse();
    path
}
