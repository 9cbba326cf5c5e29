//! Bidirectional breadth-first search.

use std::collections::VecDeque;
use std::time::Instant;

use glam::IVec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;

/// Two synchronised FIFO frontiers, one cell expanded from each per round,
/// meeting in the middle.
///
/// The backward frontier always uses the plain expander: breaking and
/// placing are defined from the mover's perspective and have no sound
/// reverse-graph formulation, so callers should not combine this strategy
/// with manipulation options.
pub fn find_path_bidirectional(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let started = Instant::now();

    if start == goal {
        let mut result = metrics::finalize(world, vec![start], 0.0, &Scratch::new());
        result.nodes_explored = 1;
        result.computation_time = started.elapsed();
        return result;
    }

    let backward_options = PathfindingOptions {
        allow_breaking: false,
        allow_placing: false,
        ..options.clone()
    };

    let mut forward_queue = VecDeque::from([start]);
    let mut backward_queue = VecDeque::from([goal]);

    let mut forward_visited: FxHashSet<IVec3> = FxHashSet::default();
    forward_visited.insert(start);
    let mut backward_visited: FxHashSet<IVec3> = FxHashSet::default();
    backward_visited.insert(goal);

    let mut forward_parent: FxHashMap<IVec3, IVec3> = FxHashMap::default();
    let mut backward_parent: FxHashMap<IVec3, IVec3> = FxHashMap::default();

    let mut scratch = Scratch::new();
    let mut neighbors = Vec::new();
    let mut nodes_explored = 0;
    let mut meeting = None;

    'search: while !forward_queue.is_empty() && !backward_queue.is_empty() {
        if let Some(current) = forward_queue.pop_front() {
            nodes_explored += 1;

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
                if forward_visited.insert(neighbor) {
                    forward_queue.push_back(neighbor);
                    forward_parent.insert(neighbor, current);

                    if backward_visited.contains(&neighbor) {
                        meeting = Some(neighbor);
                        break 'search;
                    }
                }
            }
        }

        if let Some(current) = backward_queue.pop_front() {
            nodes_explored += 1;

            expand(
                world,
                current,
                &backward_options,
                Profile::Cardinal,
                true,
                &mut scratch,
                &mut neighbors,
            );

            for &neighbor in neighbors.iter() {
                if backward_visited.insert(neighbor) {
                    backward_queue.push_back(neighbor);
                    backward_parent.insert(neighbor, current);

                    if forward_visited.contains(&neighbor) {
                        meeting = Some(neighbor);
                        break 'search;
                    }
                }
            }
        }
    }

    let Some(meeting) = meeting else {
        let mut result = PathfindingResult::not_found(nodes_explored);
        result.computation_time = started.elapsed();
        return result;
    };

    // Forward half: meeting back to start, reversed.
    let mut path = Vec::new();
    let mut current = meeting;
    while current != start {
        path.push(current);
        current = forward_parent[&current];
    }
    path.push(start);
    path.reverse();

    // Backward half: the backward parents lead from the meeting cell toward
    // the goal.
    let mut current = meeting;
    while current != goal {
        current = backward_parent[&current];
        path.push(current);
    }

    let total_cost = (path.len() - 1) as f64;
    let mut result = metrics::finalize(world, path, total_cost, &scratch);
    result.nodes_explored = nodes_explored;
    result.computation_time = started.elapsed();
    result
}
