//! Uniform-cost (Dijkstra) search.

use std::collections::BinaryHeap;
use std::time::Instant;

use glam::IVec3;
use indexmap::map::Entry::{Occupied, Vacant};
use rustc_hash::FxHashSet;

use crate::cost::edge_cost;
use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;
use crate::{reconstruct_path, FxIndexMap, OpenSetEntry};

/// Dijkstra's algorithm: the heap is ordered by g alone and a cell, once
/// closed, is never revisited. Optimal under the cost model's non-negative
/// edge weights.
pub fn find_path_dijkstra(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let started = Instant::now();

    let mut to_visit = BinaryHeap::new();
    to_visit.push(OpenSetEntry {
        estimated_cost: 0.0,
        cost: 0.0,
        index: 0,
    });

    let mut visited: FxIndexMap<IVec3, (usize, f64)> = FxIndexMap::default();
    visited.insert(start, (usize::MAX, 0.0));

    let mut closed: FxHashSet<IVec3> = FxHashSet::default();
    let mut scratch = Scratch::new();
    let mut neighbors = Vec::new();
    let mut nodes_explored = 0;

    while let Some(OpenSetEntry { index, .. }) = to_visit.pop() {
        nodes_explored += 1;

        let (current_pos, current_cost) = {
            let (current_pos, &(_, current_cost)) = visited.get_index(index).unwrap();

            if *current_pos == goal {
                let path = reconstruct_path(&visited, index);
                let mut result = metrics::finalize(world, path, current_cost, &scratch);
                result.nodes_explored = nodes_explored;
                result.computation_time = started.elapsed();
                return result;
            }

            if !closed.insert(*current_pos) {
                continue;
            }

            (*current_pos, current_cost)
        };

        expand(
            world,
            current_pos,
            options,
            Profile::Cardinal,
            false,
            &mut scratch,
            &mut neighbors,
        );

        for &neighbor in neighbors.iter() {
            if closed.contains(&neighbor) {
                continue;
            }

            let new_cost =
                current_cost + edge_cost(world, current_pos, neighbor, options, &scratch);

            let n;
            match visited.entry(neighbor) {
                Vacant(e) => {
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_visit.push(OpenSetEntry {
                estimated_cost: new_cost,
                cost: new_cost,
                index: n,
            });
        }
    }

    let mut result = PathfindingResult::not_found(nodes_explored);
    result.computation_time = started.elapsed();
    result
}
