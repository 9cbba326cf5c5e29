//! Greedy best-first search.

use std::collections::BinaryHeap;
use std::time::Instant;

use glam::IVec3;
use indexmap::map::Entry::Vacant;

use crate::cost::{edge_cost, heuristic};
use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;
use crate::{reconstruct_path, FxIndexMap, OpenSetEntry};

/// Best-first search ordered by the heuristic alone. Fast, not optimal:
/// every cell is visited at most once and never re-relaxed. The g-score is
/// still accumulated through the shared cost model so the reported total is
/// comparable with the other strategies.
pub fn find_path_greedy(
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
            // First writer wins; cells already in the arena are settled.
            if let Vacant(e) = visited.entry(neighbor) {
                let n = e.index();
                let g = current_cost + edge_cost(world, current_pos, neighbor, options, &scratch);
                e.insert((index, g));

                to_visit.push(OpenSetEntry {
                    estimated_cost: heuristic(neighbor, goal, options),
                    cost: g,
                    index: n,
                });
            }
        }
    }

    let mut result = PathfindingResult::not_found(nodes_explored);
    result.computation_time = started.elapsed();
    result
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
    fn reaches_the_goal_on_open_ground() {
        let world = flat_world(8);
        let start = IVec3::new(0, 1, 0);
        let goal = IVec3::new(7, 1, 7);

        let result = find_path_greedy(start, goal, &world, &PathfindingOptions::default());

        assert!(result.found());
        assert_eq!(result.path[0], start);
        assert_eq!(*result.path.last().unwrap(), goal);
        // On an open plane the greedy route is still step-minimal.
        assert_eq!(result.path.len(), 15);
    }

    #[test]
    fn explores_fewer_nodes_than_dijkstra() {
        let world = flat_world(10);
        let start = IVec3::new(0, 1, 0);
        let goal = IVec3::new(9, 1, 9);

        let greedy = find_path_greedy(start, goal, &world, &PathfindingOptions::default());
        let dijkstra = crate::dijkstra::find_path_dijkstra(
            start,
            goal,
            &world,
            &PathfindingOptions::default(),
        );

        assert!(greedy.found());
        assert!(greedy.nodes_explored < dijkstra.nodes_explored);
    }

    #[test]
    fn dead_end_still_resolves() {
        let mut world = flat_world(7);
        // A pocket facing the goal direction traps the greedy frontier
        // briefly; the search must back out and finish.
        for z in 0..5 {
            world.set_block(IVec3::new(4, 1, z), Block::stone());
        }
        for x in 1..4 {
            world.set_block(IVec3::new(x, 1, 4), Block::stone());
        }

        let result = find_path_greedy(
            IVec3::new(2, 1, 2),
            IVec3::new(6, 1, 2),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(result.found());
        assert_eq!(*result.path.last().unwrap(), IVec3::new(6, 1, 2));
    }
}
