//! Iterative-deepening A*.

use std::time::Instant;

use glam::IVec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cost::{edge_cost, heuristic, path_cost};
use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;

/// Outcome of one bounded depth-first probe.
enum Probe {
    Found,
    /// The smallest f-value that exceeded the bound; the next deepening
    /// starts here. Infinite when the subtree is exhausted.
    Bound(f64),
}

/// IDA*: repeated depth-first probes with a growing f-bound, memory
/// proportional to the path depth. Deepening stops at the iteration cap
/// (default 1000), which is reported as an empty path with the cap recorded.
pub fn find_path_idastar(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let started = Instant::now();
    let cap = options.iteration_cap();

    let mut bound = heuristic(start, goal, options);
    let mut scratch = Scratch::new();
    let mut nodes_explored = 0;
    let mut iterations = 0;
    let mut final_path = None;

    while iterations < cap {
        iterations += 1;

        let mut visited = FxHashSet::default();
        let mut parents: FxHashMap<IVec3, IVec3> = FxHashMap::default();

        match dfs(
            start,
            0.0,
            bound,
            goal,
            world,
            options,
            &mut visited,
            &mut parents,
            &mut scratch,
            &mut nodes_explored,
        ) {
            Probe::Found => {
                final_path = Some(reconstruct(goal, &parents));
                break;
            }
            Probe::Bound(next_bound) => {
                if next_bound.is_infinite() {
                    break;
                }
                bound = next_bound;
            }
        }
    }

    match final_path {
        Some(path) => {
            let total_cost = path_cost(world, &path, options, &scratch);
            let mut result = metrics::finalize(world, path, total_cost, &scratch);
            result.nodes_explored = nodes_explored;
            result.iterations = iterations;
            result.computation_time = started.elapsed();
            result
        }
        None => {
            let mut result = PathfindingResult::not_found(nodes_explored);
            result.iterations = iterations;
            result.computation_time = started.elapsed();
            result
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    current: IVec3,
    g: f64,
    bound: f64,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
    visited: &mut FxHashSet<IVec3>,
    parents: &mut FxHashMap<IVec3, IVec3>,
    scratch: &mut Scratch,
    nodes_explored: &mut usize,
) -> Probe {
    *nodes_explored += 1;

    let f = g + heuristic(current, goal, options);
    if f > bound {
        return Probe::Bound(f);
    }
    if current == goal {
        return Probe::Found;
    }

    visited.insert(current);

    let mut neighbors = Vec::new();
    expand(
        world,
        current,
        options,
        Profile::Cardinal,
        false,
        scratch,
        &mut neighbors,
    );
    // Goal-directed ordering keeps the promising branch first.
    neighbors.sort_by(|a, b| {
        heuristic(*a, goal, options).total_cmp(&heuristic(*b, goal, options))
    });

    let mut min_bound = f64::INFINITY;

    for neighbor in neighbors {
        if visited.contains(&neighbor) {
            continue;
        }

        let step = edge_cost(world, current, neighbor, options, scratch);
        parents.insert(neighbor, current);

        match dfs(
            neighbor,
            g + step,
            bound,
            goal,
            world,
            options,
            visited,
            parents,
            scratch,
            nodes_explored,
        ) {
            Probe::Found => return Probe::Found,
            Probe::Bound(next) => {
                if next < min_bound {
                    min_bound = next;
                }
            }
        }
    }

    // Un-mark on backtrack so other branches may revisit at a different g.
    // Scratch entries stay: they describe what entering a cell would cost,
    // and the post-processor filters them against the final path.
    visited.remove(&current);

    Probe::Bound(min_bound)
}

fn reconstruct(goal: IVec3, parents: &FxHashMap<IVec3, IVec3>) -> Vec<IVec3> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(&parent) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
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
    fn matches_optimal_cost_on_open_ground() {
        let world = flat_world(6);
        let start = IVec3::new(0, 1, 0);
        let goal = IVec3::new(4, 1, 3);

        let result = find_path_idastar(start, goal, &world, &PathfindingOptions::default());

        assert!(result.found());
        assert_eq!(result.path[0], start);
        assert_eq!(*result.path.last().unwrap(), goal);
        assert_relative_eq!(result.total_cost, 7.0);
        // The first bound equals the heuristic, which is exact here.
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn deepens_past_an_obstacle() {
        let mut world = flat_world(5);
        for z in 0..4 {
            world.set_block(IVec3::new(2, 1, z), Block::stone());
        }

        let result = find_path_idastar(
            IVec3::new(0, 1, 0),
            IVec3::new(4, 1, 0),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(result.found());
        assert!(result.iterations > 1);
        assert_relative_eq!(result.total_cost, 12.0);
    }

    #[test]
    fn iteration_cap_reports_exhaustion() {
        let mut world = flat_world(9);
        for z in 0..8 {
            world.set_block(IVec3::new(4, 1, z), Block::stone());
        }
        let options = PathfindingOptions {
            max_iterations: 2,
            ..Default::default()
        };

        let result = find_path_idastar(IVec3::new(0, 1, 0), IVec3::new(8, 1, 0), &world, &options);

        assert!(!result.found());
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn unreachable_goal_exhausts_finite_bounds() {
        let world = flat_world(3);
        let result = find_path_idastar(
            IVec3::new(0, 1, 0),
            IVec3::new(30, 1, 0),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(!result.found());
        assert!(result.iterations < 30);
    }
}
