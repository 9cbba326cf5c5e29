//! Bellman–Ford over a locally collected vertex set.

use std::collections::VecDeque;
use std::time::Instant;

use glam::IVec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cost::edge_cost;
use crate::dir::CARDINAL;
use crate::metrics;
use crate::neighbor::{expand, Profile, Scratch};
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;

/// Cap on the locally collected vertex set. Larger reachable regions are
/// silently truncated, which can report reachable goals as unreachable; use
/// this strategy on small worlds or for negative-edge validation.
const MAX_VERTICES: usize = 5000;

/// Bellman–Ford: V−1 relaxation passes over a bounded vertex set with early
/// exit once a pass makes no update, then a final pass that reports a
/// negative cycle as an empty path. The current cost model admits none; the
/// check guards future negative-cost extensions.
pub fn find_path_bellman_ford(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let started = Instant::now();

    let vertices = collect_vertices(world, start, goal, options);
    let max_memory_used = vertices.len();

    let mut dist: FxHashMap<IVec3, f64> =
        vertices.iter().map(|&v| (v, f64::INFINITY)).collect();
    dist.insert(start, 0.0);
    let mut pred: FxHashMap<IVec3, IVec3> = FxHashMap::default();

    let mut scratch = Scratch::new();
    let mut neighbors = Vec::new();
    let mut nodes_explored = 0;

    for _ in 1..vertices.len() {
        let mut any_update = false;

        for &u in &vertices {
            if dist[&u].is_infinite() {
                continue;
            }
            nodes_explored += 1;

            expand(
                world,
                u,
                options,
                Profile::Cardinal,
                false,
                &mut scratch,
                &mut neighbors,
            );

            for &v in neighbors.iter() {
                // Edges leaving the collected set are ignored.
                let Some(&old) = dist.get(&v) else {
                    continue;
                };

                let weight = edge_cost(world, u, v, options, &scratch);
                if dist[&u] + weight < old {
                    dist.insert(v, dist[&u] + weight);
                    pred.insert(v, u);
                    any_update = true;
                }
            }
        }

        if !any_update {
            break;
        }
    }

    // Negative-cycle pass. Weighed with the same effective edge costs as the
    // relaxation passes; a cheaper weight function here would misread the
    // option surcharges as a cycle.
    for &u in &vertices {
        if dist[&u].is_infinite() {
            continue;
        }

        for dir in CARDINAL {
            let v = u + dir;
            if !world.is_walkable(v) {
                continue;
            }
            let Some(&old) = dist.get(&v) else {
                continue;
            };

            if dist[&u] + edge_cost(world, u, v, options, &scratch) < old {
                let mut result = PathfindingResult::not_found(nodes_explored);
                result.max_memory_used = max_memory_used;
                result.computation_time = started.elapsed();
                return result;
            }
        }
    }

    if dist[&goal].is_infinite() {
        let mut result = PathfindingResult::not_found(nodes_explored);
        result.max_memory_used = max_memory_used;
        result.computation_time = started.elapsed();
        return result;
    }

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = pred[&current];
        path.push(current);
    }
    path.reverse();

    let total_cost = dist[&goal];
    let mut result = metrics::finalize(world, path, total_cost, &scratch);
    result.nodes_explored = nodes_explored;
    result.max_memory_used = max_memory_used;
    result.computation_time = started.elapsed();
    result
}

/// Breadth-first collection of the vertex set around `start`, capped at
/// [`MAX_VERTICES`]. The goal is always a member so unreachability is
/// detected by its distance staying infinite.
fn collect_vertices(
    world: &VoxelWorld,
    start: IVec3,
    goal: IVec3,
    options: &PathfindingOptions,
) -> Vec<IVec3> {
    let mut vertices = vec![start];
    if goal != start {
        vertices.push(goal);
    }

    let mut visited: FxHashSet<IVec3> = FxHashSet::default();
    visited.insert(start);

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if vertices.len() >= MAX_VERTICES {
            break;
        }

        for dir in CARDINAL {
            let neighbor = current + dir;

            let reachable = if options.allow_breaking {
                world.is_walkable(neighbor) || world.can_break(neighbor)
            } else {
                world.is_walkable(neighbor)
            };

            if reachable && visited.insert(neighbor) {
                if neighbor != goal {
                    vertices.push(neighbor);
                }
                queue.push_back(neighbor);
            }
        }
    }

    vertices
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
    fn agrees_with_dijkstra_on_cost() {
        let mut world = flat_world(6);
        world.set_block(IVec3::new(2, 1, 1), Block::stone());
        world.set_block(IVec3::new(3, 1, 2), Block::water());
        let start = IVec3::new(0, 1, 0);
        let goal = IVec3::new(5, 1, 4);

        let bf = find_path_bellman_ford(start, goal, &world, &PathfindingOptions::default());
        let dijkstra = crate::dijkstra::find_path_dijkstra(
            start,
            goal,
            &world,
            &PathfindingOptions::default(),
        );

        assert!(bf.found());
        assert_relative_eq!(bf.total_cost, dijkstra.total_cost, epsilon = 1e-9);
    }

    #[test]
    fn reports_vertex_set_size() {
        let world = flat_world(4);
        let result = find_path_bellman_ford(
            IVec3::new(0, 1, 0),
            IVec3::new(3, 1, 3),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(result.found());
        assert_eq!(result.max_memory_used, 16);
    }

    #[test]
    fn unreachable_goal_is_reported_empty() {
        let mut world = flat_world(4);
        world.set_block(IVec3::new(20, 1, 20), Block::air());

        let result = find_path_bellman_ford(
            IVec3::new(0, 1, 0),
            IVec3::new(20, 1, 20),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(!result.found());
        assert!(result.max_memory_used >= 17);
    }

    #[test]
    fn avoid_water_is_a_surcharge_not_a_cycle() {
        let mut world = flat_world(5);
        for z in 0..5 {
            world.set_block(IVec3::new(2, 1, z), Block::water());
        }
        let options = PathfindingOptions {
            avoid_water: true,
            ..Default::default()
        };

        let result =
            find_path_bellman_ford(IVec3::new(0, 1, 0), IVec3::new(4, 1, 0), &world, &options);

        assert!(result.found());
        assert!(result.water_crossed > 0);
        // 4.0 in plain steps plus one watery entry at 3.0 * 1.0 + 10.0.
        assert_relative_eq!(result.total_cost, 16.0);
    }

    #[test]
    fn breaking_extends_the_vertex_set() {
        let mut world = flat_world(3);
        world.set_block(IVec3::new(3, 1, 0), Block::stone());
        world.set_block(IVec3::new(4, 1, 0), Block::air());
        let options = PathfindingOptions {
            allow_breaking: true,
            ..Default::default()
        };

        let result =
            find_path_bellman_ford(IVec3::new(0, 1, 0), IVec3::new(4, 1, 0), &world, &options);

        assert!(result.found());
        assert_eq!(result.blocks_broken, vec![IVec3::new(3, 1, 0)]);
    }
}
