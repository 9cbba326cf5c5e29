//! Jump-Point Search on uniform-cost grids.

use std::collections::BinaryHeap;
use std::time::Instant;

use glam::IVec3;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::astar::find_path_astar;
use crate::cost::heuristic;
use crate::distance::manhattan;
use crate::metrics;
use crate::neighbor::Scratch;
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;
use crate::{reconstruct_path, FxIndexMap, OpenSetEntry};

/// Jump-Point Search: prunes symmetric neighbours relative to the parent's
/// direction and jumps along each surviving direction until the goal, a
/// forced neighbour, or a blocked cell.
///
/// The pruning rules assume uniform edge costs and plain reachability, so
/// breaking, placing, or water avoidance silently delegates to A*. Edge cost
/// between jump points is their Manhattan distance.
pub fn find_path_jps(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    options: &PathfindingOptions,
) -> PathfindingResult {
    if options.allow_breaking || options.allow_placing || options.avoid_water {
        return find_path_astar(start, goal, world, options);
    }

    let started = Instant::now();

    let mut to_visit = BinaryHeap::new();
    to_visit.push(OpenSetEntry {
        estimated_cost: heuristic(start, goal, options),
        cost: 0.0,
        index: 0,
    });

    let mut visited: FxIndexMap<IVec3, (usize, f64)> = FxIndexMap::default();
    visited.insert(start, (usize::MAX, 0.0));

    let mut nodes_explored = 0;

    while let Some(OpenSetEntry { cost, index, .. }) = to_visit.pop() {
        nodes_explored += 1;

        let (current_pos, parent_pos, current_cost) = {
            let (current_pos, &(parent_index, current_cost)) = visited.get_index(index).unwrap();

            if *current_pos == goal {
                let nodes = reconstruct_path(&visited, index);
                let path = interpolate_nodes(world, &nodes);
                let mut result =
                    metrics::finalize(world, path, current_cost, &Scratch::new());
                result.nodes_explored = nodes_explored;
                result.computation_time = started.elapsed();
                return result;
            }

            if cost > current_cost {
                continue;
            }

            let parent_pos = if parent_index == usize::MAX {
                None
            } else {
                Some(*visited.get_index(parent_index).unwrap().0)
            };

            (*current_pos, parent_pos, current_cost)
        };

        for successor in identify_successors(world, current_pos, goal, parent_pos) {
            let new_cost = current_cost + manhattan(current_pos, successor);

            let h;
            let n;
            match visited.entry(successor) {
                Vacant(e) => {
                    h = heuristic(successor, goal, options);
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(successor, goal, options);
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

fn identify_successors(
    world: &VoxelWorld,
    current: IVec3,
    goal: IVec3,
    parent: Option<IVec3>,
) -> Vec<IVec3> {
    let mut successors = Vec::new();

    for neighbor in pruned_neighbors(world, current, parent) {
        let dir = (neighbor - current).signum();
        if let Some(jump_point) = jump(world, current, dir, goal) {
            successors.push(jump_point);
        }
    }

    successors
}

/// Neighbours that survive symmetry pruning relative to the direction the
/// parent entered from. With no parent, every walkable cardinal and XZ
/// diagonal is open.
fn pruned_neighbors(world: &VoxelWorld, current: IVec3, parent: Option<IVec3>) -> Vec<IVec3> {
    let mut neighbors = Vec::new();
    let mut push_walkable = |p: IVec3, neighbors: &mut Vec<IVec3>| {
        if world.is_walkable(p) {
            neighbors.push(p);
        }
    };

    let Some(parent) = parent else {
        for dir in [
            IVec3::new(1, 0, 0),
            IVec3::new(-1, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(0, -1, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, -1),
            IVec3::new(1, 0, 1),
            IVec3::new(1, 0, -1),
            IVec3::new(-1, 0, 1),
            IVec3::new(-1, 0, -1),
        ] {
            push_walkable(current + dir, &mut neighbors);
        }
        return neighbors;
    };

    let d = (current - parent).signum();

    if d.x != 0 && d.z != 0 {
        // Diagonal travel keeps the diagonal and both straight components,
        // plus the forced diagonals past blocked straight cells.
        push_walkable(current + IVec3::new(d.x, 0, 0), &mut neighbors);
        push_walkable(current + IVec3::new(0, 0, d.z), &mut neighbors);
        push_walkable(current + IVec3::new(d.x, 0, d.z), &mut neighbors);

        if !world.is_walkable(current + IVec3::new(-d.x, 0, 0)) {
            push_walkable(current + IVec3::new(-d.x, 0, d.z), &mut neighbors);
        }
        if !world.is_walkable(current + IVec3::new(0, 0, -d.z)) {
            push_walkable(current + IVec3::new(d.x, 0, -d.z), &mut neighbors);
        }

        if d.y != 0 {
            push_walkable(current + IVec3::new(0, d.y, 0), &mut neighbors);
        }
    } else if d.x != 0 || d.z != 0 {
        // Straight horizontal travel: the continuation, lateral forced
        // neighbours past blocked side cells, and the vertical variants.
        let ahead = IVec3::new(d.x, 0, d.z);
        push_walkable(current + ahead, &mut neighbors);

        let lateral = IVec3::new(d.z, 0, d.x).abs();
        for side in [lateral, -lateral] {
            if !world.is_walkable(current + side) {
                push_walkable(current + side + ahead, &mut neighbors);
            }
        }

        if !world.is_walkable(current + IVec3::Y) {
            push_walkable(current + ahead + IVec3::Y, &mut neighbors);
        }
        if !world.is_walkable(current - IVec3::Y) {
            push_walkable(current + ahead - IVec3::Y, &mut neighbors);
        }

        if d.y != 0 {
            push_walkable(current + IVec3::new(0, d.y, 0), &mut neighbors);
        }
    } else if d.y != 0 {
        push_walkable(current + IVec3::new(0, d.y, 0), &mut neighbors);

        for side in [
            IVec3::new(1, 0, 0),
            IVec3::new(-1, 0, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, -1),
        ] {
            if !world.is_walkable(current + side) {
                push_walkable(current + side + IVec3::new(0, d.y, 0), &mut neighbors);
            }
        }
    }

    neighbors
}

/// Follows `dir` from `current` until the goal, a forced neighbour, or a
/// non-walkable cell. Diagonal jumps recurse along each axis component; if
/// either lands, the current cell is itself a jump point.
fn jump(world: &VoxelWorld, current: IVec3, dir: IVec3, goal: IVec3) -> Option<IVec3> {
    let next = current + dir;

    if !world.is_walkable(next) {
        return None;
    }

    if next == goal {
        return Some(next);
    }

    if dir.x != 0 && dir.z != 0 {
        if world.is_walkable(next + IVec3::new(-dir.x, 0, dir.z))
            && !world.is_walkable(next + IVec3::new(-dir.x, 0, 0))
        {
            return Some(next);
        }
        if world.is_walkable(next + IVec3::new(dir.x, 0, -dir.z))
            && !world.is_walkable(next + IVec3::new(0, 0, -dir.z))
        {
            return Some(next);
        }

        if jump(world, next, IVec3::new(dir.x, 0, 0), goal).is_some()
            || jump(world, next, IVec3::new(0, 0, dir.z), goal).is_some()
        {
            return Some(next);
        }
    } else if dir.x != 0 || dir.z != 0 {
        let ahead = IVec3::new(dir.x, 0, dir.z);
        let lateral = IVec3::new(dir.z, 0, dir.x).abs();
        for side in [lateral, -lateral] {
            if !world.is_walkable(next + side) && world.is_walkable(next + side + ahead) {
                return Some(next);
            }
        }

        if world.is_walkable(next + IVec3::Y) && !world.is_walkable(current + IVec3::Y) {
            return Some(next);
        }
        if world.is_walkable(next - IVec3::Y) && !world.is_walkable(current - IVec3::Y) {
            return Some(next);
        }
    } else if dir.y != 0 {
        for side in [
            IVec3::new(1, 0, 0),
            IVec3::new(-1, 0, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, -1),
        ] {
            if world.is_walkable(next + side) && !world.is_walkable(current + side) {
                return Some(next);
            }
        }
    }

    jump(world, next, dir, goal)
}

/// Fills in the grid cells between consecutive jump points by axis-aligned
/// stepping. When an interpolated cell is blocked, the same column is tried
/// at the parent's Y and one step up or down to ride over uneven terrain.
fn interpolate_nodes(world: &VoxelWorld, nodes: &[IVec3]) -> Vec<IVec3> {
    let mut path = Vec::new();

    for (i, &node) in nodes.iter().enumerate() {
        if i == 0 {
            path.push(node);
            continue;
        }
        path.extend(interpolate(world, nodes[i - 1], node));
    }

    path
}

fn interpolate(world: &VoxelWorld, from: IVec3, to: IVec3) -> Vec<IVec3> {
    let step = (to - from).signum();
    let steps = (to - from).abs().max_element();

    let mut points = Vec::new();

    for i in 1..=steps {
        let point = from + step * i;

        if world.is_walkable(point) {
            points.push(point);
            continue;
        }

        for dy in [0, 1, -1] {
            let alternative = IVec3::new(point.x, from.y + dy, point.z);
            if world.is_walkable(alternative) {
                points.push(alternative);
                break;
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use approx::assert_relative_eq;

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
    fn straight_run_jumps_to_the_goal() {
        let world = flat_world(10);
        let start = IVec3::new(0, 1, 0);
        let goal = IVec3::new(9, 1, 0);

        let result = find_path_jps(start, goal, &world, &PathfindingOptions::default());

        assert!(result.found());
        assert_eq!(result.path[0], start);
        assert_eq!(*result.path.last().unwrap(), goal);
        // Interpolation restores every intermediate cell.
        assert_eq!(result.path.len(), 10);
        assert_relative_eq!(result.total_cost, 9.0);
    }

    #[test]
    fn obstacle_produces_intermediate_jump_points() {
        let mut world = flat_world(10);
        for z in 0..9 {
            world.set_block(IVec3::new(5, 1, z), Block::stone());
        }

        let result = find_path_jps(
            IVec3::new(0, 1, 0),
            IVec3::new(9, 1, 0),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(result.found());
        assert!(result.path.iter().any(|p| p.z >= 8));
        for pair in result.path.windows(2) {
            assert!(!world
                .block(pair[1])
                .is_some_and(|b| !b.walkable));
        }
    }

    #[test]
    fn option_flags_fall_back_to_astar() {
        let mut world = flat_world(6);
        for z in 0..6 {
            world.set_block(IVec3::new(3, 1, z), Block::stone());
        }
        let options = PathfindingOptions {
            allow_breaking: true,
            ..Default::default()
        };

        let result = find_path_jps(IVec3::new(0, 1, 0), IVec3::new(5, 1, 0), &world, &options);

        // Pure JPS never records manipulations; a broken block proves the
        // A* delegate handled the search.
        assert!(result.found());
        assert!(!result.blocks_broken.is_empty());
    }

    #[test]
    fn unreachable_goal_returns_empty() {
        let world = flat_world(4);
        let result = find_path_jps(
            IVec3::new(0, 1, 0),
            IVec3::new(50, 1, 50),
            &world,
            &PathfindingOptions::default(),
        );

        assert!(!result.found());
    }
}
