#![doc = include_str!("../README.md")]

use glam::IVec3;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::hash::BuildHasherDefault;

pub mod api;
mod astar;
mod bellman_ford;
mod bfs;
mod bidirectional;
pub mod block;
mod cost;
pub mod demo;
mod dijkstra;
mod dir;
pub mod distance;
pub mod error;
mod greedy;
mod idastar;
mod jps;
pub mod los;
mod metrics;
mod neighbor;
pub mod options;
pub mod pathfind;
pub mod result;
pub mod server;
mod theta;
pub mod world;

pub mod prelude {
    pub use crate::block::{Block, BlockType};
    pub use crate::options::PathfindingOptions;
    pub use crate::pathfind::{find_path, Algorithm};
    pub use crate::result::PathfindingResult;
    pub use crate::world::VoxelWorld;
    pub use glam::IVec3;
}

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Binary-heap entry for the open set: lowest f-score pops first, ties broken
/// toward the higher g-score so deeper candidates are preferred.
pub(crate) struct OpenSetEntry {
    pub(crate) estimated_cost: f64,
    pub(crate) cost: f64,
    pub(crate) index: usize,
}

impl PartialEq for OpenSetEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenSetEntry {}

impl PartialOrd for OpenSetEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenSetEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.total_cmp(&other.cost),
            ordering => ordering,
        }
    }
}

/// Walks the visited arena from `index` back to the root and returns the
/// cells in start-to-goal order.
pub(crate) fn reconstruct_path(
    visited: &FxIndexMap<IVec3, (usize, f64)>,
    index: usize,
) -> Vec<IVec3> {
    let mut steps = vec![];
    let mut current = index;

    while current != usize::MAX {
        let (pos, &(parent, _)) = visited.get_index(current).unwrap();
        steps.push(*pos);
        current = parent;
    }

    steps.reverse();
    steps
}
