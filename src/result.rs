//! The uniform result record produced by every strategy.

use glam::IVec3;
use std::time::Duration;

/// Outcome of one search.
///
/// On failure the path is empty and the counters still describe the work
/// done. `max_memory_used` is reported by strategies that can bound it
/// (Bellman–Ford's vertex set); `iterations` counts IDA* deepenings.
#[derive(Clone, Debug, Default)]
pub struct PathfindingResult {
    /// Start-to-goal cell sequence; empty when no path was found.
    pub path: Vec<IVec3>,
    pub nodes_explored: usize,
    pub computation_time: Duration,
    /// Cells entered by breaking, in path order.
    pub blocks_broken: Vec<IVec3>,
    /// Cells entered over synthesised footing, in path order.
    pub blocks_placed: Vec<IVec3>,
    /// Water cells on the path, excluding the start.
    pub water_crossed: usize,
    /// Sum of |ΔY| over consecutive path cells.
    pub vertical_change: u32,
    pub total_cost: f64,
    pub max_memory_used: usize,
    pub iterations: usize,
}

impl PathfindingResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    pub(crate) fn not_found(nodes_explored: usize) -> Self {
        Self {
            nodes_explored,
            ..Default::default()
        }
    }
}
