//! The search driver: strategy selection and dispatch.

use glam::IVec3;
use tracing::debug;

use crate::astar::find_path_astar;
use crate::bellman_ford::find_path_bellman_ford;
use crate::bfs::find_path_bfs;
use crate::bidirectional::find_path_bidirectional;
use crate::dijkstra::find_path_dijkstra;
use crate::greedy::find_path_greedy;
use crate::idastar::find_path_idastar;
use crate::jps::find_path_jps;
use crate::options::PathfindingOptions;
use crate::result::PathfindingResult;
use crate::theta::find_path_theta;
use crate::world::VoxelWorld;

/// The available search strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
    Bfs,
    Greedy,
    IdaStar,
    Jps,
    ThetaStar,
    BellmanFord,
    Bidirectional,
}

impl Algorithm {
    /// Resolves a wire tag; anything unrecognised falls back to A*.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "dijkstra" => Algorithm::Dijkstra,
            "bfs" => Algorithm::Bfs,
            "greedy" => Algorithm::Greedy,
            "ida" | "idastar" => Algorithm::IdaStar,
            "jps" => Algorithm::Jps,
            "theta" | "thetastar" => Algorithm::ThetaStar,
            "bellmanford" | "bellman-ford" => Algorithm::BellmanFord,
            "bidirectional" => Algorithm::Bidirectional,
            _ => Algorithm::AStar,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::AStar => "astar",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Bfs => "bfs",
            Algorithm::Greedy => "greedy",
            Algorithm::IdaStar => "idastar",
            Algorithm::Jps => "jps",
            Algorithm::ThetaStar => "thetastar",
            Algorithm::BellmanFord => "bellmanford",
            Algorithm::Bidirectional => "bidirectional",
        }
    }
}

/// Runs one search. The world is treated as read-only for the duration; all
/// mutable state is private to the call, so independent searches may run in
/// parallel on the same world.
pub fn find_path(
    start: IVec3,
    goal: IVec3,
    world: &VoxelWorld,
    algorithm: Algorithm,
    options: &PathfindingOptions,
) -> PathfindingResult {
    let algorithm = if algorithm == Algorithm::AStar && options.jump_point_optimisation {
        Algorithm::Jps
    } else {
        algorithm
    };

    debug!(?start, ?goal, algorithm = algorithm.as_str(), "searching");

    let result = match algorithm {
        Algorithm::AStar => find_path_astar(start, goal, world, options),
        Algorithm::Dijkstra => find_path_dijkstra(start, goal, world, options),
        Algorithm::Bfs => find_path_bfs(start, goal, world, options),
        Algorithm::Greedy => find_path_greedy(start, goal, world, options),
        Algorithm::IdaStar => find_path_idastar(start, goal, world, options),
        Algorithm::Jps => find_path_jps(start, goal, world, options),
        Algorithm::ThetaStar => find_path_theta(start, goal, world, options),
        Algorithm::BellmanFord => find_path_bellman_ford(start, goal, world, options),
        Algorithm::Bidirectional => find_path_bidirectional(start, goal, world, options),
    };

    debug!(
        found = result.found(),
        steps = result.path.len(),
        nodes = result.nodes_explored,
        cost = result.total_cost,
        "search finished"
    );

    result
}
