//! JSON wire contract for the HTTP front end.
//!
//! Field names are part of the published contract and must stay stable.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::demo::demo_world;
use crate::options::PathfindingOptions;
use crate::pathfind::{find_path, Algorithm};
use crate::result::PathfindingResult;
use crate::world::VoxelWorld;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathRequest {
    pub start_x: i32,
    pub start_y: i32,
    pub start_z: i32,
    pub end_x: i32,
    pub end_y: i32,
    pub end_z: i32,
    pub algorithm: String,
    pub allow_breaking: bool,
    pub allow_placing: bool,
    pub avoid_water: bool,
    pub minimise_vertical: bool,
}

impl PathRequest {
    pub fn start(&self) -> IVec3 {
        IVec3::new(self.start_x, self.start_y, self.start_z)
    }

    pub fn end(&self) -> IVec3 {
        IVec3::new(self.end_x, self.end_y, self.end_z)
    }

    pub fn options(&self) -> PathfindingOptions {
        PathfindingOptions {
            allow_breaking: self.allow_breaking,
            allow_placing: self.allow_placing,
            avoid_water: self.avoid_water,
            minimise_height: self.minimise_vertical,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct PointDto {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl From<IVec3> for PointDto {
    fn from(p: IVec3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

fn points(cells: &[IVec3]) -> Vec<PointDto> {
    cells.iter().copied().map(PointDto::from).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    pub path: Vec<PointDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Milliseconds.
    pub computation_time: u64,
    pub nodes_explored: usize,
    pub blocks_traversed: usize,
    pub blocks_broken: Vec<PointDto>,
    pub blocks_placed: Vec<PointDto>,
    pub water_crossed: usize,
    pub vertical_change: u32,
    pub estimated_time: f64,
    pub total_cost: f64,
}

impl PathResponse {
    fn from_result(result: &PathfindingResult) -> Self {
        Self {
            path: points(&result.path),
            error: if result.found() {
                None
            } else {
                Some("No path found".to_owned())
            },
            computation_time: result.computation_time.as_millis() as u64,
            nodes_explored: result.nodes_explored,
            blocks_traversed: result.path.len(),
            blocks_broken: points(&result.blocks_broken),
            blocks_placed: points(&result.blocks_placed),
            water_crossed: result.water_crossed,
            vertical_change: result.vertical_change,
            estimated_time: estimated_traversal_time(result),
            total_cost: result.total_cost,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmComparison {
    pub algorithm: &'static str,
    pub path: Vec<PointDto>,
    /// Milliseconds.
    pub computation_time: u64,
    pub nodes_explored: usize,
    pub path_length: usize,
    pub total_cost: f64,
}

impl AlgorithmComparison {
    fn from_result(algorithm: Algorithm, result: &PathfindingResult) -> Self {
        Self {
            algorithm: algorithm.as_str(),
            path: points(&result.path),
            computation_time: result.computation_time.as_millis() as u64,
            nodes_explored: result.nodes_explored,
            path_length: result.path.len(),
            total_cost: result.total_cost,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub astar: AlgorithmComparison,
    pub dijkstra: AlgorithmComparison,
    pub bfs: AlgorithmComparison,
}

/// Rough traversal-time estimate in seconds: a quarter second per block plus
/// the manipulation, swimming and climbing overheads.
pub fn estimated_traversal_time(result: &PathfindingResult) -> f64 {
    result.path.len() as f64 * 0.25
        + result.blocks_broken.len() as f64 * 1.0
        + result.blocks_placed.len() as f64 * 0.5
        + result.water_crossed as f64 * 0.5
        + f64::from(result.vertical_change) * 0.2
}

/// Prepares the demo world for a request: seeds the terrain and overwrites
/// the start and goal cells with walkable air so the endpoints are never
/// accidentally inside an obstacle.
fn prepared_world(req: &PathRequest) -> VoxelWorld {
    let mut world = demo_world(req.start(), req.end());
    world.set_block(req.start(), Block::air());
    world.set_block(req.end(), Block::air());
    world
}

/// `POST /api/find-path`
pub fn handle_find_path(req: &PathRequest) -> PathResponse {
    let world = prepared_world(req);
    let algorithm = Algorithm::from_tag(&req.algorithm);

    let result = find_path(req.start(), req.end(), &world, algorithm, &req.options());
    PathResponse::from_result(&result)
}

/// `POST /api/compare-algorithms`: A*, Dijkstra and BFS run serially against
/// the same prepared world.
pub fn handle_compare(req: &PathRequest) -> CompareResponse {
    let world = prepared_world(req);
    let options = req.options();
    let start = req.start();
    let end = req.end();

    let astar = find_path(start, end, &world, Algorithm::AStar, &options);
    let dijkstra = find_path(start, end, &world, Algorithm::Dijkstra, &options);
    let bfs = find_path(start, end, &world, Algorithm::Bfs, &options);

    CompareResponse {
        astar: AlgorithmComparison::from_result(Algorithm::AStar, &astar),
        dijkstra: AlgorithmComparison::from_result(Algorithm::Dijkstra, &dijkstra),
        bfs: AlgorithmComparison::from_result(Algorithm::Bfs, &bfs),
    }
}
