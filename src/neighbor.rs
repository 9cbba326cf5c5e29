//! Option-driven neighbour expansion and the per-search manipulation sets.

use glam::IVec3;
use rustc_hash::FxHashSet;

use crate::block::BlockType;
use crate::dir::{CARDINAL, HORIZONTAL, VERTICAL_DIAGONAL, XZ_DIAGONAL};
use crate::options::PathfindingOptions;
use crate::world::VoxelWorld;

/// Cells whose entry required a manipulation during this search.
///
/// Whether a cell was broken or placed is a property of the edge that entered
/// it, not of the world; entries accumulate for the whole search and the
/// post-processor filters them against the final path.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    pub(crate) breaks: FxHashSet<IVec3>,
    pub(crate) places: FxHashSet<IVec3>,
}

impl Scratch {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// Extra direction sets layered on the shared cardinal expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Profile {
    /// The six cardinal directions only.
    Cardinal,
    /// Adds the four XZ diagonals in breaking mode (A*'s horizontal
    /// expander).
    XzDiagonal,
    /// Adds XZ and vertical diagonals in plain mode (Theta*'s any-angle
    /// expander).
    AnyAngle,
}

/// Collects the cells reachable from `pos` into `out` under the mode the
/// options select. `strict_water` makes avoid-water an exclusion rather than
/// a surcharge (BFS-family behaviour).
pub(crate) fn expand(
    world: &VoxelWorld,
    pos: IVec3,
    options: &PathfindingOptions,
    profile: Profile,
    strict_water: bool,
    scratch: &mut Scratch,
    out: &mut Vec<IVec3>,
) {
    out.clear();

    if options.allow_breaking {
        expand_breaking(world, pos, profile, scratch, out);
    } else if options.allow_placing {
        expand_placing(world, pos, scratch, out);
    } else {
        expand_plain(world, pos, options, profile, strict_water, out);
    }
}

fn expand_breaking(
    world: &VoxelWorld,
    pos: IVec3,
    profile: Profile,
    scratch: &mut Scratch,
    out: &mut Vec<IVec3>,
) {
    let diagonals = if profile == Profile::Cardinal {
        &[][..]
    } else {
        &XZ_DIAGONAL[..]
    };

    for dir in CARDINAL.iter().chain(diagonals) {
        let neighbor = pos + *dir;

        if world.is_walkable(neighbor) {
            out.push(neighbor);
        } else if world.can_break(neighbor) {
            out.push(neighbor);
            scratch.breaks.insert(neighbor);
        }
    }
}

fn expand_placing(world: &VoxelWorld, pos: IVec3, scratch: &mut Scratch, out: &mut Vec<IVec3>) {
    for dir in HORIZONTAL {
        let neighbor = pos + dir;
        if world.is_walkable(neighbor) {
            out.push(neighbor);
        }

        // Placement candidate: two steps out at the same height, currently
        // not walkable, with something other than air underneath to carry
        // the placed block. Unknown ground counts as support.
        let candidate = pos + dir * 2;
        if !world.is_walkable(candidate) {
            let below = candidate - IVec3::Y;
            if world.block_type(below) != BlockType::Air {
                out.push(candidate);
                scratch.places.insert(candidate);
            }
        }
    }
}

fn expand_plain(
    world: &VoxelWorld,
    pos: IVec3,
    options: &PathfindingOptions,
    profile: Profile,
    strict_water: bool,
    out: &mut Vec<IVec3>,
) {
    let (xz, vertical): (&[IVec3], &[IVec3]) = if profile == Profile::AnyAngle {
        (&XZ_DIAGONAL, &VERTICAL_DIAGONAL)
    } else {
        (&[], &[])
    };

    for dir in CARDINAL.iter().chain(xz).chain(vertical) {
        let neighbor = pos + *dir;

        if !world.is_walkable(neighbor) {
            continue;
        }

        if strict_water
            && options.avoid_water
            && world.block_type(neighbor) == BlockType::Water
        {
            continue;
        }

        out.push(neighbor);
    }
}
