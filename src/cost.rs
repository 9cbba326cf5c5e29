//! Edge-weight surcharges and the search heuristic.

use glam::IVec3;

use crate::block::BlockType;
use crate::neighbor::Scratch;
use crate::options::PathfindingOptions;
use crate::world::VoxelWorld;

pub(crate) const BREAK_COST: f64 = 5.0;
pub(crate) const PLACE_COST: f64 = 3.0;
pub(crate) const WATER_PENALTY: f64 = 10.0;
pub(crate) const HEIGHT_PENALTY: f64 = 2.0;

/// Option-driven surcharges for entering `to` from `from`.
pub(crate) fn surcharges(
    world: &VoxelWorld,
    from: IVec3,
    to: IVec3,
    options: &PathfindingOptions,
    scratch: &Scratch,
) -> f64 {
    let mut extra = 0.0;

    if scratch.breaks.contains(&to) {
        extra += BREAK_COST;
    }
    if scratch.places.contains(&to) {
        extra += PLACE_COST;
    }
    if options.avoid_water && world.block_type(to) == BlockType::Water {
        extra += WATER_PENALTY;
    }
    if options.minimise_height && to.y != from.y {
        extra += HEIGHT_PENALTY * f64::from((to.y - from.y).abs());
    }

    extra
}

/// Effective weight of the edge `from` → `to`: the world's movement cost plus
/// the option surcharges.
pub(crate) fn edge_cost(
    world: &VoxelWorld,
    from: IVec3,
    to: IVec3,
    options: &PathfindingOptions,
    scratch: &Scratch,
) -> f64 {
    world.movement_cost(from, to) + surcharges(world, from, to, options, scratch)
}

/// Sum of the effective edge weights along `path`.
pub(crate) fn path_cost(
    world: &VoxelWorld,
    path: &[IVec3],
    options: &PathfindingOptions,
    scratch: &Scratch,
) -> f64 {
    path.windows(2)
        .map(|pair| edge_cost(world, pair[0], pair[1], options, scratch))
        .sum()
}

/// |ΔX| + |ΔZ| + w·|ΔY|, with w = 2 under minimise-height.
///
/// The Y term is deliberately kept out of the horizontal plane so the
/// estimate stays admissible when XZ-diagonal moves are in play. A non-zero
/// heuristic weight scales the whole estimate.
pub(crate) fn heuristic(a: IVec3, b: IVec3, options: &PathfindingOptions) -> f64 {
    let horizontal = f64::from((a.x - b.x).abs() + (a.z - b.z).abs());
    let mut vertical = f64::from((a.y - b.y).abs());
    if options.minimise_height {
        vertical *= 2.0;
    }

    let h = horizontal + vertical;
    if options.heuristic_weight > 0.0 {
        h * options.heuristic_weight
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use approx::assert_relative_eq;

    #[test]
    fn break_points_pay_the_break_surcharge() {
        let mut world = VoxelWorld::new();
        let target = IVec3::new(1, 1, 0);
        world.set_block(target, Block::grass());

        let mut scratch = Scratch::new();
        scratch.breaks.insert(target);
        let options = PathfindingOptions {
            allow_breaking: true,
            ..Default::default()
        };

        let cost = edge_cost(&world, IVec3::new(0, 1, 0), target, &options, &scratch);
        assert_relative_eq!(cost, 1.0 + BREAK_COST);
    }

    #[test]
    fn water_surcharge_only_when_avoiding() {
        let mut world = VoxelWorld::new();
        let target = IVec3::new(1, 1, 0);
        world.set_block(target, Block::water());
        let scratch = Scratch::new();

        let plain = edge_cost(
            &world,
            IVec3::new(0, 1, 0),
            target,
            &PathfindingOptions::default(),
            &scratch,
        );
        let avoiding = edge_cost(
            &world,
            IVec3::new(0, 1, 0),
            target,
            &PathfindingOptions {
                avoid_water: true,
                ..Default::default()
            },
            &scratch,
        );

        // Water's 3.0 multiplier applies either way.
        assert_relative_eq!(plain, 3.0);
        assert_relative_eq!(avoiding, 3.0 + WATER_PENALTY);
    }

    #[test]
    fn minimise_height_charges_per_unit() {
        let world = VoxelWorld::new();
        let scratch = Scratch::new();
        let options = PathfindingOptions {
            minimise_height: true,
            ..Default::default()
        };

        let cost = edge_cost(
            &world,
            IVec3::new(0, 1, 0),
            IVec3::new(0, 3, 0),
            &options,
            &scratch,
        );
        // 1.0 base + 2.0 ascent + 2 * 2.0 penalty.
        assert_relative_eq!(cost, 7.0);
    }

    #[test]
    fn heuristic_omits_vertical_weighting_by_default() {
        let a = IVec3::new(0, 0, 0);
        let b = IVec3::new(2, 3, 1);

        assert_relative_eq!(heuristic(a, b, &PathfindingOptions::default()), 6.0);

        let minimise = PathfindingOptions {
            minimise_height: true,
            ..Default::default()
        };
        assert_relative_eq!(heuristic(a, b, &minimise), 9.0);
    }

    #[test]
    fn heuristic_weight_scales_everything() {
        let a = IVec3::new(0, 0, 0);
        let b = IVec3::new(4, 0, 0);
        let weighted = PathfindingOptions {
            heuristic_weight: 2.5,
            ..Default::default()
        };

        assert_relative_eq!(heuristic(a, b, &weighted), 10.0);
    }

    #[test]
    fn path_cost_sums_edges() {
        let mut world = VoxelWorld::new();
        for x in 0..3 {
            world.set_block(IVec3::new(x, 1, 0), Block::air());
        }
        let scratch = Scratch::new();

        let path = [
            IVec3::new(0, 1, 0),
            IVec3::new(1, 1, 0),
            IVec3::new(2, 1, 0),
        ];
        let total = path_cost(&world, &path, &PathfindingOptions::default(), &scratch);
        assert_relative_eq!(total, 2.0);
    }
}
