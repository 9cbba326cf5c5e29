//! 3-D Bresenham rasterisation and line-of-sight tests.

use glam::IVec3;

use crate::world::VoxelWorld;

/// Rasterises the straight line from `from` to `to`, inclusive of both
/// endpoints, stepping the dominant axis once per cell.
pub fn line_points(from: IVec3, to: IVec3) -> Vec<IVec3> {
    let delta = (to - from).abs();
    let step = (to - from).signum();

    let mut points = Vec::with_capacity(delta.max_element() as usize + 1);
    let IVec3 {
        mut x,
        mut y,
        mut z,
    } = from;

    if delta.x >= delta.y && delta.x >= delta.z {
        let mut err_y = 2 * delta.y - delta.x;
        let mut err_z = 2 * delta.z - delta.x;

        for _ in 0..=delta.x {
            points.push(IVec3::new(x, y, z));

            if err_y > 0 {
                y += step.y;
                err_y -= 2 * delta.x;
            }
            if err_z > 0 {
                z += step.z;
                err_z -= 2 * delta.x;
            }

            err_y += 2 * delta.y;
            err_z += 2 * delta.z;
            x += step.x;
        }
    } else if delta.y >= delta.x && delta.y >= delta.z {
        let mut err_x = 2 * delta.x - delta.y;
        let mut err_z = 2 * delta.z - delta.y;

        for _ in 0..=delta.y {
            points.push(IVec3::new(x, y, z));

            if err_x > 0 {
                x += step.x;
                err_x -= 2 * delta.y;
            }
            if err_z > 0 {
                z += step.z;
                err_z -= 2 * delta.y;
            }

            err_x += 2 * delta.x;
            err_z += 2 * delta.z;
            y += step.y;
        }
    } else {
        let mut err_y = 2 * delta.y - delta.z;
        let mut err_x = 2 * delta.x - delta.z;

        for _ in 0..=delta.z {
            points.push(IVec3::new(x, y, z));

            if err_y > 0 {
                y += step.y;
                err_y -= 2 * delta.z;
            }
            if err_x > 0 {
                x += step.x;
                err_x -= 2 * delta.z;
            }

            err_y += 2 * delta.y;
            err_x += 2 * delta.x;
            z += step.z;
        }
    }

    points
}

/// True when both endpoints are walkable and no non-walkable cell lies on the
/// rasterised line between them (endpoints excluded from the blockage test).
pub fn has_line_of_sight(world: &VoxelWorld, from: IVec3, to: IVec3) -> bool {
    if !world.is_walkable(from) || !world.is_walkable(to) {
        return false;
    }

    line_points(from, to)
        .into_iter()
        .filter(|&p| p != from && p != to)
        .all(|p| world.is_walkable(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    fn open_line(world: &mut VoxelWorld, from: IVec3, to: IVec3) {
        for p in line_points(from, to) {
            world.set_block(p, Block::air());
        }
    }

    #[test]
    fn line_includes_both_endpoints() {
        let from = IVec3::new(0, 0, 0);
        let to = IVec3::new(4, 0, 0);
        let points = line_points(from, to);

        assert_eq!(points.len(), 5);
        assert_eq!(points[0], from);
        assert_eq!(points[4], to);
    }

    #[test]
    fn line_steps_dominant_axis_once_per_cell() {
        let points = line_points(IVec3::new(0, 0, 0), IVec3::new(6, 2, 0));
        assert_eq!(points.len(), 7);

        for pair in points.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 1);
        }
    }

    #[test]
    fn degenerate_line_is_single_cell() {
        let p = IVec3::new(2, 1, -3);
        assert_eq!(line_points(p, p), vec![p]);
    }

    #[test]
    fn sight_blocked_by_intermediate_cell() {
        let mut world = VoxelWorld::new();
        let from = IVec3::new(0, 1, 0);
        let to = IVec3::new(4, 1, 0);
        open_line(&mut world, from, to);

        assert!(has_line_of_sight(&world, from, to));

        world.set_block(IVec3::new(2, 1, 0), Block::stone());
        assert!(!has_line_of_sight(&world, from, to));
    }

    #[test]
    fn sight_requires_walkable_endpoints() {
        let mut world = VoxelWorld::new();
        let from = IVec3::new(0, 1, 0);
        let to = IVec3::new(3, 1, 0);
        open_line(&mut world, from, to);

        world.set_block(to, Block::lava());
        assert!(!has_line_of_sight(&world, from, to));
    }
}
