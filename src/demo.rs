//! Demo world generation for the HTTP playground and end-to-end tests.

use glam::IVec3;

use crate::block::Block;
use crate::world::VoxelWorld;

const MIN_XZ: i32 = -20;
const MAX_XZ: i32 = 20;
const MAX_Y: i32 = 10;

/// Seeds the demo world: a 41×11×41 shell of walkable air over a breakable
/// grass floor. A flat request gets hazard patches at ground level; a request
/// with differing start/end heights gets terraced stone levels joined by
/// wood ramps.
pub fn demo_world(start: IVec3, goal: IVec3) -> VoxelWorld {
    let mut world = VoxelWorld::new();

    for x in MIN_XZ..=MAX_XZ {
        for y in 0..=MAX_Y {
            for z in MIN_XZ..=MAX_XZ {
                let block = if y == 0 { Block::grass() } else { Block::air() };
                world.set_block(IVec3::new(x, y, z), block);
            }
        }
    }

    if start.y == goal.y {
        hazard_patches(&mut world);
    } else {
        terraces(&mut world, start.y.max(goal.y));
    }

    world
}

/// Ground-level terrain patches in the four quadrants: water, sand, lava and
/// ice, leaving the area around the origin open.
fn hazard_patches(world: &mut VoxelWorld) {
    for x in 10..=15 {
        for z in 10..=15 {
            world.set_block(IVec3::new(x, 1, z), Block::water());
        }
    }

    for x in -15..=-10 {
        for z in 10..=15 {
            world.set_block(IVec3::new(x, 1, z), Block::sand());
        }
    }

    for x in -15..=-10 {
        for z in -15..=-10 {
            world.set_block(IVec3::new(x, 1, z), Block::lava());
        }
    }

    for x in 10..=15 {
        for z in -15..=-10 {
            world.set_block(IVec3::new(x, 1, z), Block::ice());
        }
    }
}

/// Stacked stone terraces rising toward +X/+Z, each level set back eight
/// cells, with a diagonal wood ramp joining consecutive levels.
fn terraces(world: &mut VoxelWorld, max_height: i32) {
    for level in 1..=max_height {
        let inset = MIN_XZ + (level - 1) * 8;

        for x in inset..=MAX_XZ {
            for z in inset..=MAX_XZ {
                for y in 1..level {
                    world.set_block(IVec3::new(x, y, z), Block::stone());
                }
                world.set_block(IVec3::new(x, level, z), Block::air());
            }
        }

        if level > 1 {
            for i in 0..8 {
                let ramp_x = inset - 8 + i;
                let ramp_z = inset - 8 + i;

                world.set_block(IVec3::new(ramp_x, level - 1, ramp_z), Block::wood());
                for y in 1..level - 1 {
                    world.set_block(IVec3::new(ramp_x, y, ramp_z), Block::stone());
                }
            }
        }
    }
}
