//! Direction offset tables shared by the neighbour expanders.

use glam::IVec3;

/// The six axis-aligned directions, including ±Y.
pub(crate) const CARDINAL: [IVec3; 6] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// The four horizontal cardinals. Placement candidates are probed two of
/// these steps out.
pub(crate) const HORIZONTAL: [IVec3; 4] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Horizontal diagonals in the XZ plane.
pub(crate) const XZ_DIAGONAL: [IVec3; 4] = [
    IVec3::new(1, 0, 1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, 1),
    IVec3::new(-1, 0, -1),
];

/// Diagonals that combine one horizontal step with one vertical step.
pub(crate) const VERTICAL_DIAGONAL: [IVec3; 8] = [
    IVec3::new(1, 1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(0, 1, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, -1, 0),
    IVec3::new(0, -1, 1),
    IVec3::new(0, -1, -1),
];
