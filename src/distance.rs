//! Grid distance metrics.

use glam::IVec3;

/// Sum of the absolute per-axis differences.
pub fn manhattan(a: IVec3, b: IVec3) -> f64 {
    let d = (a - b).abs();
    f64::from(d.x + d.y + d.z)
}

/// Straight-line distance.
pub fn euclidean(a: IVec3, b: IVec3) -> f64 {
    (a - b).as_dvec3().length()
}

/// Largest absolute per-axis difference.
pub fn chebyshev(a: IVec3, b: IVec3) -> f64 {
    f64::from((a - b).abs().max_element())
}
