use crate::Vec3;

/// Unit normal of the triangle `(p0, p1, p2)`, taken as `normalize((p0 - p1) x (p2 - p1))`.
///
/// Returns `None` when the cross product has zero (or non-finite) length, i.e. the
/// points are collinear or coincide.
#[inline]
pub fn triangle_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Option<Vec3> {
    (p0 - p1).cross(p2 - p1).try_normalize()
}
