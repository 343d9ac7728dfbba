//! Face normal synthesis and fan triangulation.
//!
//! Triangulation never touches the parsed [`Face`]; it yields a derived
//! [`Triangles`] list that the flattener consumes.

use corelib::{Vec3, geometry::triangle_normal};

use crate::obj::{Corner, Face};

/// Normal used when a face is too degenerate to compute one.
pub const DEFAULT_NORMAL: Vec3 = Vec3::Y;

/// Face normal from corners `(0, 1, 2)`, retrying `(1, 2, 3)` for polygons when the
/// first triple is degenerate, falling back to [`DEFAULT_NORMAL`]. `reverse` flips
/// whichever normal was chosen.
pub fn synthesize_normal(positions: &[Vec3], corners: &[Corner], reverse: bool) -> Vec3 {
    let normal_at = |start: usize| -> Option<Vec3> {
        let p = |k: usize| {
            corners
                .get(start + k)
                .and_then(|c| positions.get(c.vertex))
                .copied()
        };
        triangle_normal(p(0)?, p(1)?, p(2)?)
    };

    let mut normal = normal_at(0);
    if normal.is_none() && corners.len() >= 4 {
        normal = normal_at(1);
    }
    let normal = normal.unwrap_or_else(|| {
        log::debug!("Degenerate face, using default normal");
        DEFAULT_NORMAL
    });

    if reverse { -normal } else { normal }
}

/// Fan around corner 0: `(0, i, i + 1)` for `i in 1..n-1`. Triangles pass through
/// unchanged; fewer than three corners give an empty list.
pub fn fan(corners: &[Corner]) -> Vec<Corner> {
    if corners.len() < 3 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(fan_len(corners.len()));
    for i in 1..corners.len() - 1 {
        out.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
    }
    out
}

/// Number of corners `fan` emits for a polygon of `n` corners.
#[inline]
pub const fn fan_len(n: usize) -> usize {
    if n < 3 { 0 } else { 3 * (n - 2) }
}

/// Triangle list derived from one face.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangles<'a> {
    pub corners: Vec<Corner>,
    pub normal: Vec3,
    pub material: &'a str,
}

impl Face {
    pub fn triangulate(&self) -> Triangles<'_> {
        Triangles {
            corners: fan(self.corners()),
            normal: self.normal(),
            material: self.material(),
        }
    }
}
